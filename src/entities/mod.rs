pub mod driver;
pub mod ride;
pub mod rider;
pub mod surge_zone;
pub mod vehicle;

/// Check that `id` is `prefix` followed by exactly `digits` ASCII digits,
/// e.g. `DRV007` or `RIDE0042`.
pub fn has_id_format(id: &str, prefix: &str, digits: usize) -> bool {
    match id.strip_prefix(prefix) {
        Some(rest) => rest.len() == digits && rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Format an entity id as `prefix` + zero-padded number.
pub fn format_id(prefix: &str, number: u32, digits: usize) -> String {
    format!("{prefix}{number:0digits$}")
}

pub(crate) fn check_unit_range(value: f64, min: f64, max: f64, field: &str) -> Result<(), String> {
    if !value.is_finite() || value < min || value > max {
        return Err(format!("{field} must be within [{min}, {max}], got {value}"));
    }
    Ok(())
}

pub(crate) fn check_non_negative(value: f64, field: &str) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{field} must be non-negative, got {value}"));
    }
    Ok(())
}
