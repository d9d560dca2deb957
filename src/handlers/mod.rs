pub mod admin;
pub mod analytics;
pub mod dashboard;
pub mod drivers;
pub mod health;
pub mod rides;
pub mod surge;
