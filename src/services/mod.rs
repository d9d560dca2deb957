pub mod generator;
pub mod metrics;
pub mod queries;
pub mod rides;
pub mod seeding;
