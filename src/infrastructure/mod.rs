pub mod database;
pub mod repositories;
pub mod telemetry;
pub mod util;
