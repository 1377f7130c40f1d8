pub mod detection;
pub mod monitor;
