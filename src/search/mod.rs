pub mod config;
pub mod optimizer;
