pub mod config;
pub mod db;
pub mod metrics;
pub mod output;
