pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod handler;
pub mod loader;
pub mod model;
pub mod narrative;
pub mod parser;
pub mod sample;
pub mod server;
pub mod store;
pub mod utils;
