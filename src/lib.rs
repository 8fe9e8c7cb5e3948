pub mod cli;
pub mod config;
pub mod error;
pub mod juggler;
pub mod render;
pub mod tracker;
