// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod specs;

pub mod file;
pub mod index;
pub mod link;
pub mod model;
pub mod progress;
pub mod query;
pub mod scrape;
pub mod server;
pub mod store;
