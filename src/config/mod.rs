//! Configuration module
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so an empty file (or no file at
//! all) is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use sitemapper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitemapper.toml")).unwrap();
//! println!("Fetch slots: {}", config.crawler.max_concurrent_fetches);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    Config, CrawlerConfig, HttpConfig, UserAgentConfig, DEFAULT_MAX_CONCURRENT_FETCHES,
};

pub use parser::{load_config, load_config_with_hash, parse_config};
pub use validation::{validate, MAX_CONCURRENT_FETCHES_LIMIT};

pub(crate) use validation::validate_crawler_config;
