//! # Fyyur Common Library
//!
//! Shared code for the Fyyur booking site:
//! - Database bootstrap, migrations, models and queries
//! - Bootstrap configuration loading
//! - Show time parsing and formatting

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
