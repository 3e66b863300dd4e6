//! # babel-core
//!
//! Core types, traits, language tables, configuration, and error handling
//! for the Babel translation bot.

pub mod config;
pub mod error;
pub mod languages;
pub mod message;
pub mod traits;
