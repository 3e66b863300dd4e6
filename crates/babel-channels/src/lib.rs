//! # babel-channels
//!
//! Chat platform integrations for Babel.

pub mod discord;
pub mod utils;
