//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema for fetching, the Spotify
//! client and report rendering, plus helpers to load it from disk and the
//! environment.

mod load;
mod schema;

pub use schema::*;
