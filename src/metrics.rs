//! The scoring engine.
//!
//! Raw track and artist records flow forward through `stats` (generic
//! primitives), `extract` (per-signal averages), `score` (weighted composite)
//! and `suggest` (threshold rules). Every stage is a pure function of its
//! input; nothing here touches the network, the filesystem or the environment.

mod extract;
mod score;
mod stats;
mod suggest;

pub use extract::artist_diversity;
pub use score::*;
pub use stats::*;
pub use suggest::*;

#[cfg(test)]
mod tests;
