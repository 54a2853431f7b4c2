//! Report rendering: percentage bars and the text/JSON/TOML layouts.

mod render;

pub use render::*;
