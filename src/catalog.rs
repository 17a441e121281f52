//! The browsable catalog: trending songs, genres, artists and playlists.
//!
//! A built-in catalog is always available; a TOML file can replace it.

mod load;
mod model;

pub use model::*;
