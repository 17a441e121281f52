use std::{fs, io, path::Path};

use thiserror::Error;

use super::model::Catalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("couldn't read catalog file: {0}")]
    Io(#[from] io::Error),
    #[error("couldn't parse catalog file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Catalog {
    /// Read a catalog from a TOML file with top-level `trending`, `genres`,
    /// `artists` and `playlists` arrays. Missing arrays are empty.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(text)?)
    }
}
