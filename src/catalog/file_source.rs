use std::path::PathBuf;

use crate::error::CatalogError;

use super::{CatalogSource, Listing};

/// CSV-backed catalog. The file is read afresh on every load.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    fn load(&self) -> Result<Vec<Listing>, CatalogError> {
        if !self.path.exists() {
            return Err(CatalogError::NotFound(self.path.clone()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| CatalogError::Read(e.to_string()))?;

        let mut listings = Vec::new();
        for (index, record) in reader.deserialize::<Listing>().enumerate() {
            // Header occupies line 1, first record is line 2.
            let listing = record.map_err(|e| CatalogError::Malformed {
                line: index + 2,
                message: e.to_string(),
            })?;
            listings.push(listing);
        }
        Ok(listings)
    }
}
