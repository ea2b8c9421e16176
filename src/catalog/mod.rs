//! Property catalog: the listing record and the sources that load it.

pub mod file_source;

pub use file_source::FileCatalogSource;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// One property listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub location: String,
    pub property_type: String,
    pub price_lakhs: u32,
    #[serde(default)]
    pub area_sqft: Option<f64>,
    pub contact_person: String,
    pub contact_phone: String,
}

impl Listing {
    /// The single-line form search results are reported in.
    pub fn summary(&self) -> String {
        format!(
            "- Found: {} in {} for {} Lakhs. Contact {} at {}.",
            self.property_type,
            self.location,
            self.price_lakhs,
            self.contact_person,
            self.contact_phone
        )
    }
}

/// A source of listings. Implementations reload on every call so edits to
/// the backing data show up without a restart.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<Vec<Listing>, CatalogError>;
}

/// Fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogSource {
    listings: Vec<Listing>,
}

impl MemoryCatalogSource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

impl CatalogSource for MemoryCatalogSource {
    fn load(&self) -> Result<Vec<Listing>, CatalogError> {
        Ok(self.listings.clone())
    }
}
