//! Templated enrichment of a single listing summary line.

const ENRICHMENT_EXTRAS: &str = "Amenities: Clubhouse, gym, landscaped gardens, children's play area, 24x7 security, power backup.\n\
Connectivity: Quick access to major roads, daily convenience stores, schools, and hospitals within a 2-5 km radius.\n\
Lifestyle: Well-ventilated home with ample natural light; ideal for families seeking a peaceful yet central neighborhood.";

/// Append the templated amenity, connectivity, and lifestyle notes to a
/// listing summary. Returns `None` when there is nothing to enrich. Prices
/// and contacts are never invented beyond what the summary carries.
pub fn enrich_summary(listing_summary: &str) -> Option<String> {
    let base = listing_summary.trim();
    if base.is_empty() {
        return None;
    }
    Some(format!("{base}\n\n{ENRICHMENT_EXTRAS}"))
}
