// 📂 Flat-file loading - listings.csv and reviews.csv
// Data is read fresh on every scene entry: no cache, no mutation, no store.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// One Airbnb listing row.
///
/// Column names follow the Inside Airbnb export; unknown columns in the
/// file are ignored. `reviews_per_month` is the listing's engagement
/// metric; review ratings are a separate per-review score (see [`Review`]).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Listing {
    #[serde(rename = "id")]
    pub id: i64,

    #[serde(rename = "name")]
    pub name: String,

    #[serde(rename = "neighbourhood")]
    pub neighbourhood: String,

    #[serde(rename = "price")]
    pub price: f64,

    #[serde(rename = "reviews_per_month")]
    pub reviews_per_month: f64,
}

/// One review row, tied to its listing by `listing_id`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Review {
    #[serde(rename = "listing_id")]
    pub listing_id: i64,

    /// ISO date (YYYY-MM-DD)
    #[serde(rename = "date")]
    pub date: NaiveDate,

    /// Rating on a 0-5 scale
    #[serde(rename = "rating")]
    pub rating: f64,
}

/// Load all listings from a CSV file.
///
/// A malformed row is a hard error (with file and row context), not a
/// silent NaN that shows up later as a misplaced chart point.
pub fn load_listings<P: AsRef<Path>>(path: P) -> Result<Vec<Listing>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open listings file: {}", path.display()))?;

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut listings = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        let listing: Listing = row.with_context(|| {
            format!("Failed to parse listing row {} in {}", i + 2, path.display())
        })?;
        listings.push(listing);
    }

    Ok(listings)
}

/// Load all reviews from a CSV file.
pub fn load_reviews<P: AsRef<Path>>(path: P) -> Result<Vec<Review>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open reviews file: {}", path.display()))?;

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut reviews = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        let review: Review = row.with_context(|| {
            format!("Failed to parse review row {} in {}", i + 2, path.display())
        })?;
        reviews.push(review);
    }

    Ok(reviews)
}

// ============================================================================
// TESTS
// ============================================================================
