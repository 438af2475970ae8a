// StayScope - Core Library
// Linked-scene viewer for Airbnb listing data: map overview, neighbourhood
// detail, listing reviews, and aggregated insights.
// Exposes all modules for use in the TUI binary and tests.

pub mod app;      // Scene controller - one active view at a time
pub mod data;     // Flat-file loading (listings.csv, reviews.csv)
pub mod geo;      // Neighbourhood boundaries (GeoJSON)
pub mod pipeline; // Filter and aggregate
pub mod scene;    // Navigation chain as a transition table

// Re-export commonly used types
pub use app::{App, SceneView};
pub use data::{load_listings, load_reviews, Listing, Review};
pub use geo::{load_regions, GeoBounds, Region, RegionCollection};
pub use pipeline::{
    aggregate_by_neighbourhood, date_extent, listings_in, max_avg_price, max_price,
    max_reviews_per_month, reviews_for, NeighbourhoodInsight,
};
pub use scene::{transition, Action, Scene, SceneContext, TRANSITIONS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
