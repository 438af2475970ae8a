// 🗺️ Neighbourhood boundaries - minimal GeoJSON model
// Flattens Polygon/MultiPolygon features into drawable rings; the actual
// projection and path math belongs to the chart surface, not to us.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One named region: a neighbourhood with its boundary rings.
/// Each ring is a closed sequence of (lon, lat) positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub rings: Vec<Vec<(f64, f64)>>,
}

/// All regions from a boundary file, in file order.
#[derive(Debug, Clone, Default)]
pub struct RegionCollection {
    pub regions: Vec<Region>,
}

/// Lon/lat extent of a collection, used as the chart surface's
/// domain parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl RegionCollection {
    /// Region names in file order.
    pub fn names(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.name.as_str()).collect()
    }

    /// Extent over every ring of every region. `None` when there are no
    /// positions at all.
    pub fn bounds(&self) -> Option<GeoBounds> {
        let mut bounds: Option<GeoBounds> = None;

        for region in &self.regions {
            for ring in &region.rings {
                for &(lon, lat) in ring {
                    bounds = Some(match bounds {
                        None => GeoBounds {
                            min_lon: lon,
                            max_lon: lon,
                            min_lat: lat,
                            max_lat: lat,
                        },
                        Some(b) => GeoBounds {
                            min_lon: b.min_lon.min(lon),
                            max_lon: b.max_lon.max(lon),
                            min_lat: b.min_lat.min(lat),
                            max_lat: b.max_lat.max(lat),
                        },
                    });
                }
            }
        }

        bounds
    }
}

// ============================================================================
// RAW GEOJSON SHAPES (private - only the flattened model is exposed)
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    properties: RawProperties,
    geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
struct RawProperties {
    neighbourhood: String,
}

// Positions are Vec<f64> rather than pairs: GeoJSON allows a third
// altitude element, which we drop.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
}

fn flatten_ring(ring: &[Vec<f64>]) -> Vec<(f64, f64)> {
    ring.iter()
        .filter(|pos| pos.len() >= 2)
        .map(|pos| (pos[0], pos[1]))
        .collect()
}

impl RawGeometry {
    fn rings(&self) -> Vec<Vec<(f64, f64)>> {
        match self {
            RawGeometry::Polygon { coordinates } => {
                coordinates.iter().map(|r| flatten_ring(r)).collect()
            }
            RawGeometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flat_map(|poly| poly.iter().map(|r| flatten_ring(r)))
                .collect(),
        }
    }
}

/// Load neighbourhood boundaries from a GeoJSON FeatureCollection.
pub fn load_regions<P: AsRef<Path>>(path: P) -> Result<RegionCollection> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read boundary file: {}", path.display()))?;

    let raw: RawCollection = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse GeoJSON in {}", path.display()))?;

    let regions = raw
        .features
        .iter()
        .map(|f| Region {
            name: f.properties.neighbourhood.clone(),
            rings: f.geometry.rings(),
        })
        .collect();

    Ok(RegionCollection { regions })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"neighbourhood": "Mitte"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[13.3, 52.5], [13.4, 52.5], [13.4, 52.6], [13.3, 52.5]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"neighbourhood": "Kreuzberg"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[13.38, 52.48], [13.42, 52.48], [13.42, 52.51], [13.38, 52.48]]],
                        [[[13.44, 52.49], [13.46, 52.49], [13.46, 52.50], [13.44, 52.49]]]
                    ]
                }
            }
        ]
    }"#;

    fn write_fixture(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("stayscope_geo_{}", name));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_regions_preserves_file_order() {
        let path = write_fixture("ok.geojson", FIXTURE);
        let collection = load_regions(&path).unwrap();

        assert_eq!(collection.names(), vec!["Mitte", "Kreuzberg"]);
    }

    #[test]
    fn test_multipolygon_flattens_to_multiple_rings() {
        let path = write_fixture("multi.geojson", FIXTURE);
        let collection = load_regions(&path).unwrap();

        assert_eq!(collection.regions[0].rings.len(), 1);
        assert_eq!(collection.regions[1].rings.len(), 2);
        assert_eq!(collection.regions[0].rings[0][0], (13.3, 52.5));
    }

    #[test]
    fn test_bounds_cover_all_regions() {
        let path = write_fixture("bounds.geojson", FIXTURE);
        let collection = load_regions(&path).unwrap();

        let b = collection.bounds().unwrap();
        assert_eq!(b.min_lon, 13.3);
        assert_eq!(b.max_lon, 13.46);
        assert_eq!(b.min_lat, 52.48);
        assert_eq!(b.max_lat, 52.6);
    }

    #[test]
    fn test_empty_collection_has_no_bounds() {
        let collection = RegionCollection::default();
        assert!(collection.bounds().is_none());
    }

    #[test]
    fn test_malformed_geojson_is_error() {
        let path = write_fixture("bad.geojson", "{\"type\": \"FeatureCollection\"");
        let err = load_regions(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse"));
    }
}
