// file: src/boundary/geocode.rs
// description: address to coordinate lookup used for map markers
// reference: static postal and area centroid tables; no network access

use crate::geo::patterns::extract_postal_code;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Coordinates for a clinic address. Ranking never calls this.
pub trait Geocoder {
    fn coordinates(&self, address: &str, area: Option<&str>) -> Option<(f64, f64)>;
}

lazy_static! {
    static ref POSTAL_COORDINATES: HashMap<u32, (f64, f64)> = HashMap::from([
        (640526, (1.3486, 103.7065)),
        (640652, (1.3500, 103.7070)),
        (640650, (1.3495, 103.7068)),
        (640651, (1.3498, 103.7069)),
        (641650, (1.3390, 103.7120)),
        (641651, (1.3392, 103.7122)),
        (641653, (1.3398, 103.7128)),
    ]);

    static ref AREA_CENTROIDS: HashMap<&'static str, (f64, f64)> = HashMap::from([
        ("jurong west", (1.347, 103.717)),
        ("bedok", (1.324, 103.930)),
        ("tampines", (1.345, 103.944)),
        ("yishun", (1.429, 103.835)),
        ("woodlands", (1.437, 103.786)),
        ("ang mo kio", (1.375, 103.845)),
        ("sengkang", (1.391, 103.895)),
        ("punggol", (1.405, 103.902)),
        ("serangoon", (1.357, 103.874)),
        ("bukit batok", (1.358, 103.754)),
        ("bukit merah", (1.277, 103.823)),
        ("clementi", (1.315, 103.760)),
        ("hougang", (1.371, 103.886)),
        ("pasir ris", (1.372, 103.949)),
        ("toa payoh", (1.334, 103.856)),
    ]);
}

/// Exact postal code coordinates first, then the area centroid.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableGeocoder;

impl TableGeocoder {
    pub fn new() -> Self {
        Self
    }
}

impl Geocoder for TableGeocoder {
    fn coordinates(&self, address: &str, area: Option<&str>) -> Option<(f64, f64)> {
        extract_postal_code(address)
            .and_then(|code| POSTAL_COORDINATES.get(&code).copied())
            .or_else(|| {
                area.map(|a| a.trim().to_lowercase())
                    .and_then(|a| AREA_CENTROIDS.get(a.as_str()).copied())
            })
    }
}
