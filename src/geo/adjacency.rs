// file: src/geo/adjacency.rs
// description: symmetric neighbour lists for known area names
// reference: used only when an area name matches no row directly

use lazy_static::lazy_static;
use std::collections::{BTreeSet, HashMap};

const EDGES: &[(&str, &str)] = &[
    ("bedok", "tampines"),
    ("bedok", "pasir ris"),
    ("bedok", "changi"),
    ("tampines", "pasir ris"),
    ("tampines", "sengkang"),
    ("tampines", "punggol"),
    ("yishun", "woodlands"),
    ("yishun", "sembawang"),
    ("yishun", "ang mo kio"),
    ("woodlands", "sembawang"),
    ("woodlands", "choa chu kang"),
    ("jurong west", "jurong east"),
    ("jurong west", "choa chu kang"),
    ("jurong west", "bukit batok"),
    ("sengkang", "punggol"),
    ("sengkang", "serangoon"),
    ("punggol", "serangoon"),
    ("ang mo kio", "serangoon"),
    ("ang mo kio", "bishan"),
    ("serangoon", "bishan"),
];

lazy_static! {
    static ref NEIGHBORS: HashMap<&'static str, BTreeSet<&'static str>> = {
        let mut map: HashMap<&'static str, BTreeSet<&'static str>> = HashMap::new();
        for (a, b) in EDGES {
            map.entry(*a).or_default().insert(*b);
            map.entry(*b).or_default().insert(*a);
        }
        map
    };
}

/// Neighbouring areas of `area` (case-insensitive); empty when unknown.
pub fn neighbors(area: &str) -> Vec<&'static str> {
    NEIGHBORS
        .get(area.trim().to_lowercase().as_str())
        .map(|set| set.iter().copied().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_area() {
        let bedok = neighbors("Bedok");
        assert!(bedok.contains(&"tampines"));
        assert!(bedok.contains(&"pasir ris"));
        assert!(bedok.contains(&"changi"));
    }

    #[test]
    fn test_unknown_area() {
        assert!(neighbors("Atlantis").is_empty());
        assert!(neighbors("").is_empty());
    }

    #[test]
    fn test_table_is_symmetric() {
        for (area, list) in NEIGHBORS.iter() {
            for other in list {
                assert!(
                    neighbors(other).contains(area),
                    "{} lists {} but not the reverse",
                    area,
                    other
                );
            }
        }
    }
}
