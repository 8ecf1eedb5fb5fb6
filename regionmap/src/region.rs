//! Region records and the read-only database interface.
//!
//! The region database is an external collaborator: a mapping from names of
//! the form `"<City>#<Index>"` to records carrying at minimum an integer
//! coordinate pair. Records may carry arbitrary extra fields; the renderer
//! keeps them intact and ignores them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coord::RegionCoord;

/// One named region of a city grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Grid position at the base granularity.
    #[serde(rename = "region_coords")]
    pub coords: RegionCoord,

    /// Open attribute bag for fields the renderer does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Region {
    pub fn new(coords: RegionCoord) -> Self {
        Self {
            coords,
            extra: serde_json::Map::new(),
        }
    }
}

/// Regions of one render request, keyed by full name.
///
/// An ordered map keeps draw order (and therefore output bytes) stable for a
/// given input.
pub type RegionSet = BTreeMap<String, Region>;

/// Label drawn inside a region cell: the index suffix of its name.
///
/// `"Akita#6"` becomes `"#6"`; names without a `#` separator fall back to
/// `"#?"`.
pub fn label_for(name: &str) -> String {
    match name.split_once('#') {
        Some((_, index)) => format!("#{index}"),
        None => "#?".to_string(),
    }
}

/// Select the regions of one city from a database by name prefix.
///
/// Matches names starting with `"<city>#"`, so `"Akita"` does not pick up
/// `"Akitakata"` regions.
pub fn search_by_city(database: &RegionSet, city_name: &str) -> RegionSet {
    let prefix = format!("{city_name}#");
    database
        .iter()
        .filter(|(name, _)| name.starts_with(&prefix))
        .map(|(name, region)| (name.clone(), region.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_uses_index_suffix() {
        assert_eq!(label_for("Akita#6"), "#6");
        assert_eq!(label_for("Tokyo#128"), "#128");
    }

    #[test]
    fn test_label_without_separator() {
        assert_eq!(label_for("Akita"), "#?");
    }

    #[test]
    fn test_deserialize_tolerates_extra_fields() {
        let json = r#"{
            "region_coords": [10, 5],
            "owner": "somebody",
            "pixels": 12345
        }"#;
        let region: Region = serde_json::from_str(json).unwrap();
        assert_eq!(region.coords, RegionCoord::new(10, 5));
        assert_eq!(region.extra["owner"], "somebody");
        assert_eq!(region.extra["pixels"], 12345);
    }

    #[test]
    fn test_serialize_keeps_extra_fields() {
        let mut region = Region::new(RegionCoord::new(1, 2));
        region
            .extra
            .insert("owner".to_string(), serde_json::json!("somebody"));
        let value = serde_json::to_value(&region).unwrap();
        assert_eq!(value["region_coords"], serde_json::json!([1, 2]));
        assert_eq!(value["owner"], "somebody");
    }

    #[test]
    fn test_search_matches_city_prefix_only() {
        let mut db = RegionSet::new();
        db.insert("Akita#6".to_string(), Region::new(RegionCoord::new(10, 5)));
        db.insert("Akita#7".to_string(), Region::new(RegionCoord::new(11, 5)));
        db.insert(
            "Akitakata#1".to_string(),
            Region::new(RegionCoord::new(0, 0)),
        );
        db.insert("Tokyo#1".to_string(), Region::new(RegionCoord::new(50, 50)));

        let result = search_by_city(&db, "Akita");
        assert_eq!(result.len(), 2);
        assert!(result.contains_key("Akita#6"));
        assert!(result.contains_key("Akita#7"));
    }

    #[test]
    fn test_search_unknown_city_is_empty() {
        let mut db = RegionSet::new();
        db.insert("Akita#6".to_string(), Region::new(RegionCoord::new(10, 5)));
        assert!(search_by_city(&db, "Osaka").is_empty());
    }
}
