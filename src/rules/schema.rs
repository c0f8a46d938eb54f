//! Raw serde shapes for the JSON rule file
//!
//! The file is a map from tile-type name to a rule object. Every neighbor
//! list key that any directionality scheme can require appears here as an
//! optional field; which combination must actually be present is decided by
//! the declared scheme and enforced while building the validated table.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::io::error::{GenerationError, Result};

/// A whole rule file, keyed by tile-type name
///
/// A `BTreeMap` keeps tile interning order independent of file key order,
/// so identical rule sets produce identical tile ids.
pub type RawRuleFile = BTreeMap<String, RawTileRule>;

/// One entry of a neighbor list: a candidate tile name and its weight
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNeighbor {
    /// Name of the admissible neighboring tile type
    pub tile: String,
    /// Selection weight contributed when this entry applies
    pub weight: u32,
}

/// One tile-type object exactly as it appears in the file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTileRule {
    /// Declared directionality scheme name
    pub directionality: String,

    /// Sprite file name, consumed only by the renderer
    #[serde(default)]
    pub sprite: String,

    /// Counterclockwise quarter turns applied to the sprite (0-3)
    #[serde(default)]
    pub rotation: u8,

    /// Shared list for the `none` scheme
    #[serde(default)]
    pub valid_neighbors: Option<Vec<RawNeighbor>>,

    /// North/South list for the `axis` scheme
    #[serde(default, rename = "valid_neighbors_NS")]
    pub valid_neighbors_ns: Option<Vec<RawNeighbor>>,

    /// West/East list for the `axis` scheme
    #[serde(default, rename = "valid_neighbors_WE")]
    pub valid_neighbors_we: Option<Vec<RawNeighbor>>,

    /// North/West list for the `bend` scheme
    #[serde(default, rename = "valid_neighbors_NW")]
    pub valid_neighbors_nw: Option<Vec<RawNeighbor>>,

    /// South/East list for the `bend` scheme
    #[serde(default, rename = "valid_neighbors_SE")]
    pub valid_neighbors_se: Option<Vec<RawNeighbor>>,

    /// North/East list for the `anti_bend` scheme
    #[serde(default, rename = "valid_neighbors_NE")]
    pub valid_neighbors_ne: Option<Vec<RawNeighbor>>,

    /// South/West list for the `anti_bend` scheme
    #[serde(default, rename = "valid_neighbors_SW")]
    pub valid_neighbors_sw: Option<Vec<RawNeighbor>>,

    /// North list for the `sided` scheme
    #[serde(default, rename = "valid_neighbors_N")]
    pub valid_neighbors_n: Option<Vec<RawNeighbor>>,

    /// East list for the `sided` scheme
    #[serde(default, rename = "valid_neighbors_E")]
    pub valid_neighbors_e: Option<Vec<RawNeighbor>>,

    /// South list for the `sided` scheme
    #[serde(default, rename = "valid_neighbors_S")]
    pub valid_neighbors_s: Option<Vec<RawNeighbor>>,

    /// West list for the `sided` scheme
    #[serde(default, rename = "valid_neighbors_W")]
    pub valid_neighbors_w: Option<Vec<RawNeighbor>>,

    /// Facing-direction list for the `front_*` schemes
    #[serde(default)]
    pub valid_neighbors_front: Option<Vec<RawNeighbor>>,

    /// Shared list for the three non-facing directions of `front_*`
    #[serde(default)]
    pub valid_neighbors_sides: Option<Vec<RawNeighbor>>,
}

impl RawTileRule {
    /// All neighbor list fields paired with their file key names
    ///
    /// Order matches the per-scheme key lists used during validation, so a
    /// scheme can pick out its required lists positionally.
    pub fn list_fields(&self) -> [(&'static str, Option<&Vec<RawNeighbor>>); 13] {
        [
            ("valid_neighbors", self.valid_neighbors.as_ref()),
            ("valid_neighbors_NS", self.valid_neighbors_ns.as_ref()),
            ("valid_neighbors_WE", self.valid_neighbors_we.as_ref()),
            ("valid_neighbors_NW", self.valid_neighbors_nw.as_ref()),
            ("valid_neighbors_SE", self.valid_neighbors_se.as_ref()),
            ("valid_neighbors_NE", self.valid_neighbors_ne.as_ref()),
            ("valid_neighbors_SW", self.valid_neighbors_sw.as_ref()),
            ("valid_neighbors_N", self.valid_neighbors_n.as_ref()),
            ("valid_neighbors_E", self.valid_neighbors_e.as_ref()),
            ("valid_neighbors_S", self.valid_neighbors_s.as_ref()),
            ("valid_neighbors_W", self.valid_neighbors_w.as_ref()),
            ("valid_neighbors_front", self.valid_neighbors_front.as_ref()),
            ("valid_neighbors_sides", self.valid_neighbors_sides.as_ref()),
        ]
    }
}

/// Parse a rule file from disk
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON for
/// the rule file schema.
pub fn parse_rule_file(path: &Path) -> Result<RawRuleFile> {
    let contents = fs::read_to_string(path).map_err(|source| GenerationError::RuleFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rule_str(&contents, path)
}

/// Parse rule file contents already held in memory
///
/// # Errors
///
/// Returns an error if the contents are not valid JSON for the rule file
/// schema. `origin` names the source in error messages.
pub fn parse_rule_str(contents: &str, origin: &Path) -> Result<RawRuleFile> {
    serde_json::from_str(contents).map_err(|source| GenerationError::RuleFileParse {
        path: origin.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::parse_rule_str;
    use crate::io::error::GenerationError;
    use std::path::Path;

    #[test]
    fn test_parses_minimal_rule_object() {
        let raw = parse_rule_str(
            r#"{
                "grass": {
                    "directionality": "none",
                    "valid_neighbors": [{"tile": "grass", "weight": 3}],
                    "sprite": "grass.png",
                    "rotation": 0
                }
            }"#,
            Path::new("<test>"),
        )
        .unwrap();

        let grass = raw.get("grass").unwrap();
        assert_eq!(grass.directionality, "none");
        assert_eq!(grass.sprite, "grass.png");
        let list = grass.valid_neighbors.as_ref().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.first().map(|n| n.weight), Some(3));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let result = parse_rule_str(
            r#"{"grass": {"directionality": "none", "valid_neighbours": []}}"#,
            Path::new("<test>"),
        );
        assert!(matches!(
            result,
            Err(GenerationError::RuleFileParse { .. })
        ));
    }

    #[test]
    fn test_rejects_non_integer_weight() {
        let result = parse_rule_str(
            r#"{
                "grass": {
                    "directionality": "none",
                    "valid_neighbors": [{"tile": "grass", "weight": 1.5}]
                }
            }"#,
            Path::new("<test>"),
        );
        assert!(matches!(
            result,
            Err(GenerationError::RuleFileParse { .. })
        ));
    }
}
