//! Validated, immutable adjacency rule table
//!
//! Building a table from a parsed rule file interns tile names into dense
//! ids, fuses each tile's directionality scheme with exactly the neighbor
//! lists that scheme requires, and precomputes a (tile, direction, neighbor)
//! weight matrix so admissibility checks during generation are lookups.
//! All structural problems with the rule data are reported here, before the
//! first collapse; nothing in this module is retried.

use std::collections::BTreeMap;
use std::path::Path;

use ndarray::Array3;

use crate::io::error::{GenerationError, Result};
use crate::rules::direction::Direction;
use crate::rules::schema::{self, RawNeighbor, RawRuleFile, RawTileRule};

/// Dense identifier of a declared tile type
///
/// Ids are assigned in lexicographic name order, so the same rule set
/// always produces the same ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(usize);

impl TileId {
    /// Index into per-tile storage
    pub const fn index(self) -> usize {
        self.0
    }

    /// Rebuild an id from its dense index
    ///
    /// Only meaningful for indices handed out by the same table.
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// One admissible neighbor together with its selection weight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    /// The admissible tile type
    pub tile: TileId,
    /// Weight contributed when this entry constrains a collapse
    pub weight: u32,
}

/// Presentation metadata attached to a tile type
///
/// The core never interprets this beyond handing it to the renderer.
#[derive(Clone, Debug)]
pub struct SpriteRef {
    /// Sprite file name relative to the sprite directory
    pub name: String,
    /// Counterclockwise quarter turns applied when drawing (0-3)
    pub rotation: u8,
}

/// A tile type's directionality scheme fused with its neighbor lists
///
/// Each variant carries exactly the lists its scheme requires, so a
/// constructed rule cannot be missing a list or carry a stray one.
#[derive(Clone, Debug)]
pub enum AdjacencyRule {
    /// One list shared by all four directions
    Uniform {
        /// Admissible neighbors in every direction
        all: Vec<Neighbor>,
    },
    /// One list for North/South, another for West/East
    Axis {
        /// Admissible neighbors to the north and south
        north_south: Vec<Neighbor>,
        /// Admissible neighbors to the west and east
        west_east: Vec<Neighbor>,
    },
    /// Diagonal pairing: North/West share a list, South/East the other
    Bend {
        /// Admissible neighbors to the north and west
        north_west: Vec<Neighbor>,
        /// Admissible neighbors to the south and east
        south_east: Vec<Neighbor>,
    },
    /// Diagonal pairing: North/East share a list, South/West the other
    AntiBend {
        /// Admissible neighbors to the north and east
        north_east: Vec<Neighbor>,
        /// Admissible neighbors to the south and west
        south_west: Vec<Neighbor>,
    },
    /// Four independent lists, one per cardinal direction
    Sided {
        /// Admissible neighbors to the north
        north: Vec<Neighbor>,
        /// Admissible neighbors to the east
        east: Vec<Neighbor>,
        /// Admissible neighbors to the south
        south: Vec<Neighbor>,
        /// Admissible neighbors to the west
        west: Vec<Neighbor>,
    },
    /// One list for the declared facing, one shared by the other three
    Front {
        /// The facing direction
        facing: Direction,
        /// Admissible neighbors in the facing direction
        front: Vec<Neighbor>,
        /// Admissible neighbors in the remaining directions
        sides: Vec<Neighbor>,
    },
}

impl AdjacencyRule {
    /// The admissible neighbor list toward `direction`
    pub fn neighbors_toward(&self, direction: Direction) -> &[Neighbor] {
        match self {
            Self::Uniform { all } => all,
            Self::Axis {
                north_south,
                west_east,
            } => match direction {
                Direction::North | Direction::South => north_south,
                Direction::West | Direction::East => west_east,
            },
            Self::Bend {
                north_west,
                south_east,
            } => match direction {
                Direction::North | Direction::West => north_west,
                Direction::South | Direction::East => south_east,
            },
            Self::AntiBend {
                north_east,
                south_west,
            } => match direction {
                Direction::North | Direction::East => north_east,
                Direction::South | Direction::West => south_west,
            },
            Self::Sided {
                north,
                east,
                south,
                west,
            } => match direction {
                Direction::North => north,
                Direction::East => east,
                Direction::South => south,
                Direction::West => west,
            },
            Self::Front {
                facing,
                front,
                sides,
            } => {
                if direction == *facing {
                    front
                } else {
                    sides
                }
            }
        }
    }
}

/// Immutable adjacency and weight data for every declared tile type
///
/// Loaded once and shared read-only across generation attempts.
#[derive(Clone, Debug)]
pub struct RuleTable {
    names: Vec<String>,
    rules: Vec<AdjacencyRule>,
    sprites: Vec<SpriteRef>,
    /// `[tile, direction, neighbor]` -> weight; zero means not admissible
    outward: Array3<u32>,
}

impl RuleTable {
    /// Load and validate a rule table from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON for
    /// the schema, or fails structural validation.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = schema::parse_rule_file(path)?;
        Self::build(&raw)
    }

    /// Validate a rule table from JSON held in memory
    ///
    /// # Errors
    ///
    /// Returns an error if the contents are not valid JSON for the schema
    /// or fail structural validation.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let raw = schema::parse_rule_str(contents, Path::new("<inline>"))?;
        Self::build(&raw)
    }

    /// Build a validated table from parsed raw data
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, a tile declares an unknown
    /// scheme, a scheme's list requirements are violated, a candidate names
    /// an undeclared tile, a weight is zero, or a rotation exceeds 3.
    pub fn build(raw: &RawRuleFile) -> Result<Self> {
        if raw.is_empty() {
            return Err(GenerationError::EmptyRuleTable);
        }

        let mut ids = BTreeMap::new();
        let mut names = Vec::with_capacity(raw.len());
        for (index, name) in raw.keys().enumerate() {
            ids.insert(name.as_str(), TileId(index));
            names.push(name.clone());
        }

        let mut rules = Vec::with_capacity(raw.len());
        let mut sprites = Vec::with_capacity(raw.len());
        for (name, raw_rule) in raw {
            if raw_rule.rotation > 3 {
                return Err(GenerationError::InvalidTileRule {
                    tile: name.clone(),
                    reason: format!(
                        "rotation {} is out of range (expected 0-3 quarter turns)",
                        raw_rule.rotation
                    ),
                });
            }
            rules.push(build_rule(name, raw_rule, &ids)?);
            sprites.push(SpriteRef {
                name: raw_rule.sprite.clone(),
                rotation: raw_rule.rotation,
            });
        }

        let count = names.len();
        let mut outward = Array3::zeros((count, 4, count));
        for (tile_index, rule) in rules.iter().enumerate() {
            for direction in Direction::ALL {
                for neighbor in rule.neighbors_toward(direction) {
                    let slot = [tile_index, direction.index(), neighbor.tile.index()];
                    if let Some(weight) = outward.get_mut(slot) {
                        *weight = neighbor.weight;
                    }
                }
            }
        }

        Ok(Self {
            names,
            rules,
            sprites,
            outward,
        })
    }

    /// Number of declared tile types
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table declares no tile types
    ///
    /// Always false for a successfully built table.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All declared tile ids in ascending order
    pub fn tile_ids(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.len()).map(TileId)
    }

    /// Look up the id of a tile type by name
    pub fn id(&self, name: &str) -> Option<TileId> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(TileId)
    }

    /// The declared name of a tile type
    pub fn name(&self, tile: TileId) -> &str {
        self.names.get(tile.index()).map_or("", String::as_str)
    }

    /// Sprite metadata for every tile type, in id order
    pub fn sprites(&self) -> impl Iterator<Item = (TileId, &SpriteRef)> {
        self.sprites
            .iter()
            .enumerate()
            .map(|(index, sprite)| (TileId(index), sprite))
    }

    /// The scheme-fused adjacency rule of a tile type
    pub fn rule(&self, tile: TileId) -> Option<&AdjacencyRule> {
        self.rules.get(tile.index())
    }

    /// Every tile type that is admissible as `tile`'s neighbor toward `direction`
    ///
    /// An unset `tile` (unresolved or off-grid cell) acts as a wildcard:
    /// every declared tile type is returned with weight 1, imposing no real
    /// constraint. Otherwise the list is selected by the tile's scheme.
    pub fn admissible_neighbors(&self, tile: Option<TileId>, direction: Direction) -> Vec<Neighbor> {
        match tile {
            None => self
                .tile_ids()
                .map(|id| Neighbor {
                    tile: id,
                    weight: 1,
                })
                .collect(),
            Some(id) => self
                .rules
                .get(id.index())
                .map(|rule| rule.neighbors_toward(direction).to_vec())
                .unwrap_or_default(),
        }
    }

    /// Weight of `neighbor` in `tile`'s list toward `direction`, zero when inadmissible
    pub fn outward_weight(&self, tile: TileId, direction: Direction, neighbor: TileId) -> u32 {
        self.outward
            .get([tile.index(), direction.index(), neighbor.index()])
            .copied()
            .unwrap_or(0)
    }
}

/// Fuse one tile's declared scheme with its validated neighbor lists
fn build_rule(
    name: &str,
    raw_rule: &RawTileRule,
    ids: &BTreeMap<&str, TileId>,
) -> Result<AdjacencyRule> {
    let scheme = raw_rule.directionality.as_str();
    let rule = match scheme {
        "none" => {
            check_declared_lists(name, scheme, raw_rule, &["valid_neighbors"])?;
            AdjacencyRule::Uniform {
                all: convert_list(name, ids, raw_rule.valid_neighbors.as_deref())?,
            }
        }
        "axis" => {
            check_declared_lists(
                name,
                scheme,
                raw_rule,
                &["valid_neighbors_NS", "valid_neighbors_WE"],
            )?;
            AdjacencyRule::Axis {
                north_south: convert_list(name, ids, raw_rule.valid_neighbors_ns.as_deref())?,
                west_east: convert_list(name, ids, raw_rule.valid_neighbors_we.as_deref())?,
            }
        }
        "bend" => {
            check_declared_lists(
                name,
                scheme,
                raw_rule,
                &["valid_neighbors_NW", "valid_neighbors_SE"],
            )?;
            AdjacencyRule::Bend {
                north_west: convert_list(name, ids, raw_rule.valid_neighbors_nw.as_deref())?,
                south_east: convert_list(name, ids, raw_rule.valid_neighbors_se.as_deref())?,
            }
        }
        "anti_bend" => {
            check_declared_lists(
                name,
                scheme,
                raw_rule,
                &["valid_neighbors_NE", "valid_neighbors_SW"],
            )?;
            AdjacencyRule::AntiBend {
                north_east: convert_list(name, ids, raw_rule.valid_neighbors_ne.as_deref())?,
                south_west: convert_list(name, ids, raw_rule.valid_neighbors_sw.as_deref())?,
            }
        }
        "sided" => {
            check_declared_lists(
                name,
                scheme,
                raw_rule,
                &[
                    "valid_neighbors_N",
                    "valid_neighbors_E",
                    "valid_neighbors_S",
                    "valid_neighbors_W",
                ],
            )?;
            AdjacencyRule::Sided {
                north: convert_list(name, ids, raw_rule.valid_neighbors_n.as_deref())?,
                east: convert_list(name, ids, raw_rule.valid_neighbors_e.as_deref())?,
                south: convert_list(name, ids, raw_rule.valid_neighbors_s.as_deref())?,
                west: convert_list(name, ids, raw_rule.valid_neighbors_w.as_deref())?,
            }
        }
        "front_N" | "front_E" | "front_S" | "front_W" => {
            check_declared_lists(
                name,
                scheme,
                raw_rule,
                &["valid_neighbors_front", "valid_neighbors_sides"],
            )?;
            let facing = match scheme {
                "front_N" => Direction::North,
                "front_E" => Direction::East,
                "front_S" => Direction::South,
                _ => Direction::West,
            };
            AdjacencyRule::Front {
                facing,
                front: convert_list(name, ids, raw_rule.valid_neighbors_front.as_deref())?,
                sides: convert_list(name, ids, raw_rule.valid_neighbors_sides.as_deref())?,
            }
        }
        _ => {
            return Err(GenerationError::UnknownScheme {
                tile: name.to_string(),
                scheme: scheme.to_string(),
            });
        }
    };

    Ok(rule)
}

/// Enforce that a tile declares exactly the lists its scheme requires
fn check_declared_lists(
    name: &str,
    scheme: &str,
    raw_rule: &RawTileRule,
    required: &[&'static str],
) -> Result<()> {
    for (key, value) in raw_rule.list_fields() {
        let is_required = required.contains(&key);
        if is_required && value.is_none() {
            return Err(GenerationError::InvalidTileRule {
                tile: name.to_string(),
                reason: format!("scheme '{scheme}' requires list '{key}'"),
            });
        }
        if !is_required && value.is_some() {
            return Err(GenerationError::InvalidTileRule {
                tile: name.to_string(),
                reason: format!("list '{key}' is not used by scheme '{scheme}'"),
            });
        }
    }
    Ok(())
}

/// Resolve a raw neighbor list against the interned tile names
///
/// Enforces the closed rule graph (every candidate must be declared) and
/// strictly positive weights.
fn convert_list(
    name: &str,
    ids: &BTreeMap<&str, TileId>,
    entries: Option<&[RawNeighbor]>,
) -> Result<Vec<Neighbor>> {
    let entries = entries.unwrap_or_default();
    let mut neighbors = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.weight == 0 {
            return Err(GenerationError::InvalidTileRule {
                tile: name.to_string(),
                reason: format!("candidate '{}' has zero weight", entry.tile),
            });
        }
        let Some(&tile) = ids.get(entry.tile.as_str()) else {
            return Err(GenerationError::InvalidTileRule {
                tile: name.to_string(),
                reason: format!("candidate '{}' is not a declared tile type", entry.tile),
            });
        };
        neighbors.push(Neighbor {
            tile,
            weight: entry.weight,
        });
    }
    Ok(neighbors)
}

#[cfg(test)]
mod tests {
    use super::RuleTable;
    use crate::io::error::GenerationError;
    use crate::rules::direction::Direction;

    fn table(json: &str) -> RuleTable {
        RuleTable::from_json_str(json).unwrap()
    }

    fn names(table: &RuleTable, tile: &str, direction: Direction) -> Vec<String> {
        let id = table.id(tile).unwrap();
        table
            .admissible_neighbors(Some(id), direction)
            .iter()
            .map(|neighbor| table.name(neighbor.tile).to_string())
            .collect()
    }

    #[test]
    fn test_none_scheme_ignores_direction() {
        let table = table(
            r#"{
                "grass": {
                    "directionality": "none",
                    "valid_neighbors": [{"tile": "grass", "weight": 2}]
                }
            }"#,
        );
        for direction in Direction::ALL {
            assert_eq!(names(&table, "grass", direction), vec!["grass"]);
        }
    }

    #[test]
    fn test_axis_scheme_splits_by_axis() {
        let table = table(
            r#"{
                "a": {
                    "directionality": "none",
                    "valid_neighbors": [{"tile": "road", "weight": 1}]
                },
                "b": {
                    "directionality": "none",
                    "valid_neighbors": [{"tile": "road", "weight": 1}]
                },
                "road": {
                    "directionality": "axis",
                    "valid_neighbors_NS": [{"tile": "a", "weight": 1}],
                    "valid_neighbors_WE": [{"tile": "b", "weight": 1}]
                }
            }"#,
        );
        assert_eq!(names(&table, "road", Direction::North), vec!["a"]);
        assert_eq!(names(&table, "road", Direction::South), vec!["a"]);
        assert_eq!(names(&table, "road", Direction::East), vec!["b"]);
        assert_eq!(names(&table, "road", Direction::West), vec!["b"]);
    }

    #[test]
    fn test_bend_and_anti_bend_pair_diagonally() {
        let table = table(
            r#"{
                "a": {"directionality": "none", "valid_neighbors": []},
                "b": {"directionality": "none", "valid_neighbors": []},
                "corner": {
                    "directionality": "bend",
                    "valid_neighbors_NW": [{"tile": "a", "weight": 1}],
                    "valid_neighbors_SE": [{"tile": "b", "weight": 1}]
                },
                "anti": {
                    "directionality": "anti_bend",
                    "valid_neighbors_NE": [{"tile": "a", "weight": 1}],
                    "valid_neighbors_SW": [{"tile": "b", "weight": 1}]
                }
            }"#,
        );
        assert_eq!(names(&table, "corner", Direction::North), vec!["a"]);
        assert_eq!(names(&table, "corner", Direction::West), vec!["a"]);
        assert_eq!(names(&table, "corner", Direction::South), vec!["b"]);
        assert_eq!(names(&table, "corner", Direction::East), vec!["b"]);
        assert_eq!(names(&table, "anti", Direction::North), vec!["a"]);
        assert_eq!(names(&table, "anti", Direction::East), vec!["a"]);
        assert_eq!(names(&table, "anti", Direction::South), vec!["b"]);
        assert_eq!(names(&table, "anti", Direction::West), vec!["b"]);
    }

    #[test]
    fn test_sided_scheme_keeps_four_independent_lists() {
        let table = table(
            r#"{
                "n": {"directionality": "none", "valid_neighbors": []},
                "e": {"directionality": "none", "valid_neighbors": []},
                "s": {"directionality": "none", "valid_neighbors": []},
                "w": {"directionality": "none", "valid_neighbors": []},
                "hub": {
                    "directionality": "sided",
                    "valid_neighbors_N": [{"tile": "n", "weight": 1}],
                    "valid_neighbors_E": [{"tile": "e", "weight": 1}],
                    "valid_neighbors_S": [{"tile": "s", "weight": 1}],
                    "valid_neighbors_W": [{"tile": "w", "weight": 1}]
                }
            }"#,
        );
        assert_eq!(names(&table, "hub", Direction::North), vec!["n"]);
        assert_eq!(names(&table, "hub", Direction::East), vec!["e"]);
        assert_eq!(names(&table, "hub", Direction::South), vec!["s"]);
        assert_eq!(names(&table, "hub", Direction::West), vec!["w"]);
    }

    #[test]
    fn test_front_scheme_separates_facing_from_sides() {
        let table = table(
            r#"{
                "door": {"directionality": "none", "valid_neighbors": []},
                "wall": {"directionality": "none", "valid_neighbors": []},
                "gate": {
                    "directionality": "front_E",
                    "valid_neighbors_front": [{"tile": "door", "weight": 1}],
                    "valid_neighbors_sides": [{"tile": "wall", "weight": 1}]
                }
            }"#,
        );
        assert_eq!(names(&table, "gate", Direction::East), vec!["door"]);
        assert_eq!(names(&table, "gate", Direction::North), vec!["wall"]);
        assert_eq!(names(&table, "gate", Direction::South), vec!["wall"]);
        assert_eq!(names(&table, "gate", Direction::West), vec!["wall"]);
    }

    #[test]
    fn test_unset_tile_is_a_wildcard() {
        let table = table(
            r#"{
                "a": {"directionality": "none", "valid_neighbors": []},
                "b": {"directionality": "none", "valid_neighbors": []}
            }"#,
        );
        for direction in Direction::ALL {
            let wildcard = table.admissible_neighbors(None, direction);
            assert_eq!(wildcard.len(), table.len());
            assert!(wildcard.iter().all(|neighbor| neighbor.weight == 1));
        }
    }

    #[test]
    fn test_outward_weight_reflects_declared_lists() {
        let table = table(
            r#"{
                "a": {
                    "directionality": "none",
                    "valid_neighbors": [{"tile": "b", "weight": 7}]
                },
                "b": {"directionality": "none", "valid_neighbors": []}
            }"#,
        );
        let a = table.id("a").unwrap();
        let b = table.id("b").unwrap();
        assert_eq!(table.outward_weight(a, Direction::East, b), 7);
        assert_eq!(table.outward_weight(a, Direction::East, a), 0);
        assert_eq!(table.outward_weight(b, Direction::West, a), 0);
    }

    #[test]
    fn test_unknown_scheme_is_fatal() {
        let result = RuleTable::from_json_str(
            r#"{"a": {"directionality": "diagonal", "valid_neighbors": []}}"#,
        );
        assert!(matches!(
            result,
            Err(GenerationError::UnknownScheme { tile, scheme })
                if tile == "a" && scheme == "diagonal"
        ));
    }

    #[test]
    fn test_missing_required_list_is_rejected() {
        let result = RuleTable::from_json_str(
            r#"{"a": {"directionality": "axis", "valid_neighbors_NS": []}}"#,
        );
        assert!(matches!(
            result,
            Err(GenerationError::InvalidTileRule { tile, .. }) if tile == "a"
        ));
    }

    #[test]
    fn test_extra_list_is_rejected() {
        let result = RuleTable::from_json_str(
            r#"{
                "a": {
                    "directionality": "none",
                    "valid_neighbors": [],
                    "valid_neighbors_NS": []
                }
            }"#,
        );
        assert!(matches!(
            result,
            Err(GenerationError::InvalidTileRule { tile, .. }) if tile == "a"
        ));
    }

    #[test]
    fn test_undeclared_candidate_is_rejected() {
        let result = RuleTable::from_json_str(
            r#"{
                "a": {
                    "directionality": "none",
                    "valid_neighbors": [{"tile": "ghost", "weight": 1}]
                }
            }"#,
        );
        assert!(matches!(
            result,
            Err(GenerationError::InvalidTileRule { reason, .. }) if reason.contains("ghost")
        ));
    }

    #[test]
    fn test_zero_weight_is_rejected() {
        let result = RuleTable::from_json_str(
            r#"{
                "a": {
                    "directionality": "none",
                    "valid_neighbors": [{"tile": "a", "weight": 0}]
                }
            }"#,
        );
        assert!(matches!(
            result,
            Err(GenerationError::InvalidTileRule { reason, .. }) if reason.contains("weight")
        ));
    }

    #[test]
    fn test_rotation_out_of_range_is_rejected() {
        let result = RuleTable::from_json_str(
            r#"{
                "a": {
                    "directionality": "none",
                    "valid_neighbors": [],
                    "rotation": 4
                }
            }"#,
        );
        assert!(matches!(
            result,
            Err(GenerationError::InvalidTileRule { reason, .. }) if reason.contains("rotation")
        ));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(matches!(
            RuleTable::from_json_str("{}"),
            Err(GenerationError::EmptyRuleTable)
        ));
    }

    #[test]
    fn test_ids_are_assigned_in_name_order() {
        let table = table(
            r#"{
                "zebra": {"directionality": "none", "valid_neighbors": []},
                "apple": {"directionality": "none", "valid_neighbors": []}
            }"#,
        );
        assert!(table.id("apple").unwrap() < table.id("zebra").unwrap());
        assert_eq!(table.name(table.id("apple").unwrap()), "apple");
    }
}
