//! Error types for rule loading, generation, and board export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
///
/// Only `Contradiction` is recoverable, and only at the generation
/// controller's restart boundary; every other variant stops the program.
#[derive(Debug)]
pub enum GenerationError {
    /// Failed to read the rule table file from disk
    RuleFileRead {
        /// Path to the rule table file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Rule table contents are not valid JSON for the expected schema
    RuleFileParse {
        /// Source of the contents being parsed
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// A tile type declares a directionality scheme the resolver does not recognize
    UnknownScheme {
        /// Name of the offending tile type
        tile: String,
        /// The unrecognized scheme value
        scheme: String,
    },

    /// A tile type's rule data violates a structural invariant
    InvalidTileRule {
        /// Name of the offending tile type
        tile: String,
        /// Explanation of the violation
        reason: String,
    },

    /// The rule table declares no tile types at all
    EmptyRuleTable,

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A cell's candidate set is empty given its resolved neighbors
    ///
    /// Recoverable: the controller discards the board and starts over.
    Contradiction {
        /// Board position of the unsatisfiable cell
        position: [i32; 2],
    },

    /// Generation was cancelled by an external abort request
    Aborted,

    /// Failed to load a sprite image for board rendering
    SpriteLoad {
        /// Path to the sprite file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the rendered board to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RuleFileRead { path, source } => {
                write!(f, "Failed to read rule table '{}': {source}", path.display())
            }
            Self::RuleFileParse { path, source } => {
                write!(
                    f,
                    "Failed to parse rule table '{}': {source}",
                    path.display()
                )
            }
            Self::UnknownScheme { tile, scheme } => {
                write!(
                    f,
                    "Tile type '{tile}' declares unknown directionality scheme '{scheme}'"
                )
            }
            Self::InvalidTileRule { tile, reason } => {
                write!(f, "Invalid rule for tile type '{tile}': {reason}")
            }
            Self::EmptyRuleTable => {
                write!(f, "Rule table declares no tile types")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Contradiction { position } => {
                write!(
                    f,
                    "No admissible tile type remains at ({}, {})",
                    position[0], position[1]
                )
            }
            Self::Aborted => {
                write!(f, "Generation aborted before completion")
            }
            Self::SpriteLoad { path, source } => {
                write!(f, "Failed to load sprite '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export board image to '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RuleFileRead { source, .. } => Some(source),
            Self::RuleFileParse { source, .. } => Some(source),
            Self::SpriteLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
