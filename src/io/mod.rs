//! Input/output operations
//!
//! This module contains everything that touches the world outside the
//! algorithm: command-line handling, runtime defaults, error types,
//! progress display, and rendering the finished board to an image.

/// Command-line interface and board generation driver
pub mod cli;
/// Runtime constants and configuration defaults
pub mod configuration;
/// Error types for all operations
pub mod error;
/// Progress display for board generation
pub mod progress;
/// Sprite compositing for rendered board output
pub mod render;
