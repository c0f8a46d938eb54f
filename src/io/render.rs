//! Sprite compositing for rendered board output
//!
//! The renderer is the only consumer of the rule table's presentation
//! metadata. Each tile type's sprite is loaded once, rotated by its
//! declared quarter turns, and blitted at a fixed pixel pitch. Unresolved
//! cells (only possible when rendering a partial board) stay black.

use std::path::Path;

use image::{RgbaImage, imageops};

use crate::io::configuration::SPRITE_PITCH;
use crate::io::error::{GenerationError, Result};
use crate::rules::RuleTable;
use crate::rules::table::SpriteRef;
use crate::spatial::Grid;

/// Composite the board into a PNG at `output`
///
/// # Errors
///
/// Returns an error if a sprite cannot be loaded or the output image
/// cannot be written.
pub fn export_board_png(
    grid: &Grid,
    rules: &RuleTable,
    sprite_dir: &Path,
    output: &Path,
) -> Result<()> {
    let sprites = load_sprite_set(rules, sprite_dir)?;

    let width = grid.width() as u32 * SPRITE_PITCH;
    let height = grid.height() as u32 * SPRITE_PITCH;
    let mut canvas = RgbaImage::new(width, height);

    for position in grid.positions() {
        let Some(tile) = grid.get(position[0], position[1]) else {
            continue;
        };
        if let Some(sprite) = sprites.get(tile.index()) {
            let pixel_x = i64::from(position[0]) * i64::from(SPRITE_PITCH);
            let pixel_y = i64::from(position[1]) * i64::from(SPRITE_PITCH);
            imageops::overlay(&mut canvas, sprite, pixel_x, pixel_y);
        }
    }

    canvas
        .save(output)
        .map_err(|source| GenerationError::ImageExport {
            path: output.to_path_buf(),
            source,
        })
}

/// Load and orient every tile type's sprite, indexed by tile id
fn load_sprite_set(rules: &RuleTable, sprite_dir: &Path) -> Result<Vec<RgbaImage>> {
    let mut sprites = Vec::with_capacity(rules.len());
    for (_, sprite_ref) in rules.sprites() {
        sprites.push(load_sprite(sprite_dir, sprite_ref)?);
    }
    Ok(sprites)
}

/// Load one sprite and apply its declared rotation
fn load_sprite(sprite_dir: &Path, sprite_ref: &SpriteRef) -> Result<RgbaImage> {
    let path = sprite_dir.join(&sprite_ref.name);
    let sprite = image::open(&path)
        .map_err(|source| GenerationError::SpriteLoad { path, source })?
        .to_rgba8();
    Ok(rotate_sprite(sprite, sprite_ref.rotation))
}

/// Rotate a sprite by counterclockwise quarter turns
fn rotate_sprite(sprite: RgbaImage, steps: u8) -> RgbaImage {
    match steps % 4 {
        1 => imageops::rotate270(&sprite),
        2 => imageops::rotate180(&sprite),
        3 => imageops::rotate90(&sprite),
        _ => sprite,
    }
}
