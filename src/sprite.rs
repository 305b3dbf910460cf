/// The alien sprite: a procedurally drawn bitmap, or the dimensions of a
/// user-supplied image.  The simulation only ever needs the size.

use std::path::Path;

use image::{ImageFormat, ImageResult, Rgb, RgbImage};

use crate::entities::Size;
use crate::error::ConfigError;

pub const ALIEN_WIDTH: u32 = 20;
pub const ALIEN_HEIGHT: u32 = 20;

const BODY: Rgb<u8> = Rgb([0, 255, 0]);
const EYE: Rgb<u8> = Rgb([0, 0, 0]);

/// Green square with two black 4x4 eyes.
pub fn generate_alien() -> RgbImage {
    RgbImage::from_fn(ALIEN_WIDTH, ALIEN_HEIGHT, |x, y| {
        let eye_row = (3..=6).contains(&y);
        let left_eye = (3..=6).contains(&x);
        let right_eye = (13..=16).contains(&x);
        if eye_row && (left_eye || right_eye) {
            EYE
        } else {
            BODY
        }
    })
}

pub fn image_size(image: &RgbImage) -> Size {
    Size {
        width: image.width() as i32,
        height: image.height() as i32,
    }
}

/// Size of the sprite the game will lay its fleet out with: the file at
/// `path` when given, the generated sprite otherwise.
pub fn alien_size(path: Option<&Path>) -> Result<Size, ConfigError> {
    let Some(path) = path else {
        return Ok(image_size(&generate_alien()));
    };
    let (width, height) = image::image_dimensions(path).map_err(|e| ConfigError::Sprite {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let size = Size {
        width: i32::try_from(width).unwrap_or(i32::MAX),
        height: i32::try_from(height).unwrap_or(i32::MAX),
    };
    if size.width == 0 || size.height == 0 {
        return Err(ConfigError::Sprite {
            path: path.display().to_string(),
            message: format!("empty image ({width}x{height})"),
        });
    }
    Ok(size)
}

/// Write the generated sprite as a 24-bit BMP.
pub fn write_bmp(image: &RgbImage, path: impl AsRef<Path>) -> ImageResult<()> {
    image.save_with_format(path, ImageFormat::Bmp)
}
