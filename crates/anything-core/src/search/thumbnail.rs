use crate::{FileCategory, ImageData, Result, extension_of};
use image::{GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Longest edge of a generated thumbnail, in pixels
pub const THUMBNAIL_SIZE: u32 = 256;

/// Decode an image file and return a PNG preview no larger than
/// [`THUMBNAIL_SIZE`] on either edge. Non-image paths and vector images
/// yield `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn generate(path: &Path) -> Result<Option<ImageData>> {
    let name = path.to_string_lossy();
    if !FileCategory::from_path(&name).is_image() || extension_of(&name) == ".svg" {
        return Ok(None);
    }

    let img = image::open(path)?;
    let (width, height) = img.dimensions();
    let img = if width > THUMBNAIL_SIZE || height > THUMBNAIL_SIZE {
        img.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE)
    } else {
        img
    };

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(Some(ImageData::png(img.width(), img.height(), bytes)))
}
