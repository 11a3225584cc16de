//! Pixel dimension checks based on the decoded image header.

use std::io::{BufRead, Seek};

use image::{ImageError, ImageReader};

/// Width and height of a decoded image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Inclusive upper bounds for accepted images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionLimits {
    /// Maximum width in pixels.
    pub max_width: u32,
    /// Maximum height in pixels.
    pub max_height: u32,
}

impl DimensionLimits {
    /// Default bound for both axes.
    pub const DEFAULT_MAX: u32 = 1024;

    /// Create limits from explicit bounds.
    #[must_use]
    pub const fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Whether `dimensions` fit inside the bounds. Equal is accepted.
    #[must_use]
    pub const fn allows(&self, dimensions: ImageDimensions) -> bool {
        dimensions.width <= self.max_width && dimensions.height <= self.max_height
    }
}

impl Default for DimensionLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX, Self::DEFAULT_MAX)
    }
}

/// Read the dimensions of an image by decoding only its header.
///
/// The reader is consumed; it is dropped on every return path, including
/// a failed decode.
///
/// # Errors
///
/// Returns an error if the format cannot be recognised or the header cannot
/// be decoded.
pub fn read_dimensions<R: BufRead + Seek>(reader: R) -> Result<ImageDimensions, ImageError> {
    let (width, height) = ImageReader::new(reader)
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .into_dimensions()?;

    Ok(ImageDimensions { width, height })
}

/// Check an image against `limits`.
///
/// A decode failure is reported as an error, never as `true` or `false`.
///
/// # Errors
///
/// Returns an error if the reader does not hold a decodable image.
pub fn is_within_dimensions<R: BufRead + Seek>(
    reader: R,
    limits: DimensionLimits,
) -> Result<bool, ImageError> {
    read_dimensions(reader).map(|dimensions| limits.allows(dimensions))
}

#[cfg(test)]
pub(crate) mod test_images {
    use std::io::Cursor;

    use image::{ImageBuffer, ImageFormat, Luma};

    /// Encode a blank grayscale image of the given size.
    pub(crate) fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let buffer: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::new(width, height);
        let mut out = Cursor::new(Vec::new());
        buffer
            .write_to(&mut out, format)
            .expect("encoding a blank image should succeed");
        out.into_inner()
    }

    pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
        encode(width, height, ImageFormat::Png)
    }
}
