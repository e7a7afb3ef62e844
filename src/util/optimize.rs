use anyhow::{Context, Result};
use image::{
    ColorType, DynamicImage,
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops::FilterType,
};
use jpeg_encoder::Encoder as JpegEncoder;
use oxipng::Options;
use std::path::Path;

/// Output codec, decided by the file extension so a file keeps its format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("png") {
            Some(Self::Png)
        } else if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            Some(Self::Jpeg)
        } else {
            None
        }
    }
}

pub fn optimize_png(data: &[u8]) -> Result<Vec<u8>> {
    let options = Options::default();

    match oxipng::optimize_from_memory(data, &options) {
        Ok(optimized) => Ok(optimized),
        Err(err) => {
            log::debug!("oxipng could not optimize image, keeping plain encode: {err}");
            Ok(data.to_vec())
        }
    }
}

/// Size an image should be scaled to so it is at most `max_width` wide, or
/// `None` if it already fits.
///
/// The height keeps the aspect ratio and is floored, but never reaches zero.
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> Option<(u32, u32)> {
    if width <= max_width {
        return None;
    }

    let new_height = u64::from(height) * u64::from(max_width) / u64::from(width);
    let new_height = u32::try_from(new_height).unwrap_or(u32::MAX).max(1);

    Some((max_width, new_height))
}

pub fn downscale(image: DynamicImage, max_width: u32) -> DynamicImage {
    match target_dimensions(image.width(), image.height(), max_width) {
        Some((width, height)) => {
            log::debug!(
                "Resizing {}x{} to {}x{}",
                image.width(),
                image.height(),
                width,
                height
            );
            image.resize_exact(width, height, FilterType::Lanczos3)
        }
        None => image,
    }
}

/// JPEG has no alpha or palette, and the encoder only takes 8-bit gray or RGB.
fn jpeg_compatible(image: DynamicImage) -> DynamicImage {
    match image.color() {
        ColorType::L8 | ColorType::Rgb8 => image,
        _ => DynamicImage::ImageRgb8(image.into_rgb8()),
    }
}

/// Baseline JPEG with optimized Huffman tables. The encoder's default
/// sampling keeps 4:2:0 chroma below quality 90.
fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let width = u16::try_from(image.width()).context("Image is too wide for JPEG")?;
    let height = u16::try_from(image.height()).context("Image is too tall for JPEG")?;
    let color = match image.color() {
        ColorType::L8 => jpeg_encoder::ColorType::Luma,
        _ => jpeg_encoder::ColorType::Rgb,
    };

    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new(&mut buffer, quality);
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(image.as_bytes(), width, height, color)
        .context("Failed to encode JPEG")?;

    Ok(buffer)
}

pub fn encode(image: DynamicImage, kind: ImageKind, jpeg_quality: u8) -> Result<Vec<u8>> {
    match kind {
        ImageKind::Png => {
            let mut buffer = Vec::new();
            let encoder = PngEncoder::new_with_quality(
                &mut buffer,
                CompressionType::Best,
                PngFilterType::Adaptive,
            );
            image
                .write_with_encoder(encoder)
                .context("Failed to encode PNG")?;
            optimize_png(&buffer)
        }
        ImageKind::Jpeg => encode_jpeg(&jpeg_compatible(image), jpeg_quality),
    }
}
