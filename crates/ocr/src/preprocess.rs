use image::{DynamicImage, GrayImage, Luma};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// Contrast multiplier applied around mid-gray.
pub const CONTRAST: f32 = 1.5;
/// Luminance cut-off (0.0–1.0) for binarization.
pub const THRESHOLD: f32 = 0.5;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Two-tone grayscale image ready for text recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage(GrayImage);

impl NormalizedImage {
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn is_empty(&self) -> bool {
        self.0.width() == 0 || self.0.height() == 0
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.0
    }

    /// PNG encoding, for engines that take an encoded buffer.
    pub fn to_png(&self) -> Result<Vec<u8>, PreprocessError> {
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(self.0.clone())
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| PreprocessError::Encode(e.to_string()))?;
        Ok(buf)
    }
}

/// Load an image file and normalize it for OCR.
pub fn prepare_for_ocr(path: &Path) -> Result<NormalizedImage, PreprocessError> {
    let img = image::open(path)?;
    Ok(normalize(&img))
}

/// Decode raw image bytes (PNG / JPEG / WEBP / …) and normalize them.
pub fn prepare_for_ocr_from_bytes(data: &[u8]) -> Result<NormalizedImage, PreprocessError> {
    let img = image::load_from_memory(data)?;
    Ok(normalize(&img))
}

/// Grayscale → contrast boost → threshold.
///
/// An image without pixels has nothing to enhance and is passed through as
/// plain grayscale.
pub fn normalize(img: &DynamicImage) -> NormalizedImage {
    let gray = desaturate(img);
    if gray.width() == 0 || gray.height() == 0 {
        return NormalizedImage(gray);
    }
    NormalizedImage(binarize(&boost_contrast(&gray, CONTRAST), THRESHOLD))
}

fn desaturate(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

fn boost_contrast(gray: &GrayImage, factor: f32) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0] as f32 / 255.0;
        let boosted = ((v - 0.5) * factor + 0.5).clamp(0.0, 1.0);
        Luma([(boosted * 255.0).round() as u8])
    })
}

fn binarize(gray: &GrayImage, threshold: f32) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0] as f32 / 255.0;
        Luma([if v > threshold { 255 } else { 0 }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage};

    fn solid_gray(width: u32, height: u32, value: u8) -> DynamicImage {
        let img: GrayImage = ImageBuffer::from_fn(width, height, |_, _| Luma([value]));
        DynamicImage::ImageLuma8(img)
    }

    fn gradient_gray(width: u32, height: u32) -> DynamicImage {
        let img: GrayImage =
            ImageBuffer::from_fn(width, height, |x, _| Luma([(x * 255 / (width - 1)) as u8]));
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn output_is_two_tone() {
        let result = normalize(&gradient_gray(256, 2));
        assert!(result.as_gray().pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert_eq!((result.width(), result.height()), (256, 2));
    }

    #[test]
    fn gradient_splits_at_mid_gray() {
        let result = normalize(&gradient_gray(256, 1));
        let gray = result.as_gray();
        assert_eq!(gray.get_pixel(0, 0)[0], 0);
        assert_eq!(gray.get_pixel(127, 0)[0], 0);
        assert_eq!(gray.get_pixel(128, 0)[0], 255);
        assert_eq!(gray.get_pixel(255, 0)[0], 255);
    }

    #[test]
    fn colour_input_is_desaturated() {
        let img: RgbImage = ImageBuffer::from_fn(4, 1, |x, _| {
            if x < 2 { Rgb([250, 240, 230]) } else { Rgb([20, 10, 40]) }
        });
        let result = normalize(&DynamicImage::ImageRgb8(img));
        let gray = result.as_gray();
        assert_eq!(gray.get_pixel(0, 0)[0], 255);
        assert_eq!(gray.get_pixel(3, 0)[0], 0);
    }

    #[test]
    fn contrast_pushes_away_from_mid_gray() {
        let boosted = boost_contrast(&solid_gray(1, 1, 200).to_luma8(), CONTRAST);
        assert!(boosted.get_pixel(0, 0)[0] > 200);
        let boosted = boost_contrast(&solid_gray(1, 1, 60).to_luma8(), CONTRAST);
        assert!(boosted.get_pixel(0, 0)[0] < 60);
    }

    #[test]
    fn empty_image_passes_through() {
        let result = normalize(&DynamicImage::new_rgb8(0, 0));
        assert!(result.is_empty());
    }

    #[test]
    fn normalize_is_deterministic() {
        let img = gradient_gray(64, 8);
        assert_eq!(normalize(&img), normalize(&img));
    }

    #[test]
    fn to_png_produces_png_header() {
        let png = normalize(&solid_gray(4, 4, 100)).to_png().unwrap();
        // PNG magic bytes: 0x89 0x50 0x4E 0x47
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[test]
    fn prepare_from_bytes_rejects_garbage() {
        let err = prepare_for_ocr_from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, PreprocessError::Load(_)));
    }

    #[test]
    fn prepare_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.png");
        solid_gray(8, 8, 220).save(&path).unwrap();
        let result = prepare_for_ocr(&path).unwrap();
        assert_eq!((result.width(), result.height()), (8, 8));
        assert!(result.as_gray().pixels().all(|p| p[0] == 255));
    }
}
