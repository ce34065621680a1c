use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgb, RgbImage};

/// Weighted per-pixel blend of the source image and one category mask,
/// the segmented-view rendering behind each detected condition.
pub fn composite(
    base: &RgbImage,
    mask: &RgbImage,
    base_weight: f32,
    mask_weight: f32,
) -> RgbImage {
    let width = base.width().min(mask.width());
    let height = base.height().min(mask.height());

    RgbImage::from_fn(width, height, |x, y| {
        let b = base.get_pixel(x, y).0;
        let m = mask.get_pixel(x, y).0;
        let mut blended = [0u8; 3];
        for channel in 0..3 {
            let value = b[channel] as f32 * base_weight + m[channel] as f32 * mask_weight;
            blended[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
        Rgb(blended)
    })
}

/// PNG-encodes an overlay and wraps it in base64 for the JSON response.
pub fn to_png_base64(image: &RgbImage) -> Result<String, image::ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(STANDARD.encode(buffer.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_uses_the_given_weights() {
        let base = RgbImage::from_pixel(2, 2, Rgb([100, 100, 100]));
        let mask = RgbImage::from_pixel(2, 2, Rgb([0, 200, 0]));
        let blended = composite(&base, &mask, 0.7, 0.3);
        // 100*0.7 + 0*0.3 = 70; 100*0.7 + 200*0.3 = 130.
        assert_eq!(blended.get_pixel(0, 0).0, [70, 130, 70]);
    }

    #[test]
    fn zero_mask_weight_keeps_the_base_image() {
        let base = RgbImage::from_pixel(2, 2, Rgb([12, 34, 56]));
        let mask = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        let blended = composite(&base, &mask, 1.0, 0.0);
        assert_eq!(blended.get_pixel(1, 1).0, [12, 34, 56]);
    }

    #[test]
    fn encodes_to_nonempty_base64_png() {
        let image = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let encoded = to_png_base64(&image).unwrap();
        assert!(!encoded.is_empty());
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(&decoded[1..4], b"PNG");
    }
}
