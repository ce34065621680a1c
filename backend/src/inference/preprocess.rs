use image::RgbImage;
use image::imageops::{self, FilterType};
use tch::Tensor;

use crate::inference::model::InferenceError;

/// Resizes an RGB image to the model's input size and converts it into a
/// normalized NCHW float tensor in [0, 1].
pub fn to_input_tensor(
    image: &RgbImage,
    (width, height): (u32, u32),
) -> Result<Tensor, InferenceError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(InferenceError::Preprocessing(
            "uploaded image has zero dimensions".to_string(),
        ));
    }
    if width == 0 || height == 0 {
        return Err(InferenceError::Preprocessing(format!(
            "invalid model input size {}x{}",
            width, height
        )));
    }

    let resized = imageops::resize(image, width, height, FilterType::Triangle);
    let data: Vec<f32> = resized
        .pixels()
        .flat_map(|pixel| pixel.0)
        .map(|channel| channel as f32 / 255.0)
        .collect();

    let tensor = Tensor::from_slice(&data)
        .view([height as i64, width as i64, 3])
        .permute([2, 0, 1])
        .unsqueeze(0);
    Ok(tensor)
}
