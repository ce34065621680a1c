use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use image::RgbImage;
use tch::nn::ModuleT;
use tch::{CModule, Device, Kind};

use crate::analysis::geometry::{Point, Polygon};
use crate::inference::config::{ModelsConfig, size_pair};
use crate::inference::preprocess;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("preprocessing failed: {0}")]
    Preprocessing(String),
    #[error("model error: {0}")]
    Model(#[from] tch::TchError),
    #[error("malformed model output: {0}")]
    Output(String),
}

/// One instance from the segmentation model: a polygon outline in source
/// image coordinates and the class index it was assigned.
#[derive(Debug, Clone)]
pub struct Detection {
    pub category_id: u32,
    pub confidence: f32,
    pub polygon: Polygon,
}

/// The two pretrained TorchScript modules behind the analysis page: a
/// skin-type classifier and a skin-problem instance segmenter. Loaded once
/// at startup and injected into handlers via `web::Data`.
#[derive(Clone)]
pub struct SkinModels {
    classifier: Arc<Mutex<CModule>>,
    segmenter: Arc<Mutex<CModule>>,
    labels: Vec<String>,
    classifier_input: (u32, u32),
    segmenter_input: (u32, u32),
    confidence_threshold: f32,
}

impl SkinModels {
    pub fn load(config: &ModelsConfig) -> Result<Self, InferenceError> {
        let device = Device::cuda_if_available();
        let classifier = CModule::load_on_device(&config.skin_type.path, device)?;
        let segmenter = CModule::load_on_device(&config.skin_problem.path, device)?;

        Ok(Self {
            classifier: Arc::new(Mutex::new(classifier)),
            segmenter: Arc::new(Mutex::new(segmenter)),
            labels: config.skin_type.labels.clone(),
            classifier_input: size_pair(&config.skin_type.input_size),
            segmenter_input: size_pair(&config.skin_problem.input_size),
            confidence_threshold: config.skin_problem.confidence_threshold,
        })
    }

    /// Top-1 skin-type label for the uploaded image.
    pub fn classify(&self, image: &RgbImage) -> Result<String, InferenceError> {
        let tensor = preprocess::to_input_tensor(image, self.classifier_input)?;
        let output = self.classifier.lock().unwrap().forward_t(&tensor, false);
        let probs = output.softmax(-1, Kind::Float).view([-1]);

        let num_classes = probs.size()[0] as usize;
        let mut scores = vec![0.0f32; num_classes];
        probs.copy_data(&mut scores, num_classes);

        let top = scores
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(index, _)| index)
            .unwrap_or(0);

        self.labels.get(top).cloned().ok_or_else(|| {
            InferenceError::Output(format!("class index {} has no configured label", top))
        })
    }

    /// Runs the segmenter and decodes its output rows into detections.
    ///
    /// The traced module emits one row per instance, laid out as
    /// `[class_id, confidence, x0, y0, x1, y1, ...]` and padded with NaN;
    /// coordinates are relative to the model input and are scaled back to
    /// source image pixels here.
    pub fn segment(&self, image: &RgbImage) -> Result<Vec<Detection>, InferenceError> {
        let tensor = preprocess::to_input_tensor(image, self.segmenter_input)?;
        let output = self.segmenter.lock().unwrap().forward_t(&tensor, false);
        let output = output.to_kind(Kind::Float);

        let output = match output.size().len() {
            3 => output.squeeze_dim(0),
            2 => output,
            dims => {
                return Err(InferenceError::Output(format!(
                    "expected 2-d instance rows, got {}-d tensor",
                    dims
                )));
            }
        };

        let size = output.size();
        let (rows, row_len) = (size[0] as usize, size[1] as usize);
        if rows == 0 {
            return Ok(Vec::new());
        }

        let flat = output.contiguous().view([-1]);
        let mut data = vec![0.0f32; rows * row_len];
        flat.copy_data(&mut data, rows * row_len);

        let scale_x = image.width() as f32 / self.segmenter_input.0 as f32;
        let scale_y = image.height() as f32 / self.segmenter_input.1 as f32;

        Ok(data
            .chunks(row_len)
            .filter_map(|row| decode_row(row, self.confidence_threshold))
            .map(|mut detection| {
                detection.polygon.scale(scale_x, scale_y);
                detection
            })
            .collect())
    }
}

/// Decodes one instance row. Returns None for padding rows, instances
/// under the confidence threshold, and degenerate polygons.
fn decode_row(row: &[f32], threshold: f32) -> Option<Detection> {
    let (&class_id, rest) = row.split_first()?;
    let (&confidence, coords) = rest.split_first()?;

    if !class_id.is_finite() || class_id < 0.0 {
        return None;
    }
    if !confidence.is_finite() || confidence < threshold {
        return None;
    }

    let mut points = Vec::new();
    for pair in coords.chunks_exact(2) {
        if pair[0].is_nan() || pair[1].is_nan() {
            break;
        }
        points.push(Point::new(pair[0], pair[1]));
    }

    if points.len() < 3 {
        return None;
    }

    Some(Detection {
        category_id: class_id as u32,
        confidence,
        polygon: Polygon::from_points(points),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f32 = f32::NAN;

    #[test]
    fn decodes_a_triangle_row() {
        let row = [0.0, 0.9, 1.0, 1.0, 5.0, 1.0, 3.0, 4.0, NAN, NAN];
        let detection = decode_row(&row, 0.25).unwrap();
        assert_eq!(detection.category_id, 0);
        assert_eq!(detection.polygon.len(), 3);
        assert!((detection.confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn rejects_rows_under_the_threshold() {
        let row = [2.0, 0.1, 1.0, 1.0, 5.0, 1.0, 3.0, 4.0];
        assert!(decode_row(&row, 0.25).is_none());
    }

    #[test]
    fn rejects_padding_and_degenerate_rows() {
        assert!(decode_row(&[NAN, NAN, NAN, NAN], 0.25).is_none());
        // Two vertices cannot enclose an area.
        assert!(decode_row(&[1.0, 0.8, 0.0, 0.0, 4.0, 4.0], 0.25).is_none());
        assert!(decode_row(&[], 0.25).is_none());
    }

    #[test]
    fn nan_padding_truncates_the_polygon() {
        let row = [7.0, 0.5, 0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0, NAN, NAN, NAN, NAN];
        let detection = decode_row(&row, 0.25).unwrap();
        assert_eq!(detection.category_id, 7);
        assert_eq!(detection.polygon.len(), 4);
    }
}
