use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub version: f32,
    pub models: ModelsConfig,
    pub overlay: OverlayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub skin_type: ClassifierConfig,
    pub skin_problem: SegmenterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub path: String,
    /// Input size as [width, height].
    pub input_size: Vec<u32>,
    /// Class labels in the model's output order.
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    pub path: String,
    pub input_size: Vec<u32>,
    pub confidence_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    pub base_weight: f32,
    pub mask_weight: f32,
}

impl AnalysisConfig {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            format!("{}/../config/analysis.yaml", manifest_dir)
        } else {
            "/usr/src/app/config/analysis.yaml".to_string()
        };
        let config_str = std::fs::read_to_string(config_path)?;
        let config: AnalysisConfig = serde_yaml::from_str(&config_str)?;
        Ok(config)
    }

}

pub fn size_pair(size: &[u32]) -> (u32, u32) {
    match size {
        [width, height, ..] => (*width, *height),
        [side] => (*side, *side),
        [] => (224, 224),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_pair_accepts_one_or_two_entries() {
        assert_eq!(size_pair(&[640, 480]), (640, 480));
        assert_eq!(size_pair(&[256]), (256, 256));
        assert_eq!(size_pair(&[]), (224, 224));
    }

    #[test]
    fn config_deserializes_from_yaml() {
        let yaml = r#"
version: 1.0
models:
  skin_type:
    path: a.pt
    input_size: [224, 224]
    labels: ["Dry Skin", "Normal Skin", "Oily Skin"]
  skin_problem:
    path: b.pt
    input_size: [640, 640]
    confidence_threshold: 0.25
overlay:
  base_weight: 0.7
  mask_weight: 0.3
"#;
        let config: AnalysisConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(size_pair(&config.models.skin_type.input_size), (224, 224));
        assert_eq!(config.models.skin_type.labels.len(), 3);
        assert!((config.overlay.mask_weight - 0.3).abs() < f32::EPSILON);
    }
}
