use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// The nine skin labels the segmentation model can emit. Identifiers are
/// the model's class indices and must stay in sync with its label set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[repr(u32)]
pub enum Category {
    #[strum(serialize = "Acne")]
    Acne = 0,
    #[strum(serialize = "Dark Circle")]
    DarkCircle = 1,
    #[strum(serialize = "Dark Spot")]
    DarkSpot = 2,
    #[strum(serialize = "Dry Skin")]
    DrySkin = 3,
    #[strum(serialize = "Normal Skin")]
    NormalSkin = 4,
    #[strum(serialize = "Oily Skin")]
    OilySkin = 5,
    #[strum(serialize = "Pores")]
    Pores = 6,
    #[strum(serialize = "Skin Redness")]
    SkinRedness = 7,
    #[strum(serialize = "Wrinkles")]
    Wrinkles = 8,
}

/// Overlay color for detections whose class id falls outside the
/// enumeration. Such detections are kept, not rejected.
pub const FALLBACK_COLOR: [u8; 3] = [255, 255, 255];

impl Category {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Category::Acne),
            1 => Some(Category::DarkCircle),
            2 => Some(Category::DarkSpot),
            3 => Some(Category::DrySkin),
            4 => Some(Category::NormalSkin),
            5 => Some(Category::OilySkin),
            6 => Some(Category::Pores),
            7 => Some(Category::SkinRedness),
            8 => Some(Category::Wrinkles),
            _ => None,
        }
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    /// Display name, also the exact value of the product store's
    /// `Problem` attribute.
    pub fn display_name(self) -> &'static str {
        self.into()
    }

    pub fn color(self) -> [u8; 3] {
        match self {
            Category::Acne => [0, 0, 255],
            Category::DarkCircle => [128, 0, 128],
            Category::DarkSpot => [0, 0, 128],
            Category::DrySkin => [165, 42, 42],
            Category::NormalSkin => [0, 255, 0],
            Category::OilySkin => [255, 165, 0],
            Category::Pores => [255, 255, 0],
            Category::SkinRedness => [255, 0, 0],
            Category::Wrinkles => [192, 192, 192],
        }
    }

    /// Skin *types* as opposed to skin *problems*.
    pub fn is_skin_type(self) -> bool {
        matches!(
            self,
            Category::DrySkin | Category::NormalSkin | Category::OilySkin
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCard {
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub image_url: String,
    pub product_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayView {
    pub category_id: u32,
    pub label: String,
    /// Base64-encoded PNG of the source image blended with the mask.
    pub image_base64: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPageView {
    pub category_id: u32,
    pub items: Vec<ProductCard>,
    pub offset: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub session_id: String,
    pub skin_type: String,
    /// Distinct category ids present in the segmentation output,
    /// ascending.
    pub detected: Vec<u32>,
    /// Display names of detected conditions that are problems rather
    /// than skin types.
    pub skin_problems: Vec<String>,
    pub overlays: Vec<OverlayView>,
    pub panels: Vec<ProductPageView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageNav {
    Stay,
    Next,
    Prev,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPageRequest {
    pub session_id: String,
    pub category_id: u32,
    pub nav: PageNav,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ids_roundtrip_through_the_enumeration() {
        for category in Category::iter() {
            assert_eq!(Category::from_id(category.id()), Some(category));
        }
        assert_eq!(Category::iter().count(), 9);
        assert_eq!(Category::from_id(9), None);
    }

    #[test]
    fn display_names_match_the_store_labels() {
        assert_eq!(Category::Acne.display_name(), "Acne");
        assert_eq!(Category::DarkCircle.display_name(), "Dark Circle");
        assert_eq!(Category::SkinRedness.display_name(), "Skin Redness");
        assert_eq!(Category::OilySkin.to_string(), "Oily Skin");
    }

    #[test]
    fn skin_types_are_exactly_dry_normal_oily() {
        let types: Vec<Category> =
            Category::iter().filter(|c| c.is_skin_type()).collect();
        assert_eq!(
            types,
            vec![Category::DrySkin, Category::NormalSkin, Category::OilySkin]
        );
    }

    #[test]
    fn page_nav_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PageNav::Next).unwrap(), "\"next\"");
        assert_eq!(
            serde_json::from_str::<PageNav>("\"prev\"").unwrap(),
            PageNav::Prev
        );
    }
}
