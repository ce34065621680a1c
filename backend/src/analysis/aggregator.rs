use std::collections::{BTreeSet, HashMap};

use image::{Rgb, RgbImage};
use shared::{Category, FALLBACK_COLOR};
use strum::IntoEnumIterator;

use crate::analysis::geometry::Polygon;
use crate::inference::model::Detection;

/// Per-category overlay buffers plus the set of distinct category ids
/// seen in the segmentation output. The BTreeSet gives downstream
/// rendering a deterministic ascending-id order.
pub struct Aggregation {
    pub masks: HashMap<u32, RgbImage>,
    pub detected: BTreeSet<u32>,
}

/// Rasterizes each detection polygon into its category's buffer.
///
/// Every category in the enumeration gets a zeroed buffer up front, so
/// lookups never miss even when nothing was detected. Category ids the
/// enumeration doesn't know still get a buffer and the white fallback
/// color; detections are never dropped for an unrecognized id.
pub fn aggregate(detections: &[Detection], width: u32, height: u32) -> Aggregation {
    let mut masks: HashMap<u32, RgbImage> = Category::iter()
        .map(|category| (category.id(), RgbImage::new(width, height)))
        .collect();
    let mut detected = BTreeSet::new();

    for detection in detections {
        let color = Category::from_id(detection.category_id)
            .map(Category::color)
            .unwrap_or(FALLBACK_COLOR);
        let mask = masks
            .entry(detection.category_id)
            .or_insert_with(|| RgbImage::new(width, height));
        fill_polygon(mask, &detection.polygon, Rgb(color));
        detected.insert(detection.category_id);
    }

    Aggregation { masks, detected }
}

/// Scanline-free fill: walk the polygon's clipped bounding box and test
/// pixel centers with the even-odd rule.
fn fill_polygon(mask: &mut RgbImage, polygon: &Polygon, color: Rgb<u8>) {
    let Some((min, max)) = polygon.bounding_box() else {
        return;
    };

    let width = mask.width();
    let height = mask.height();
    if width == 0 || height == 0 {
        return;
    }

    let x0 = min.x.floor().clamp(0.0, (width - 1) as f32) as u32;
    let x1 = max.x.ceil().clamp(0.0, (width - 1) as f32) as u32;
    let y0 = min.y.floor().clamp(0.0, (height - 1) as f32) as u32;
    let y1 = max.y.ceil().clamp(0.0, (height - 1) as f32) as u32;

    for y in y0..=y1 {
        for x in x0..=x1 {
            if polygon.contains(x as f32 + 0.5, y as f32 + 0.5) {
                mask.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::geometry::Point;

    fn detection(category_id: u32, points: &[(f32, f32)]) -> Detection {
        Detection {
            category_id,
            confidence: 0.9,
            polygon: Polygon::from_points(
                points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            ),
        }
    }

    fn square(category_id: u32) -> Detection {
        detection(category_id, &[(1.0, 1.0), (6.0, 1.0), (6.0, 6.0), (1.0, 6.0)])
    }

    #[test]
    fn every_category_has_a_buffer_even_without_detections() {
        let aggregation = aggregate(&[], 8, 8);
        assert!(aggregation.detected.is_empty());
        assert_eq!(aggregation.masks.len(), 9);
        for mask in aggregation.masks.values() {
            assert_eq!((mask.width(), mask.height()), (8, 8));
            assert!(mask.pixels().all(|p| p.0 == [0, 0, 0]));
        }
    }

    #[test]
    fn detected_set_holds_distinct_ids_despite_duplicates() {
        let detections = vec![square(0), square(0), square(5)];
        let aggregation = aggregate(&detections, 8, 8);
        let detected: Vec<u32> = aggregation.detected.iter().copied().collect();
        assert_eq!(detected, vec![0, 5]);
    }

    #[test]
    fn polygons_fill_with_the_category_color() {
        let aggregation = aggregate(&[square(0)], 8, 8);
        let mask = &aggregation.masks[&0];
        assert_eq!(mask.get_pixel(3, 3).0, Category::Acne.color());
        // Outside the polygon stays zeroed.
        assert_eq!(mask.get_pixel(7, 7).0, [0, 0, 0]);
        // Other categories stay untouched.
        assert!(aggregation.masks[&5].pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn unknown_ids_fall_back_to_white_and_are_kept() {
        let aggregation = aggregate(&[square(42)], 8, 8);
        assert!(aggregation.detected.contains(&42));
        let mask = &aggregation.masks[&42];
        assert_eq!((mask.width(), mask.height()), (8, 8));
        assert_eq!(mask.get_pixel(3, 3).0, FALLBACK_COLOR);
    }

    #[test]
    fn polygons_past_the_image_edge_are_clipped() {
        let detections = vec![detection(
            2,
            &[(-4.0, -4.0), (20.0, -4.0), (20.0, 20.0), (-4.0, 20.0)],
        )];
        let aggregation = aggregate(&detections, 8, 8);
        let mask = &aggregation.masks[&2];
        assert_eq!((mask.width(), mask.height()), (8, 8));
        assert_eq!(mask.get_pixel(0, 0).0, Category::DarkSpot.color());
        assert_eq!(mask.get_pixel(7, 7).0, Category::DarkSpot.color());
    }
}
