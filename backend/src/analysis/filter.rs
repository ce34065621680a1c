use std::collections::BTreeSet;

use shared::Category;

/// Narrows the detected-condition set down to skin *problems*: skin-type
/// labels (Dry, Normal, Oily) describe the skin itself and are reported
/// separately by the classifier. Ids outside the enumeration carry no
/// display name and are skipped here. Output follows ascending id order.
pub fn skin_problems(detected: &BTreeSet<u32>) -> Vec<Category> {
    detected
        .iter()
        .filter_map(|&id| Category::from_id(id))
        .filter(|category| !category.is_skin_type())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[u32]) -> BTreeSet<u32> {
        ids.iter().copied().collect()
    }

    #[test]
    fn excludes_exactly_the_skin_types() {
        let detected = set(&[0, 3, 4, 5, 8]);
        assert_eq!(
            skin_problems(&detected),
            vec![Category::Acne, Category::Wrinkles]
        );
    }

    #[test]
    fn identity_when_no_skin_type_present() {
        let detected = set(&[1, 2, 6, 7]);
        assert_eq!(
            skin_problems(&detected),
            vec![
                Category::DarkCircle,
                Category::DarkSpot,
                Category::Pores,
                Category::SkinRedness,
            ]
        );
    }

    #[test]
    fn acne_plus_oily_reports_only_acne() {
        assert_eq!(skin_problems(&set(&[0, 5])), vec![Category::Acne]);
    }

    #[test]
    fn empty_and_unknown_ids_yield_nothing() {
        assert!(skin_problems(&set(&[])).is_empty());
        assert!(skin_problems(&set(&[42])).is_empty());
    }
}
