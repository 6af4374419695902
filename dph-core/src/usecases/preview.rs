use super::{prelude::*, transform::*};

/// The number of locations shown by a preview.
pub const PREVIEW_SAMPLE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    /// The first transformed locations
    pub sample: Vec<Location>,
    /// The number of elements that could be transformed
    pub total: usize,
}

/// Transforms all elements without storing anything
/// and keeps the first `sample_size` results.
pub fn preview_locations(
    elements: &[Element],
    policy: &TransformPolicy,
    sample_size: usize,
) -> Preview {
    let mut locations = transform_elements(elements, policy);
    let total = locations.len();
    locations.truncate(sample_size);
    Preview {
        sample: locations,
        total,
    }
}
