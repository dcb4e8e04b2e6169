use crate::core::catalog;
use crate::domain::model::{BoxTypeSpec, NOT_APPLICABLE};

/// Carrier divisor: cubic centimeters per volumetric kilogram.
pub const VOLUMETRIC_DIVISOR: u64 = 5000;

/// Volumetric weight in kilograms, always rounded up.
pub fn volumetric_weight(spec: &BoxTypeSpec) -> u32 {
    let volume = u64::from(spec.length) * u64::from(spec.width) * u64::from(spec.height);
    let kg = volume.div_ceil(VOLUMETRIC_DIVISOR);
    u32::try_from(kg).unwrap_or(u32::MAX)
}

/// Volumetric weight for a box type name; `None` when the type is not in the
/// catalog.
pub fn volumetric_weight_for(box_type: &str) -> Option<u32> {
    catalog::lookup(box_type).map(volumetric_weight)
}

pub fn volumetric_label(weight: Option<u32>) -> String {
    match weight {
        Some(kg) => format!("{} kg", kg),
        None => NOT_APPLICABLE.to_string(),
    }
}

pub fn declared_label(weight_kg: f64) -> String {
    format!("{:.1} kg", weight_kg)
}
