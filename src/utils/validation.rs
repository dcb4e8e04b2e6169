use crate::utils::error::{PackingError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PackingError::validation(
            field_name,
            path,
            "Path cannot be empty",
        ));
    }

    if path.contains('\0') {
        return Err(PackingError::validation(
            field_name,
            path,
            "Path contains null bytes",
        ));
    }

    Ok(())
}

/// Returns the trimmed value, rejecting blank input.
pub fn validate_non_empty_string<'a>(field_name: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PackingError::validation(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(trimmed)
}

/// Item quantities are whole, strictly positive counts.
pub fn parse_quantity(field_name: &str, raw: &str) -> Result<u32> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        PackingError::validation(field_name, raw, "Quantity must be a whole number")
    })?;
    if value < 1 {
        return Err(PackingError::validation(
            field_name,
            raw,
            "Quantity must be at least 1",
        ));
    }
    u32::try_from(value)
        .map_err(|_| PackingError::validation(field_name, raw, "Quantity is too large"))
}

/// Weights in kilograms: finite and not negative.
pub fn parse_weight(field_name: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| PackingError::validation(field_name, raw, "Weight must be a number"))?;
    if !value.is_finite() {
        return Err(PackingError::validation(
            field_name,
            raw,
            "Weight must be a finite number",
        ));
    }
    if value < 0.0 {
        return Err(PackingError::validation(
            field_name,
            raw,
            "Weight cannot be negative",
        ));
    }
    Ok(value)
}
