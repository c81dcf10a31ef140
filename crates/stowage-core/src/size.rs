use crate::error::{Result, StowageError};

const KIB: i64 = 1024;
const MIB: i64 = KIB * 1024;
const GIB: i64 = MIB * 1024;

/// Unit suffixes in match order. `b` is a suffix of the others and must come last.
const UNITS: [(&str, i64); 4] = [("gb", GIB), ("mb", MIB), ("kb", KIB), ("b", 1)];

/// Parse a size expression like "10gb", "512 KB" or "42" into bytes.
///
/// The suffix is case-insensitive and may be separated from the number by
/// whitespace. A bare number is taken as bytes. Whitespace-only input is 0.
pub fn parse_size(size: &str) -> Result<i64> {
    let normalized = size.trim().to_lowercase();
    if normalized.is_empty() {
        return Ok(0);
    }

    let (num_str, factor) = UNITS
        .iter()
        .find_map(|(suffix, factor)| {
            normalized
                .strip_suffix(suffix)
                .map(|rest| (rest.trim(), *factor))
        })
        .unwrap_or((normalized.as_str(), 1));

    let value: i64 = num_str
        .parse()
        .map_err(|_| StowageError::InvalidSize(size.to_string()))?;

    value
        .checked_mul(factor)
        .ok_or_else(|| StowageError::InvalidSize(size.to_string()))
}

/// Like [`parse_size`], but a missing value counts as zero bytes.
pub fn parse_optional_size(size: Option<&str>) -> Result<i64> {
    match size {
        Some(s) => parse_size(s),
        None => Ok(0),
    }
}

/// Parse a size expression, applying `default_suffix` when the text carries
/// no unit of its own (e.g. "500" with default "kb" is 500 KiB).
pub fn parse_size_with_default(size: &str, default_suffix: &str) -> Result<i64> {
    let trimmed = size.trim();
    if trimmed.is_empty() || has_unit_suffix(trimmed) {
        return parse_size(size);
    }
    parse_size(&format!("{size} {default_suffix}"))
        .map_err(|_| StowageError::InvalidSize(size.to_string()))
}

fn has_unit_suffix(size: &str) -> bool {
    let lower = size.to_lowercase();
    UNITS.iter().any(|(suffix, _)| lower.ends_with(suffix))
}

/// Render a byte count for display, e.g. "1.50 MiB".
pub fn format_size(bytes: i64) -> String {
    let abs = bytes.unsigned_abs();
    let sign = if bytes < 0 { "-" } else { "" };

    if abs >= GIB as u64 {
        format!("{sign}{:.2} GiB", abs as f64 / GIB as f64)
    } else if abs >= MIB as u64 {
        format!("{sign}{:.2} MiB", abs as f64 / MIB as f64)
    } else if abs >= KIB as u64 {
        format!("{sign}{:.2} KiB", abs as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}
