/// Custom side input parsing error types
#[derive(Debug, PartialEq)]
pub enum SidesParseError {
    NotANumber(String),
    NotWhole(f64),
}

impl std::fmt::Display for SidesParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SidesParseError::NotANumber(raw) => write!(f, "Side count must be a number, got {:?}", raw),
            SidesParseError::NotWhole(v) => write!(f, "Side count must be a whole number, got {}", v),
        }
    }
}

impl std::error::Error for SidesParseError {}

/// Parse the raw text of the custom side input.
///
/// An empty field yields `Ok(None)`. Whole numbers too large for `i64`
/// saturate instead of failing, so they still end up capped downstream.
///
/// # Examples
/// ```ignore
/// assert_eq!(parse_custom_sides(""), Ok(None));
/// assert_eq!(parse_custom_sides(" 12 "), Ok(Some(12)));
/// assert_eq!(parse_custom_sides("1e30"), Ok(Some(i64::MAX)));
/// ```
pub fn parse_custom_sides(input: &str) -> Result<Option<i64>, SidesParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(Some(v));
    }

    match trimmed.parse::<f64>() {
        // `as` saturates at the i64 bounds
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(Some(v as i64)),
        Ok(v) if v.is_finite() => Err(SidesParseError::NotWhole(v)),
        _ => Err(SidesParseError::NotANumber(trimmed.to_string())),
    }
}
