//! Configuration constants and validation functions for the parser.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ParseError, Result};

/// Section label used before the first chapter heading is seen.
pub const DEFAULT_SECTION_LABEL: &str = "General";

/// Regulation id pattern: tier token, space, number/year.
///
/// Tier tokens follow official citation style: UU, PP, Perpres, Permenaker.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static REGULATION_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(UU|PP|Perpres|Permenaker) \d{1,3}/\d{4}$").expect("valid regex")
});

/// Validate a regulation identifier.
///
/// # Arguments
/// * `id` - The regulation identifier to validate
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(ParseError::InvalidRegulationId)` if invalid
///
/// # Examples
/// ```
/// use vocana_parser::config::validate_regulation_id;
///
/// assert!(validate_regulation_id("UU 13/2003").is_ok());
/// assert!(validate_regulation_id("PP 35/2021").is_ok());
/// assert!(validate_regulation_id("INVALID").is_err());
/// ```
pub fn validate_regulation_id(id: &str) -> Result<()> {
    if REGULATION_ID_PATTERN.is_match(id) {
        Ok(())
    } else {
        Err(ParseError::InvalidRegulationId(id.to_string()))
    }
}
