//! Input checks applied before anything is recorded.

use gsr_core::errors::{GsrResult, ValidationError};
use gsr_core::models::RiskCategory;

/// Parse a human report category. Automated-block events are rejected here.
pub(crate) fn human_category(raw: &str) -> GsrResult<RiskCategory> {
    let category: RiskCategory = raw.parse()?;
    if category.is_automated() {
        return Err(ValidationError::ReservedCategory {
            category: category.as_str().to_string(),
        }
        .into());
    }
    Ok(category)
}

pub(crate) fn reporter(raw: &str) -> GsrResult<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingReporter.into());
    }
    Ok(trimmed)
}

pub(crate) fn app_identity(raw: &str) -> GsrResult<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingAppIdentity.into());
    }
    Ok(trimmed)
}

/// Length is counted in characters, not bytes.
pub(crate) fn comment(raw: &str, max: usize) -> GsrResult<&str> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len > max {
        return Err(ValidationError::CommentTooLong { len, max }.into());
    }
    Ok(trimmed)
}
