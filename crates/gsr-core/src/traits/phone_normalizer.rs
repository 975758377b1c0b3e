use crate::errors::GsrResult;
use crate::models::NormalizedPhone;

/// Turns raw user input into a canonical E.164 number plus ISO region.
pub trait IPhoneNormalizer: Send + Sync {
    /// Fails with a `ValidationError` when the input is unparseable, not a
    /// real number, or its region cannot be determined.
    fn normalize(&self, raw: &str) -> GsrResult<NormalizedPhone>;
}
