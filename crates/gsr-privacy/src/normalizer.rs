//! E.164 normalization and region detection via the `phonenumber` crate.

use gsr_core::errors::{GsrResult, ValidationError};
use gsr_core::models::NormalizedPhone;
use gsr_core::traits::IPhoneNormalizer;
use phonenumber::Mode;

/// Parses international-format input only: there is no default region, so
/// numbers must carry their country calling code.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneNumberNormalizer;

impl PhoneNumberNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl IPhoneNormalizer for PhoneNumberNormalizer {
    fn normalize(&self, raw: &str) -> GsrResult<NormalizedPhone> {
        let input = raw.trim();
        let number = phonenumber::parse(None, input).map_err(|_| {
            ValidationError::InvalidPhoneFormat {
                input: input.to_string(),
            }
        })?;

        let e164 = number.format().mode(Mode::E164).to_string();

        if !phonenumber::is_valid(&number) {
            return Err(ValidationError::InvalidPhoneNumber { number: e164 }.into());
        }

        let Some(region) = number.country().id() else {
            return Err(ValidationError::UndetectableRegion { number: e164 }.into());
        };

        Ok(NormalizedPhone {
            e164,
            country_code: format!("{region:?}"),
        })
    }
}
