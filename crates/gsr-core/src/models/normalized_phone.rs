use serde::{Deserialize, Serialize};

/// Output of the phone normalization collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedPhone {
    /// Canonical E.164 form, e.g. `+56912345678`.
    pub e164: String,
    /// ISO 3166-1 alpha-2 region, e.g. `CL`.
    pub country_code: String,
}
