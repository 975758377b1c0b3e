/// Input-validation failures. Raised before anything is recorded.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid phone format '{input}': include the country calling code (e.g. +569...)")]
    InvalidPhoneFormat { input: String },

    #[error("invalid phone number {number}: number does not exist")]
    InvalidPhoneNumber { number: String },

    #[error("could not detect country for phone number {number}")]
    UndetectableRegion { number: String },

    #[error("reporter identity is missing")]
    MissingReporter,

    #[error("blocking app identity is missing")]
    MissingAppIdentity,

    #[error("unknown report category '{category}'")]
    UnknownCategory { category: String },

    #[error("category {category} is reserved for automated events")]
    ReservedCategory { category: String },

    #[error("comment too long: {len} chars (max {max})")]
    CommentTooLong { len: usize, max: usize },
}
