mod identity_hasher;
mod phone_normalizer;
mod report_store;
mod score_store;
mod threat_index;

pub use identity_hasher::IIdentityHasher;
pub use phone_normalizer::IPhoneNormalizer;
pub use report_store::IReportStore;
pub use score_store::IScoreStore;
pub use threat_index::IThreatIndex;
