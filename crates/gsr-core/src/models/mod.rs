mod country_threat;
mod normalized_phone;
mod phone_score;
mod report;
mod risk_category;
mod risk_tier;

pub use country_threat::CountryThreatEntry;
pub use normalized_phone::NormalizedPhone;
pub use phone_score::PhoneScore;
pub use report::Report;
pub use risk_category::RiskCategory;
pub use risk_tier::RiskTier;
