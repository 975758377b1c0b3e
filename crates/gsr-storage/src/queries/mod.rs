pub mod maintenance;
pub mod report_ops;
pub mod score_ops;
pub mod threat_ops;
