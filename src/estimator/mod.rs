pub mod bands;
pub mod engine;
pub mod factors;
pub mod tips;

pub use bands::{CreditBand, RiskLevel};
pub use engine::{debt_to_income_ratio, estimate, FactorContribution, ScoreResult};
pub use factors::{Bucket, RangeOp};
pub use tips::Tip;
