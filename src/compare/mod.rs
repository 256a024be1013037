mod session;

pub use session::{ComparisonSession, ComparisonSummary};
