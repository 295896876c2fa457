pub mod loader;
pub mod types;

pub use loader::{load_leads, parse_leads};
pub use types::{Company, FundingStage, LeadRecord, Publication};
