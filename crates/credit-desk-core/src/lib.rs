pub mod applicant;
pub mod error;
pub mod scoring;
pub mod types;
pub mod underwriting;

#[cfg(feature = "portfolio")]
pub mod portfolio;

pub use error::CreditDeskError;
pub use scoring::score;
pub use types::*;
pub use underwriting::{evaluate, underwrite};

/// Standard result type for all credit-desk operations
pub type CreditDeskResult<T> = Result<T, CreditDeskError>;
