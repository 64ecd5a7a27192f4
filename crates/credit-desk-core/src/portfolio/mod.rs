pub mod application;
pub mod summary;

pub use application::{ApplicationNumber, ApplicationRecord};
pub use summary::{list_applications, summarize_portfolio, ApplicationRow, PortfolioSummary};
