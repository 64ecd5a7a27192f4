pub mod factors;
pub mod scorecard;

pub use factors::{ScoreCategory, ScoreFactor};
pub use scorecard::{
    max_attainable_score, score, score_fraction, ScoreBreakdown, ScoreContribution, SCORE_SCALE,
};
