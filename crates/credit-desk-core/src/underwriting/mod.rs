pub mod evaluation;
pub mod policy;
pub mod rules;

pub use evaluation::{evaluate, Evaluation, EvaluationInput};
pub use policy::{underwrite, Decision, DecisionOutcome, RejectionReason};
pub use rules::{BusinessRules, RuleKey, RuleParameter};
