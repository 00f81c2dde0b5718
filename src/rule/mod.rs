mod definition;
mod error;
mod keys;

pub use definition::{Rule, RuleMatch};
pub use error::{ConfigurationError, RuleError, RuleResult};
pub use keys::{BuildKey, MatchKey, Weight, Weights};
