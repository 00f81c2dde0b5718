mod errors;
mod options;
mod service;

pub use errors::{RouterError, RouterResult};
pub use options::{
    DEFAULT_MAX_RULES, DEFAULT_SCHEME, MAX_RULES_LIMIT, RouterConfig, RouterConfigBuilder,
    RouterConfigError, RouterOptions, RouterOptionsBuilder, RouterOptionsError,
};
pub use service::{MatchedRoute, Router};
