use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_RULES: usize = u16::MAX as usize;
pub const DEFAULT_SCHEME: &str = "http";
// Rule ids are u32 arena indices.
pub const MAX_RULES_LIMIT: usize = u32::MAX as usize;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterConfig {
    /// Default trailing-slash policy for rules created via `Router::route`.
    pub strict_slashes: bool,
    pub automatic_head: bool,
    pub max_rules: usize,
    pub default_scheme: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            strict_slashes: true,
            automatic_head: true,
            max_rules: DEFAULT_MAX_RULES,
            default_scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

impl RouterConfig {
    pub fn builder() -> RouterConfigBuilder {
        RouterConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RouterConfigError> {
        if self.max_rules == 0 || self.max_rules > MAX_RULES_LIMIT {
            return Err(RouterConfigError::MaxRulesInvalid {
                provided: self.max_rules,
            });
        }
        if !is_valid_scheme(&self.default_scheme) {
            return Err(RouterConfigError::InvalidScheme {
                scheme: self.default_scheme.clone(),
            });
        }
        Ok(())
    }
}

// RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_valid_scheme(scheme: &str) -> bool {
    let mut bytes = scheme.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
}

#[derive(Debug, Default, Clone)]
pub struct RouterConfigBuilder {
    config: RouterConfig,
}

impl RouterConfigBuilder {
    pub fn strict_slashes(mut self, value: bool) -> Self {
        self.config.strict_slashes = value;
        self
    }

    pub fn automatic_head(mut self, value: bool) -> Self {
        self.config.automatic_head = value;
        self
    }

    pub fn max_rules(mut self, value: usize) -> Self {
        self.config.max_rules = value;
        self
    }

    pub fn default_scheme<S: Into<String>>(mut self, scheme: S) -> Self {
        self.config.default_scheme = scheme.into();
        self
    }

    pub fn build(self) -> Result<RouterConfig, RouterConfigError> {
        let config = self.config;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterConfigError {
    #[error("max_rules must be between 1 and {MAX_RULES_LIMIT} (got {provided})")]
    MaxRulesInvalid { provided: usize },
    #[error("'{scheme}' is not a valid URL scheme")]
    InvalidScheme { scheme: String },
}

pub type RouterOptions = RouterConfig;
pub type RouterOptionsBuilder = RouterConfigBuilder;
pub type RouterOptionsError = RouterConfigError;
