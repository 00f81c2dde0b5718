use crate::converter::ValidationError;
use crate::pattern::PatternError;
use crate::types::MapId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("rule '{template}' is already bound to {map}")]
    AlreadyBound { template: String, map: MapId },
    #[error("rule '{template}' is not bound to a route map")]
    NotBound { template: String },
    #[error("rule '{template}' accepts no HTTP methods")]
    EmptyMethods { template: String },
    #[error("route map is full ({limit} rules); cannot add '{template}'")]
    MapFull { template: String, limit: usize },
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("no value supplied for variable '{name}' of rule '{template}'")]
    MissingValue { template: String, name: String },
    #[error("rule '{template}' has no variable named '{name}'")]
    UnexpectedValue { template: String, name: String },
    #[error("value for variable '{variable}' of rule '{template}' cannot be rendered: {source}")]
    Render {
        template: String,
        variable: String,
        #[source]
        source: ValidationError,
    },
}

pub type RuleResult<T> = Result<T, RuleError>;

pub type ConfigurationError = RuleError;
