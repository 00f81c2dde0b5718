use crate::map::RoutingError;
use crate::router::RouterConfigError;
use crate::rule::RuleError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RouterError {
    #[error("router is sealed; cannot add rule '{template}'")]
    AddWhileSealed { template: String },
    #[error("router is sealed; cannot register converter '{name}'")]
    RegisterWhileSealed { name: String },
    #[error("router is not sealed; cannot perform route lookup")]
    FindWhileMutable,
    #[error("router is not sealed; readonly route map is unavailable")]
    ReadOnlyUnavailable,
    #[error(transparent)]
    Config(#[from] RouterConfigError),
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Routing(#[from] RoutingError),
}

pub type RouterResult<T> = Result<T, RouterError>;
