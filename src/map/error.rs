use crate::enums::HttpMethod;
use crate::rule::RuleError;
use crate::types::MethodSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RoutingError {
    #[error("no rule matches path '{path}'")]
    NotFound { path: String },
    #[error("method {method} is not allowed for '{path}' (allowed: {allowed_methods})")]
    MethodNotAllowed {
        method: HttpMethod,
        path: String,
        allowed_methods: MethodSet,
    },
    #[error("path needs a trailing slash; redirect to '{target}'")]
    RedirectRequired { target: String },
    #[error("no rule for endpoint '{endpoint}' can be built from the given values")]
    Build {
        endpoint: String,
        #[source]
        source: Option<Box<RuleError>>,
    },
    #[error("resolver is not bound to a request")]
    NoRequestBound,
    #[error("a scheme can only be applied to external URLs")]
    SchemeRequiresExternal,
}

pub type RoutingResult<T> = Result<T, RoutingError>;
