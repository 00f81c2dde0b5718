pub mod converter;
pub mod enums;
pub mod map;
pub mod pattern;
pub mod router;
pub mod rule;
pub mod types;

pub use converter::{Converter, ConverterArgs, ConverterRegistry, Value};
pub use enums::HttpMethod;
pub use map::{Resolver, RouteMap, RouteMatch, RoutingError, RoutingResult, UrlFor};
pub use router::{MatchedRoute, Router, RouterError, RouterOptions, RouterResult};
pub use rule::{ConfigurationError, Rule, RuleError};
pub use types::{MethodSet, RuleId, Variables};
