mod error;
mod index;
mod resolver;
mod table;

pub use error::{RoutingError, RoutingResult};
pub use index::OrderedIndex;
pub use resolver::{Resolver, RouteMatch, UrlFor};
pub use table::RouteMap;
