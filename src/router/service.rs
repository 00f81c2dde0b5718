use crate::converter::ConverterFactory;
use crate::enums::HttpMethod;
use crate::map::RouteMap;
use crate::router::{RouterError, RouterOptions, RouterResult};
use crate::rule::Rule;
use crate::types::{MethodSet, RuleId, Variables};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRoute {
    pub id: RuleId,
    pub endpoint: String,
    pub variables: Variables,
}

#[derive(Debug)]
struct RouterState {
    map: RouteMap,
    readonly: OnceLock<Arc<RouteMap>>,
}

/// Thread-safe owner of a [`RouteMap`].
///
/// Rules are added while the router is mutable. [`Router::seal`] moves the
/// map behind an `Arc`; from then on lookups and builds are served from it
/// and further registration is rejected.
#[derive(Debug)]
pub struct Router {
    inner: RwLock<RouterState>,
}

impl Router {
    pub fn new(options: Option<RouterOptions>) -> RouterResult<Self> {
        let map = RouteMap::with_options(options.unwrap_or_default())?;
        Ok(Self {
            inner: RwLock::new(RouterState {
                map,
                readonly: OnceLock::new(),
            }),
        })
    }

    pub fn options(&self) -> RouterOptions {
        self.inner.read().map.options().clone()
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.read().readonly.get().is_some()
    }

    pub fn add(&self, rule: Rule) -> RouterResult<RuleId> {
        let mut guard = self.inner.write();

        if guard.readonly.get().is_some() {
            return Err(RouterError::AddWhileSealed {
                template: rule.template().to_string(),
            });
        }

        Ok(guard.map.add(rule)?)
    }

    pub fn route<I>(&self, template: &str, methods: I, endpoint: &str) -> RouterResult<RuleId>
    where
        I: IntoIterator<Item = HttpMethod>,
    {
        let strict_slashes = self.inner.read().map.options().strict_slashes;
        self.add(Rule::new(template, methods, endpoint).with_strict_slashes(strict_slashes))
    }

    pub fn register_converter(&self, name: &str, factory: ConverterFactory) -> RouterResult<()> {
        let mut guard = self.inner.write();

        if guard.readonly.get().is_some() {
            return Err(RouterError::RegisterWhileSealed {
                name: name.to_string(),
            });
        }

        guard.map.register_converter(name, factory);
        Ok(())
    }

    pub fn seal(&self) {
        let mut guard = self.inner.write();
        if guard.readonly.get().is_some() {
            return;
        }

        let options = guard.map.options().clone();
        let map = std::mem::replace(&mut guard.map, RouteMap::from_validated(options));
        tracing::event!(
            tracing::Level::DEBUG,
            map = %map.id(),
            rules = map.len(),
            "router sealed"
        );
        let _ = guard.readonly.set(Arc::new(map));
    }

    pub fn readonly(&self) -> RouterResult<Arc<RouteMap>> {
        let guard = self.inner.read();
        guard
            .readonly
            .get()
            .cloned()
            .ok_or(RouterError::ReadOnlyUnavailable)
    }

    fn sealed_map(&self) -> RouterResult<Arc<RouteMap>> {
        self.inner
            .read()
            .readonly
            .get()
            .cloned()
            .ok_or(RouterError::FindWhileMutable)
    }

    pub fn find(&self, method: HttpMethod, path: &str) -> RouterResult<MatchedRoute> {
        let map = self.sealed_map()?;
        let matched = map.resolve("", "", method, path).match_request()?;

        Ok(MatchedRoute {
            id: matched.id,
            endpoint: matched.rule.endpoint().to_string(),
            variables: matched.variables,
        })
    }

    pub fn allowed_methods(&self, path: &str) -> RouterResult<MethodSet> {
        let map = self.sealed_map()?;
        let methods = map
            .resolve("", "", HttpMethod::Get, path)
            .allowed_methods()?;
        Ok(methods)
    }

    pub fn url_for(&self, endpoint: &str, values: &Variables) -> RouterResult<String> {
        let map = self.sealed_map()?;
        let url = map
            .resolve_for_build(map.options().default_scheme.as_str(), "")
            .build(endpoint, values, None, None, false)?;
        Ok(url)
    }

    pub fn external_url_for(
        &self,
        host: &str,
        endpoint: &str,
        values: &Variables,
    ) -> RouterResult<String> {
        let map = self.sealed_map()?;
        let url = map
            .resolve_for_host(host)
            .build(endpoint, values, None, None, true)?;
        Ok(url)
    }
}
