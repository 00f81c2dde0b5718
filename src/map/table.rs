use hashbrown::HashMap as FastHashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::index::OrderedIndex;
use super::resolver::Resolver;
use crate::converter::{ConverterFactory, ConverterRegistry};
use crate::enums::HttpMethod;
use crate::router::{RouterConfigError, RouterOptions};
use crate::rule::{BuildKey, MatchKey, Rule, RuleError, RuleResult};
use crate::types::{MapId, RuleId};

static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(1);

/// The route table: every bound rule, a global match-order index and a
/// build-order index per endpoint.
#[derive(Debug)]
pub struct RouteMap {
    id: MapId,
    options: RouterOptions,
    rules: Vec<Rule>,
    match_index: OrderedIndex<MatchKey>,
    endpoints: FastHashMap<Box<str>, OrderedIndex<BuildKey>>,
    converters: ConverterRegistry,
}

impl RouteMap {
    pub fn new() -> Self {
        Self::from_validated(RouterOptions::default())
    }

    pub fn with_options(options: RouterOptions) -> Result<Self, RouterConfigError> {
        options.validate()?;
        Ok(Self::from_validated(options))
    }

    pub(crate) fn from_validated(options: RouterOptions) -> Self {
        Self {
            id: MapId(NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed)),
            options,
            rules: Vec::new(),
            match_index: OrderedIndex::new(),
            endpoints: FastHashMap::new(),
            converters: ConverterRegistry::with_defaults(),
        }
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    pub fn register_converter<S: Into<Box<str>>>(
        &mut self,
        name: S,
        factory: ConverterFactory,
    ) -> Option<ConverterFactory> {
        self.converters.register(name, factory)
    }

    #[tracing::instrument(level = "debug", skip(self, rule), fields(map = %self.id, template = %rule.template(), endpoint = %rule.endpoint()))]
    pub fn add(&mut self, mut rule: Rule) -> RuleResult<RuleId> {
        let limit = self.options.max_rules;
        let id = match u32::try_from(self.rules.len()) {
            Ok(index) if self.rules.len() < limit => RuleId(index),
            _ => {
                return Err(RuleError::MapFull {
                    template: rule.template().to_string(),
                    limit,
                });
            }
        };

        if self.options.automatic_head
            && !rule.is_bound()
            && rule.methods().contains_method(HttpMethod::Get)
        {
            rule.insert_method(HttpMethod::Head);
        }

        rule.bind(self)?;

        let match_key = rule.match_key()?.clone();
        let build_key = rule.build_key()?;

        self.match_index.insert(match_key, id);
        self.endpoints
            .entry(rule.endpoint().into())
            .or_default()
            .insert(build_key, id);
        self.rules.push(rule);

        tracing::event!(tracing::Level::DEBUG, rule = %id, "rule added");
        Ok(id)
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.index())
    }

    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> + '_ {
        self.match_index
            .iter()
            .map(|id| (id, &self.rules[id.index()]))
    }

    pub fn rules_for<'a>(&'a self, endpoint: &str) -> impl Iterator<Item = (RuleId, &'a Rule)> + 'a {
        self.endpoints
            .get(endpoint)
            .into_iter()
            .flat_map(|index| index.iter())
            .map(|id| (id, &self.rules[id.index()]))
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(|name| name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn resolve<S, H, P>(&self, scheme: S, host: H, method: HttpMethod, path: P) -> Resolver<'_>
    where
        S: Into<String>,
        H: Into<String>,
        P: Into<String>,
    {
        Resolver::new(self, scheme.into(), host.into(), Some((method, path.into())))
    }

    pub fn resolve_for_build<S, H>(&self, scheme: S, host: H) -> Resolver<'_>
    where
        S: Into<String>,
        H: Into<String>,
    {
        Resolver::new(self, scheme.into(), host.into(), None)
    }

    pub fn resolve_for_host<H: Into<String>>(&self, host: H) -> Resolver<'_> {
        Resolver::new(self, self.options.default_scheme.clone(), host.into(), None)
    }
}

impl Default for RouteMap {
    fn default() -> Self {
        Self::new()
    }
}
