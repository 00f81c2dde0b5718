use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::table::RouteMap;
use super::{RoutingError, RoutingResult};
use crate::converter::Value;
use crate::enums::HttpMethod;
use crate::rule::{Rule, RuleMatch};
use crate::types::{MethodSet, RuleId, Variables};

// Characters left untouched in a URL fragment: unreserved plus '/'.
const FRAGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

#[derive(Debug, Clone)]
pub struct RouteMatch<'m> {
    pub id: RuleId,
    pub rule: &'m Rule,
    pub variables: Variables,
}

impl RouteMatch<'_> {
    pub fn endpoint(&self) -> &str {
        self.rule.endpoint()
    }
}

#[derive(Debug, Clone)]
pub struct Resolver<'m> {
    map: &'m RouteMap,
    scheme: String,
    host: String,
    request: Option<(HttpMethod, String)>,
}

impl<'m> Resolver<'m> {
    pub(crate) fn new(
        map: &'m RouteMap,
        scheme: String,
        host: String,
        request: Option<(HttpMethod, String)>,
    ) -> Self {
        Self {
            map,
            scheme,
            host,
            request,
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn method(&self) -> Option<HttpMethod> {
        self.request.as_ref().map(|(method, _)| *method)
    }

    pub fn path(&self) -> Option<&str> {
        self.request.as_ref().map(|(_, path)| path.as_str())
    }

    fn request(&self) -> RoutingResult<(HttpMethod, &str)> {
        self.request
            .as_ref()
            .map(|(method, path)| (*method, path.as_str()))
            .ok_or(RoutingError::NoRequestBound)
    }

    // Rules structurally matching `path`, in match order.
    fn candidates<'p>(
        &self,
        path: &'p str,
    ) -> impl Iterator<Item = (RuleId, &'m Rule, RuleMatch)> + use<'m, 'p> {
        self.map.rules().filter_map(move |(id, rule)| {
            // Indexed rules are always bound, so only a miss yields None.
            let matched = rule.match_path(path).ok().flatten()?;
            Some((id, rule, matched))
        })
    }

    #[tracing::instrument(level = "trace", skip(self), fields(method = ?self.method(), path = ?self.path()))]
    pub fn match_request(&self) -> RoutingResult<RouteMatch<'m>> {
        let (method, path) = self.request()?;
        let mut allowed_methods = MethodSet::empty();

        for (id, rule, matched) in self.candidates(path) {
            if matched.needs_redirect {
                let target = rule.build(&matched.variables).map_err(|err| RoutingError::Build {
                    endpoint: rule.endpoint().to_string(),
                    source: Some(Box::new(err)),
                })?;
                tracing::event!(tracing::Level::DEBUG, rule = %id, target = %target, "redirect required");
                return Err(RoutingError::RedirectRequired { target });
            }

            if rule.methods().contains_method(method) {
                return Ok(RouteMatch {
                    id,
                    rule,
                    variables: matched.variables,
                });
            }

            allowed_methods |= rule.methods();
        }

        if allowed_methods.is_empty() {
            return Err(RoutingError::NotFound {
                path: path.to_string(),
            });
        }

        tracing::event!(
            tracing::Level::DEBUG,
            method = %method,
            allowed = %allowed_methods,
            "method not allowed"
        );
        Err(RoutingError::MethodNotAllowed {
            method,
            path: path.to_string(),
            allowed_methods,
        })
    }

    pub fn allowed_methods(&self) -> RoutingResult<MethodSet> {
        let (_, path) = self.request()?;
        Ok(self
            .candidates(path)
            .fold(MethodSet::empty(), |acc, (_, rule, _)| acc | rule.methods()))
    }

    #[tracing::instrument(level = "trace", skip(self, values), fields(endpoint = %endpoint))]
    pub fn build(
        &self,
        endpoint: &str,
        values: &Variables,
        method: Option<HttpMethod>,
        scheme: Option<&str>,
        external: bool,
    ) -> RoutingResult<String> {
        for (_, rule) in self.map.rules_for(endpoint) {
            if !matches!(rule.buildable(values, method), Ok(true)) {
                continue;
            }

            let path = rule.build(values).map_err(|err| RoutingError::Build {
                endpoint: endpoint.to_string(),
                source: Some(Box::new(err)),
            })?;

            if external {
                let scheme = scheme.unwrap_or(self.scheme.as_str());
                return Ok(format!("{scheme}://{}{path}", self.host));
            }
            return Ok(path);
        }

        Err(RoutingError::Build {
            endpoint: endpoint.to_string(),
            source: None,
        })
    }

    pub fn url_for<'r>(&'r self, endpoint: &'r str) -> UrlFor<'r, 'm> {
        UrlFor {
            resolver: self,
            endpoint,
            values: Variables::new(),
            method: None,
            scheme: None,
            external: false,
            anchor: None,
        }
    }
}

#[derive(Debug)]
pub struct UrlFor<'r, 'm> {
    resolver: &'r Resolver<'m>,
    endpoint: &'r str,
    values: Variables,
    method: Option<HttpMethod>,
    scheme: Option<&'r str>,
    external: bool,
    anchor: Option<&'r str>,
}

impl<'r> UrlFor<'r, '_> {
    pub fn value<S: Into<String>, V: Into<Value>>(mut self, name: S, value: V) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn values(mut self, values: Variables) -> Self {
        self.values.extend(values);
        self
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn scheme(mut self, scheme: &'r str) -> Self {
        self.scheme = Some(scheme);
        self
    }

    pub fn external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    pub fn anchor(mut self, anchor: &'r str) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn build(self) -> RoutingResult<String> {
        if self.scheme.is_some() && !self.external {
            return Err(RoutingError::SchemeRequiresExternal);
        }

        let mut url = self.resolver.build(
            self.endpoint,
            &self.values,
            self.method,
            self.scheme,
            self.external,
        )?;

        if let Some(anchor) = self.anchor {
            url.push('#');
            url.extend(utf8_percent_encode(anchor, FRAGMENT));
        }
        Ok(url)
    }
}
