use smallvec::SmallVec;

use super::keys::{BuildKey, MatchKey, Weight, Weights};
use super::{RuleError, RuleResult};
use crate::enums::HttpMethod;
use crate::map::RouteMap;
use crate::pattern::{CompiledPattern, CompiledSegment, SlashMode, parse_template};
use crate::types::{MapId, MethodSet, Variables};

/// A routing entry tying a path template to an endpoint and a method set.
///
/// A rule starts unbound. [`Rule::bind`] compiles it against a
/// [`RouteMap`]'s converters exactly once; matching, building and the
/// ordering keys are only available afterwards.
#[derive(Debug)]
pub struct Rule {
    template: Box<str>,
    endpoint: Box<str>,
    methods: MethodSet,
    strict_slashes: bool,
    is_leaf: bool,
    state: RuleState,
}

#[derive(Debug)]
enum RuleState {
    Unbound,
    Bound(Box<BoundRule>),
}

#[derive(Debug)]
struct BoundRule {
    map: MapId,
    pattern: CompiledPattern,
    variables: SmallVec<[Box<str>; 4]>,
    match_key: MatchKey,
    build_key: BuildKey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    pub variables: Variables,
    pub needs_redirect: bool,
}

impl Rule {
    pub fn new<T, I, E>(template: T, methods: I, endpoint: E) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = HttpMethod>,
        E: Into<String>,
    {
        let template: String = template.into();
        let is_leaf = !template.ends_with('/');
        Self {
            template: template.into_boxed_str(),
            endpoint: endpoint.into().into_boxed_str(),
            methods: methods.into_iter().collect(),
            strict_slashes: true,
            is_leaf,
            state: RuleState::Unbound,
        }
    }

    pub fn with_strict_slashes(mut self, strict_slashes: bool) -> Self {
        self.strict_slashes = strict_slashes;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn methods(&self) -> MethodSet {
        self.methods
    }

    pub fn strict_slashes(&self) -> bool {
        self.strict_slashes
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, RuleState::Bound(_))
    }

    pub fn bound_map(&self) -> Option<MapId> {
        match &self.state {
            RuleState::Bound(bound) => Some(bound.map),
            RuleState::Unbound => None,
        }
    }

    pub(crate) fn insert_method(&mut self, method: HttpMethod) {
        self.methods.insert_method(method);
    }

    #[tracing::instrument(level = "trace", skip(self, map), fields(template = %self.template, endpoint = %self.endpoint))]
    pub fn bind(&mut self, map: &RouteMap) -> RuleResult<()> {
        if let RuleState::Bound(bound) = &self.state {
            return Err(RuleError::AlreadyBound {
                template: self.template.to_string(),
                map: bound.map,
            });
        }
        if self.methods.is_empty() {
            return Err(RuleError::EmptyMethods {
                template: self.template.to_string(),
            });
        }

        let slash_mode = if !self.is_leaf && self.strict_slashes {
            SlashMode::OptionalTrailing
        } else {
            SlashMode::Exact
        };
        let segments = parse_template(&self.template)?;
        let pattern =
            CompiledPattern::compile(&self.template, &segments, map.converters(), slash_mode)?;

        let weights: Weights = pattern.parts().iter().map(Weight::of).collect();
        let variables = pattern
            .parts()
            .iter()
            .filter_map(|part| match part {
                CompiledSegment::Variable { name, .. } => Some(Box::<str>::from(name.as_str())),
                CompiledSegment::Literal(_) => None,
            })
            .collect();

        self.state = RuleState::Bound(Box::new(BoundRule {
            map: map.id(),
            pattern,
            variables,
            build_key: BuildKey::from_weights(&weights),
            match_key: MatchKey::from_weights(weights),
        }));
        Ok(())
    }

    fn bound(&self) -> RuleResult<&BoundRule> {
        match &self.state {
            RuleState::Bound(bound) => Ok(bound),
            RuleState::Unbound => Err(RuleError::NotBound {
                template: self.template.to_string(),
            }),
        }
    }

    pub fn match_key(&self) -> RuleResult<&MatchKey> {
        Ok(&self.bound()?.match_key)
    }

    pub fn build_key(&self) -> RuleResult<BuildKey> {
        Ok(self.bound()?.build_key)
    }

    pub fn variable_names(&self) -> RuleResult<impl Iterator<Item = &str>> {
        Ok(self.bound()?.variables.iter().map(|name| name.as_ref()))
    }

    pub fn segments(&self) -> RuleResult<&[CompiledSegment]> {
        Ok(self.bound()?.pattern.parts())
    }

    /// Matches `path` against this rule. Converter validation failures are
    /// reported as no match.
    #[tracing::instrument(level = "trace", skip(self), fields(template = %self.template))]
    pub fn match_path(&self, path: &str) -> RuleResult<Option<RuleMatch>> {
        let bound = self.bound()?;
        let Some(raw) = bound.pattern.captures(path) else {
            return Ok(None);
        };

        let converters = bound.pattern.parts().iter().filter_map(|part| match part {
            CompiledSegment::Variable { name, converter } => Some((name, converter)),
            CompiledSegment::Literal(_) => None,
        });

        let mut variables = Variables::with_capacity(raw.texts.len());
        for ((name, converter), text) in converters.zip(raw.texts.iter()) {
            match converter.parse(text) {
                Ok(value) => {
                    variables.insert(name.clone(), value);
                }
                Err(err) => {
                    tracing::event!(
                        tracing::Level::TRACE,
                        variable = %name,
                        error = %err,
                        "converter rejected matched text"
                    );
                    return Ok(None);
                }
            }
        }

        let needs_redirect = self.strict_slashes && !self.is_leaf && !raw.trailing_slash;
        Ok(Some(RuleMatch {
            variables,
            needs_redirect,
        }))
    }

    pub fn build(&self, values: &Variables) -> RuleResult<String> {
        let bound = self.bound()?;

        if let Some(unexpected) = values
            .keys()
            .find(|key| !bound.variables.iter().any(|name| name.as_ref() == key.as_str()))
        {
            return Err(RuleError::UnexpectedValue {
                template: self.template.to_string(),
                name: unexpected.clone(),
            });
        }

        let mut path = String::with_capacity(self.template.len());
        for part in bound.pattern.parts() {
            match part {
                CompiledSegment::Literal(text) => path.push_str(text),
                CompiledSegment::Variable { name, converter } => {
                    let value = values.get(name).ok_or_else(|| RuleError::MissingValue {
                        template: self.template.to_string(),
                        name: name.clone(),
                    })?;
                    let rendered = converter.render(value).map_err(|source| RuleError::Render {
                        template: self.template.to_string(),
                        variable: name.clone(),
                        source,
                    })?;
                    path.push_str(&rendered);
                }
            }
        }

        Ok(path)
    }

    /// True when `method` is acceptable and `values` names exactly this
    /// rule's variables.
    pub fn buildable(&self, values: &Variables, method: Option<HttpMethod>) -> RuleResult<bool> {
        let bound = self.bound()?;

        if let Some(method) = method
            && !self.methods.contains_method(method)
        {
            return Ok(false);
        }

        Ok(values.len() == bound.variables.len()
            && values
                .keys()
                .all(|key| bound.variables.iter().any(|name| name.as_ref() == key.as_str())))
    }
}
