use regex::Regex;
use smallvec::SmallVec;
use std::fmt::Write;

use super::segment::{CompiledSegment, Segment};
use super::{PatternError, PatternResult};
use crate::converter::ConverterRegistry;

const SLASH_GROUP: &str = "__slash__";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashMode {
    Exact,
    OptionalTrailing,
}

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    parts: Vec<CompiledSegment>,
    slash_mode: SlashMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCaptures<'p> {
    pub texts: SmallVec<[&'p str; 4]>,
    pub trailing_slash: bool,
}

impl CompiledPattern {
    #[tracing::instrument(level = "trace", skip(segments, registry), fields(template = %template))]
    pub fn compile(
        template: &str,
        segments: &[Segment],
        registry: &ConverterRegistry,
        slash_mode: SlashMode,
    ) -> PatternResult<Self> {
        let mut expr = String::with_capacity(template.len() * 2);
        let mut parts = Vec::with_capacity(segments.len());
        expr.push('^');

        for segment in segments {
            match segment {
                Segment::Literal(text) => {
                    expr.push_str(&regex::escape(text));
                    parts.push(CompiledSegment::Literal(text.clone()));
                }
                Segment::Variable(var) => {
                    let factory = registry.lookup(&var.converter).ok_or_else(|| {
                        PatternError::UnknownConverter {
                            template: template.to_string(),
                            converter: var.converter.clone(),
                        }
                    })?;
                    let converter = factory(&var.args).map_err(|source| PatternError::Converter {
                        template: template.to_string(),
                        variable: var.name.clone(),
                        source,
                    })?;

                    let _ = write!(expr, "(?P<{}>{})", var.name, converter.match_pattern());
                    parts.push(CompiledSegment::Variable {
                        name: var.name.clone(),
                        converter,
                    });
                }
            }
        }

        match slash_mode {
            SlashMode::Exact => expr.push('$'),
            SlashMode::OptionalTrailing => {
                let trimmed = expr.trim_end_matches('/').len();
                expr.truncate(trimmed);
                let _ = write!(expr, "(?P<{SLASH_GROUP}>/?)$");
            }
        }

        let regex = Regex::new(&expr).map_err(|err| PatternError::RegexInvalid {
            template: template.to_string(),
            error: err.to_string(),
        })?;

        Ok(Self {
            regex,
            parts,
            slash_mode,
        })
    }

    pub fn parts(&self) -> &[CompiledSegment] {
        &self.parts
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    pub fn captures<'p>(&self, path: &'p str) -> Option<RawCaptures<'p>> {
        let caps = self.regex.captures(path)?;

        let trailing_slash = match self.slash_mode {
            SlashMode::Exact => path.ends_with('/'),
            SlashMode::OptionalTrailing => {
                let slash = caps.name(SLASH_GROUP)?;
                // The text before the optional slash may not end in one.
                if path[..slash.start()].ends_with('/') {
                    return None;
                }
                !slash.as_str().is_empty()
            }
        };

        let texts = self
            .parts
            .iter()
            .filter_map(|part| match part {
                CompiledSegment::Variable { name, .. } => {
                    Some(caps.name(name).map_or("", |m| m.as_str()))
                }
                CompiledSegment::Literal(_) => None,
            })
            .collect();

        Some(RawCaptures {
            texts,
            trailing_slash,
        })
    }
}
