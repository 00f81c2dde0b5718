use smallvec::SmallVec;
use std::fmt;

use super::{ConverterError, ConverterResult};

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ArgValue {
    fn type_name(&self) -> &'static str {
        match self {
            ArgValue::Bool(_) => "a boolean",
            ArgValue::Int(_) => "an integer",
            ArgValue::Float(_) => "a float",
            ArgValue::Str(_) => "a string",
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(true) => f.write_str("True"),
            ArgValue::Bool(false) => f.write_str("False"),
            ArgValue::Int(i) => write!(f, "{i}"),
            ArgValue::Float(v) => write!(f, "{v}"),
            ArgValue::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConverterArgs {
    pub positional: SmallVec<[ArgValue; 4]>,
    pub keyword: SmallVec<[(String, ArgValue); 4]>,
}

impl ConverterArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_positional(mut self, value: ArgValue) -> Self {
        self.positional.push(value);
        self
    }

    pub fn with_keyword<S: Into<String>>(mut self, name: S, value: ArgValue) -> Self {
        self.keyword.push((name.into(), value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    pub(crate) fn bind<const N: usize>(
        &self,
        converter: &'static str,
        names: [&'static str; N],
    ) -> ConverterResult<BoundArgs<'_, N>> {
        if self.positional.len() > N {
            return Err(ConverterError::TooManyArguments {
                converter,
                max: N,
                given: self.positional.len(),
            });
        }

        let mut slots: [Option<&ArgValue>; N] = [None; N];
        for (slot, value) in slots.iter_mut().zip(self.positional.iter()) {
            *slot = Some(value);
        }

        for (name, value) in self.keyword.iter() {
            let Some(idx) = names.iter().position(|candidate| candidate == name) else {
                return Err(ConverterError::UnknownArgument {
                    converter,
                    name: name.clone(),
                });
            };
            if slots[idx].is_some() {
                return Err(ConverterError::DuplicateArgument {
                    converter,
                    name: name.clone(),
                });
            }
            slots[idx] = Some(value);
        }

        Ok(BoundArgs {
            converter,
            names,
            slots,
        })
    }
}

pub(crate) struct BoundArgs<'a, const N: usize> {
    converter: &'static str,
    names: [&'static str; N],
    slots: [Option<&'a ArgValue>; N],
}

impl<const N: usize> BoundArgs<'_, N> {
    pub(crate) fn int(&self, idx: usize) -> ConverterResult<Option<i64>> {
        match self.slots[idx] {
            None => Ok(None),
            Some(ArgValue::Int(i)) => Ok(Some(*i)),
            Some(other) => Err(self.type_error(idx, "an integer", other)),
        }
    }

    pub(crate) fn count(&self, idx: usize) -> ConverterResult<Option<u32>> {
        let Some(value) = self.int(idx)? else {
            return Ok(None);
        };
        u32::try_from(value)
            .map(Some)
            .map_err(|_| self.value_error(idx, format!("{value} is not a non-negative count")))
    }

    pub(crate) fn float(&self, idx: usize) -> ConverterResult<Option<f64>> {
        match self.slots[idx] {
            None => Ok(None),
            Some(ArgValue::Float(v)) => Ok(Some(*v)),
            #[allow(clippy::cast_precision_loss)]
            Some(ArgValue::Int(i)) => Ok(Some(*i as f64)),
            Some(other) => Err(self.type_error(idx, "a number", other)),
        }
    }

    pub(crate) fn value_error(&self, idx: usize, reason: String) -> ConverterError {
        ConverterError::InvalidArgumentValue {
            converter: self.converter,
            name: self.names[idx].to_string(),
            reason,
        }
    }

    fn type_error(&self, idx: usize, expected: &'static str, found: &ArgValue) -> ConverterError {
        ConverterError::InvalidArgumentType {
            converter: self.converter,
            name: self.names[idx].to_string(),
            expected,
            found: format!("{} '{}'", found.type_name(), found),
        }
    }
}
