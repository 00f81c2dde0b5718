use uuid::Uuid;

use super::args::ConverterArgs;
use super::value::format_float;
use super::{ConverterError, ConverterResult, ValidationError, ValidationResult, Value};

pub const DEFAULT_WEIGHT: u32 = 100;
pub const NUMERIC_WEIGHT: u32 = 50;
pub const PATH_WEIGHT: u32 = 200;

const PATH_PATTERN: &str = "[^/].*?";
// ASCII digits only, matching what `str::parse` accepts.
const INTEGER_PATTERN: &str = "[0-9]+";
const FLOAT_PATTERN: &str = r"[0-9]+\.[0-9]+";
const UUID_PATTERN: &str =
    "[A-Fa-f0-9]{8}-[A-Fa-f0-9]{4}-[A-Fa-f0-9]{4}-[A-Fa-f0-9]{4}-[A-Fa-f0-9]{12}";

#[derive(Debug, Clone, PartialEq)]
pub enum Converter {
    String(StringConverter),
    Any(AnyConverter),
    Path(PathConverter),
    Integer(IntegerConverter),
    Float(FloatConverter),
    Uuid(UuidConverter),
}

impl Converter {
    pub fn name(&self) -> &'static str {
        match self {
            Converter::String(_) => StringConverter::NAME,
            Converter::Any(_) => AnyConverter::NAME,
            Converter::Path(_) => PathConverter::NAME,
            Converter::Integer(_) => IntegerConverter::NAME,
            Converter::Float(_) => FloatConverter::NAME,
            Converter::Uuid(_) => UuidConverter::NAME,
        }
    }

    /// Regex fragment matched by this converter, without anchors or groups.
    pub fn match_pattern(&self) -> &str {
        match self {
            Converter::String(c) => &c.pattern,
            Converter::Any(c) => &c.pattern,
            Converter::Path(_) => PATH_PATTERN,
            Converter::Integer(_) => INTEGER_PATTERN,
            Converter::Float(_) => FLOAT_PATTERN,
            Converter::Uuid(_) => UUID_PATTERN,
        }
    }

    /// Lower is more specific.
    pub fn weight(&self) -> u32 {
        match self {
            Converter::Path(_) => PATH_WEIGHT,
            Converter::Integer(_) | Converter::Float(_) => NUMERIC_WEIGHT,
            Converter::String(_) | Converter::Any(_) | Converter::Uuid(_) => DEFAULT_WEIGHT,
        }
    }

    pub fn parse(&self, text: &str) -> ValidationResult<Value> {
        match self {
            Converter::String(_) | Converter::Any(_) | Converter::Path(_) => {
                Ok(Value::Str(text.to_string()))
            }
            Converter::Integer(c) => c.parse(text),
            Converter::Float(c) => c.parse(text),
            Converter::Uuid(c) => c.parse(text),
        }
    }

    pub fn render(&self, value: &Value) -> ValidationResult<String> {
        match self {
            Converter::String(_) | Converter::Any(_) | Converter::Path(_) => Ok(value.to_string()),
            Converter::Integer(c) => c.render(value),
            Converter::Float(c) => c.render(value),
            Converter::Uuid(c) => c.render(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringConverter {
    pub min_length: u32,
    pub max_length: Option<u32>,
    pub length: Option<u32>,
    pattern: String,
}

impl StringConverter {
    pub const NAME: &'static str = "string";

    pub fn new(
        min_length: u32,
        max_length: Option<u32>,
        length: Option<u32>,
    ) -> ConverterResult<Self> {
        if let Some(max) = max_length
            && max < min_length
        {
            return Err(ConverterError::InvalidArgumentValue {
                converter: Self::NAME,
                name: "maxlength".to_string(),
                reason: format!("{max} is smaller than minlength {min_length}"),
            });
        }

        let pattern = match (length, max_length) {
            (Some(exact), _) => format!("[^/]{{{exact}}}"),
            (None, Some(max)) => format!("[^/]{{{min_length},{max}}}"),
            (None, None) => format!("[^/]{{{min_length},}}"),
        };

        Ok(Self {
            min_length,
            max_length,
            length,
            pattern,
        })
    }

    pub fn from_args(args: &ConverterArgs) -> ConverterResult<Converter> {
        let bound = args.bind(Self::NAME, ["minlength", "maxlength", "length"])?;
        let min_length = bound.count(0)?.unwrap_or(1);
        let converter = Self::new(min_length, bound.count(1)?, bound.count(2)?)?;
        Ok(Converter::String(converter))
    }
}

impl Default for StringConverter {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: None,
            length: None,
            pattern: "[^/]{1,}".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnyConverter {
    pub items: Vec<String>,
    pattern: String,
}

impl AnyConverter {
    pub const NAME: &'static str = "any";

    pub fn new<I, S>(items: I) -> ConverterResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(ConverterError::AnyWithoutItems);
        }

        let alternatives: Vec<String> = items.iter().map(|item| regex::escape(item)).collect();
        let pattern = format!("(?:{})", alternatives.join("|"));

        Ok(Self { items, pattern })
    }

    pub fn from_args(args: &ConverterArgs) -> ConverterResult<Converter> {
        if let Some((name, _)) = args.keyword.first() {
            return Err(ConverterError::UnknownArgument {
                converter: Self::NAME,
                name: name.clone(),
            });
        }
        let converter = Self::new(args.positional.iter().map(|item| item.to_string()))?;
        Ok(Converter::Any(converter))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathConverter;

impl PathConverter {
    pub const NAME: &'static str = "path";

    pub fn from_args(args: &ConverterArgs) -> ConverterResult<Converter> {
        args.bind(Self::NAME, [])?;
        Ok(Converter::Path(PathConverter))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerConverter {
    pub fixed_digits: Option<u32>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl IntegerConverter {
    pub const NAME: &'static str = "int";

    pub fn from_args(args: &ConverterArgs) -> ConverterResult<Converter> {
        let bound = args.bind(Self::NAME, ["fixed_digits", "min", "max"])?;
        let fixed_digits = bound.count(0)?;
        if fixed_digits == Some(0) {
            return Err(bound.value_error(0, "fixed_digits must be at least 1".to_string()));
        }
        let (min, max) = (bound.int(1)?, bound.int(2)?);
        if let (Some(lo), Some(hi)) = (min, max)
            && lo > hi
        {
            return Err(bound.value_error(2, format!("max {hi} is smaller than min {lo}")));
        }

        Ok(Converter::Integer(IntegerConverter {
            fixed_digits,
            min,
            max,
        }))
    }

    pub fn parse(&self, text: &str) -> ValidationResult<Value> {
        if let Some(fixed_digits) = self.fixed_digits
            && text.len() > fixed_digits as usize
        {
            return Err(ValidationError::FixedDigitsExceeded {
                value: text.to_string(),
                fixed_digits,
            });
        }

        let value: i64 = text.parse().map_err(|_| {
            if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
                ValidationError::OutOfRange {
                    value: text.to_string(),
                }
            } else {
                ValidationError::Malformed {
                    value: text.to_string(),
                    expected: "integer",
                }
            }
        })?;

        if self.min.is_some_and(|min| value < min) || self.max.is_some_and(|max| value > max) {
            return Err(ValidationError::OutOfRange {
                value: text.to_string(),
            });
        }

        Ok(Value::Int(value))
    }

    pub fn render(&self, value: &Value) -> ValidationResult<String> {
        let number = match value {
            Value::Int(i) => *i,
            Value::Str(s) => s.parse::<i64>().map_err(|_| unrenderable(Self::NAME, value))?,
            _ => return Err(unrenderable(Self::NAME, value)),
        };

        Ok(match self.fixed_digits {
            Some(width) => format!("{number:0width$}", width = width as usize),
            None => number.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloatConverter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FloatConverter {
    pub const NAME: &'static str = "float";

    pub fn from_args(args: &ConverterArgs) -> ConverterResult<Converter> {
        let bound = args.bind(Self::NAME, ["min", "max"])?;
        let (min, max) = (bound.float(0)?, bound.float(1)?);
        if let (Some(lo), Some(hi)) = (min, max)
            && lo > hi
        {
            return Err(bound.value_error(1, format!("max {hi} is smaller than min {lo}")));
        }
        Ok(Converter::Float(FloatConverter { min, max }))
    }

    pub fn parse(&self, text: &str) -> ValidationResult<Value> {
        let value: f64 = text.parse().map_err(|_| ValidationError::Malformed {
            value: text.to_string(),
            expected: "float",
        })?;

        if self.min.is_some_and(|min| value < min) || self.max.is_some_and(|max| value > max) {
            return Err(ValidationError::OutOfRange {
                value: text.to_string(),
            });
        }

        Ok(Value::Float(value))
    }

    pub fn render(&self, value: &Value) -> ValidationResult<String> {
        #[allow(clippy::cast_precision_loss)]
        let number = match value {
            Value::Float(v) => *v,
            Value::Int(i) => *i as f64,
            Value::Str(s) => s.parse::<f64>().map_err(|_| unrenderable(Self::NAME, value))?,
            Value::Uuid(_) => return Err(unrenderable(Self::NAME, value)),
        };

        if !number.is_finite() {
            return Err(unrenderable(Self::NAME, value));
        }

        Ok(format_float(number))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidConverter;

impl UuidConverter {
    pub const NAME: &'static str = "uuid";

    pub fn from_args(args: &ConverterArgs) -> ConverterResult<Converter> {
        args.bind(Self::NAME, [])?;
        Ok(Converter::Uuid(UuidConverter))
    }

    pub fn parse(&self, text: &str) -> ValidationResult<Value> {
        Uuid::parse_str(text)
            .map(Value::Uuid)
            .map_err(|_| ValidationError::Malformed {
                value: text.to_string(),
                expected: "uuid",
            })
    }

    pub fn render(&self, value: &Value) -> ValidationResult<String> {
        let uuid = match value {
            Value::Uuid(u) => *u,
            Value::Str(s) => Uuid::parse_str(s).map_err(|_| unrenderable(Self::NAME, value))?,
            _ => return Err(unrenderable(Self::NAME, value)),
        };
        Ok(uuid.hyphenated().to_string())
    }
}

fn unrenderable(converter: &'static str, value: &Value) -> ValidationError {
    ValidationError::Unrenderable {
        converter,
        value: format!("{} {}", value.kind(), value),
    }
}
