use crate::converter::ConverterError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
    #[error("rule '{template}' does not start with a slash")]
    MissingLeadingSlash { template: String },
    #[error("placeholder opened at index {index} in '{template}' is never closed")]
    UnterminatedPlaceholder { template: String, index: usize },
    #[error("unexpected character '{found}' at index {index} in placeholder of '{template}'")]
    InvalidPlaceholder {
        template: String,
        index: usize,
        found: char,
    },
    #[error("converter arguments opened at index {index} in '{template}' are never closed")]
    UnterminatedArguments { template: String, index: usize },
    #[error("variable name '{name}' in '{template}' must start with an alphabetic character")]
    InvalidVariableName { template: String, name: String },
    #[error("variable name '{name}' used more than once in '{template}'")]
    DuplicateVariable { template: String, name: String },
    #[error("unknown converter '{converter}' in '{template}'")]
    UnknownConverter { template: String, converter: String },
    #[error("converter for variable '{variable}' in '{template}' is misconfigured: {source}")]
    Converter {
        template: String,
        variable: String,
        #[source]
        source: ConverterError,
    },
    #[error("rule '{template}' compiles to an invalid matcher: {error}")]
    RegexInvalid { template: String, error: String },
}

pub type PatternResult<T> = Result<T, PatternError>;
