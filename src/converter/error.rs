use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConverterError {
    #[error("converter '{converter}' accepts at most {max} positional arguments (got {given})")]
    TooManyArguments {
        converter: &'static str,
        max: usize,
        given: usize,
    },
    #[error("converter '{converter}' has no argument named '{name}'")]
    UnknownArgument {
        converter: &'static str,
        name: String,
    },
    #[error("converter '{converter}' received argument '{name}' more than once")]
    DuplicateArgument {
        converter: &'static str,
        name: String,
    },
    #[error("argument '{name}' of converter '{converter}' must be {expected} (got {found})")]
    InvalidArgumentType {
        converter: &'static str,
        name: String,
        expected: &'static str,
        found: String,
    },
    #[error("argument '{name}' of converter '{converter}' is out of range: {reason}")]
    InvalidArgumentValue {
        converter: &'static str,
        name: String,
        reason: String,
    },
    #[error("converter 'any' requires at least one item")]
    AnyWithoutItems,
}

pub type ConverterResult<T> = Result<T, ConverterError>;

/// Raised while converting matched text or rendering a value. Matching
/// treats it as "this rule does not match"; building reports it.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("'{value}' has more than {fixed_digits} digits")]
    FixedDigitsExceeded { value: String, fixed_digits: u32 },
    #[error("'{value}' is outside the allowed range")]
    OutOfRange { value: String },
    #[error("'{value}' is not a valid {expected}")]
    Malformed {
        value: String,
        expected: &'static str,
    },
    #[error("converter '{converter}' cannot render value '{value}'")]
    Unrenderable {
        converter: &'static str,
        value: String,
    },
}

pub type ValidationResult<T> = Result<T, ValidationError>;
