mod args;
mod builtin;
mod error;
mod registry;
mod value;

pub use args::{ArgValue, ConverterArgs};
pub use builtin::{
    AnyConverter, Converter, DEFAULT_WEIGHT, FloatConverter, IntegerConverter, NUMERIC_WEIGHT,
    PATH_WEIGHT, PathConverter, StringConverter, UuidConverter,
};
pub use error::{ConverterError, ConverterResult, ValidationError, ValidationResult};
pub use registry::{ConverterFactory, ConverterRegistry, DEFAULT_CONVERTER};
pub use value::Value;
