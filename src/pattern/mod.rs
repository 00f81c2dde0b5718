mod arguments;
mod compiled;
mod error;
mod parser;
mod segment;

pub use arguments::parse_converter_args;
pub use compiled::{CompiledPattern, RawCaptures, SlashMode};
pub use error::{PatternError, PatternResult};
pub use parser::parse_template;
pub use segment::{CompiledSegment, Segment, VariableSegment};
