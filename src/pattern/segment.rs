use crate::converter::{Converter, ConverterArgs};

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Variable(VariableSegment),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableSegment {
    pub converter: String,
    pub args: ConverterArgs,
    pub name: String,
}

impl Segment {
    pub fn is_variable(&self) -> bool {
        matches!(self, Segment::Variable(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompiledSegment {
    Literal(String),
    Variable { name: String, converter: Converter },
}
