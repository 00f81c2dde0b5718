use hashbrown::HashSet as FastHashSet;

use super::arguments::parse_converter_args;
use super::segment::{Segment, VariableSegment};
use super::{PatternError, PatternResult};
use crate::converter::{ConverterArgs, DEFAULT_CONVERTER};

/// Splits a rule template into literal and variable segments.
///
/// A literal segment precedes every placeholder and one more closes the
/// sequence, so `/<a><b>` yields `["/", a, "", b, ""]`.
#[tracing::instrument(level = "trace", fields(template = %template))]
pub fn parse_template(template: &str) -> PatternResult<Vec<Segment>> {
    if !template.starts_with('/') {
        return Err(PatternError::MissingLeadingSlash {
            template: template.to_string(),
        });
    }

    let mut parser = TemplateParser::new(template);
    let mut segments = Vec::new();
    let mut seen: FastHashSet<String> = FastHashSet::new();

    loop {
        let literal_start = parser.index;
        let Some(open) = memchr::memchr(b'<', &template.as_bytes()[literal_start..]) else {
            segments.push(Segment::Literal(template[literal_start..].to_string()));
            break;
        };

        let open = literal_start + open;
        segments.push(Segment::Literal(template[literal_start..open].to_string()));
        parser.index = open;

        let variable = parser.parse_placeholder()?;
        if !seen.insert(variable.name.clone()) {
            return Err(PatternError::DuplicateVariable {
                template: template.to_string(),
                name: variable.name,
            });
        }
        segments.push(Segment::Variable(variable));
    }

    Ok(segments)
}

// Works on bytes: every delimiter of the placeholder grammar is ASCII, and
// identifiers are restricted to ASCII.
struct TemplateParser<'a> {
    template: &'a str,
    bytes: &'a [u8],
    index: usize,
}

impl<'a> TemplateParser<'a> {
    fn new(template: &'a str) -> Self {
        Self {
            template,
            bytes: template.as_bytes(),
            index: 0,
        }
    }

    fn parse_placeholder(&mut self) -> PatternResult<VariableSegment> {
        let open = self.index;
        self.expect(b'<');

        let first = self.parse_identifier(open)?;
        let (converter, args, name) = match self.peek() {
            Some(b'(') => {
                let args = self.parse_arguments()?;
                self.consume(b':', open)?;
                let name = self.parse_identifier(open)?;
                (first, args, name)
            }
            Some(b':') => {
                self.next();
                let name = self.parse_identifier(open)?;
                (first, ConverterArgs::new(), name)
            }
            _ => (DEFAULT_CONVERTER.to_string(), ConverterArgs::new(), first),
        };
        self.consume(b'>', open)?;

        if !name.as_bytes()[0].is_ascii_alphabetic() {
            return Err(PatternError::InvalidVariableName {
                template: self.template.to_string(),
                name,
            });
        }

        Ok(VariableSegment {
            converter,
            args,
            name,
        })
    }

    fn parse_identifier(&mut self, open: usize) -> PatternResult<String> {
        let start = self.index;
        while let Some(b) = self.peek() {
            let valid = if self.index == start {
                b.is_ascii_alphabetic() || b == b'_'
            } else {
                b.is_ascii_alphanumeric() || b == b'_'
            };
            if !valid {
                break;
            }
            self.next();
        }

        if self.index == start {
            return Err(self.unexpected(open));
        }
        Ok(self.template[start..self.index].to_string())
    }

    // The clause runs to the first `)` outside of a quoted string.
    fn parse_arguments(&mut self) -> PatternResult<ConverterArgs> {
        let open = self.index;
        self.expect(b'(');
        let start = self.index;
        let mut quote: Option<u8> = None;

        while let Some(b) = self.next() {
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b')') => {
                    let raw = &self.template[start..self.index - 1];
                    return Ok(parse_converter_args(raw));
                }
                (None, _) => {}
            }
        }

        Err(PatternError::UnterminatedArguments {
            template: self.template.to_string(),
            index: open,
        })
    }

    fn consume(&mut self, expected: u8, open: usize) -> PatternResult<()> {
        if self.peek() == Some(expected) {
            self.next();
            Ok(())
        } else {
            Err(self.unexpected(open))
        }
    }

    fn unexpected(&self, open: usize) -> PatternError {
        match self.template[self.index..].chars().next() {
            Some(found) => PatternError::InvalidPlaceholder {
                template: self.template.to_string(),
                index: self.index,
                found,
            },
            None => PatternError::UnterminatedPlaceholder {
                template: self.template.to_string(),
                index: open,
            },
        }
    }

    fn expect(&mut self, expected: u8) {
        let actual = self.next();
        debug_assert_eq!(Some(expected), actual);
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.index).copied()
    }

    fn next(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.index += 1;
        }
        b
    }
}
