use crate::converter::{ArgValue, ConverterArgs};

/// Parses a converter argument clause such as `2, max=10, 'a,b'`.
///
/// Items are comma separated; an item is a value or `name=value`. Values are
/// `True`/`False`, decimal integers and floats, bare words, or quoted
/// strings (an optional `u`/`r` prefix is ignored). Anything else is kept
/// verbatim as a string.
pub fn parse_converter_args(raw: &str) -> ConverterArgs {
    let mut args = ConverterArgs::new();

    for item in split_items(raw) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        match split_keyword(item) {
            Some((name, value)) => {
                args.keyword.push((name.to_string(), parse_literal(value)));
            }
            None => args.positional.push(parse_literal(item)),
        }
    }

    args
}

fn split_items(raw: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0usize;

    for (idx, ch) in raw.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch == ',' => {
                items.push(&raw[start..idx]);
                start = idx + 1;
            }
            None => {}
        }
    }
    items.push(&raw[start..]);

    items
}

fn split_keyword(item: &str) -> Option<(&str, &str)> {
    let eq = item.find('=')?;
    let name = item[..eq].trim_end();
    if name.is_empty() || !name.chars().all(is_word_char) {
        return None;
    }
    Some((name, item[eq + 1..].trim_start()))
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

pub(crate) fn parse_literal(text: &str) -> ArgValue {
    match text {
        "True" => return ArgValue::Bool(true),
        "False" => return ArgValue::Bool(false),
        _ => {}
    }

    if let Some(inner) = unquote(text) {
        return ArgValue::Str(inner.to_string());
    }

    if is_decimal_integer(text)
        && let Ok(value) = text.parse::<i64>()
    {
        return ArgValue::Int(value);
    }

    if is_decimal_float(text)
        && let Ok(value) = text.parse::<f64>()
    {
        return ArgValue::Float(value);
    }

    ArgValue::Str(text.to_string())
}

fn unquote(text: &str) -> Option<&str> {
    let body = text
        .strip_prefix(['u', 'r', 'U', 'R'])
        .filter(|rest| rest.starts_with(['"', '\'']))
        .unwrap_or(text);

    let quote = body.chars().next().filter(|ch| *ch == '"' || *ch == '\'')?;
    body.strip_prefix(quote)?.strip_suffix(quote)
}

fn digits(text: &str) -> &str {
    text.strip_prefix('-').unwrap_or(text)
}

fn is_decimal_integer(text: &str) -> bool {
    let body = digits(text);
    !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal_float(text: &str) -> bool {
    let Some((whole, fraction)) = digits(text).split_once('.') else {
        return false;
    };
    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}
