use rulemap_router_rs::converter::{ArgValue, DEFAULT_CONVERTER};
use rulemap_router_rs::pattern::{PatternError, Segment, parse_template};

fn variable_parts(segments: &[Segment]) -> Vec<(&str, &str)> {
    segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Variable(var) => Some((var.converter.as_str(), var.name.as_str())),
            Segment::Literal(_) => None,
        })
        .collect()
}

#[test]
fn template_when_static_then_yields_single_literal() {
    let segments = parse_template("/about/team").expect("static template should parse");
    assert_eq!(segments, vec![Segment::Literal("/about/team".into())]);
}

#[test]
fn template_when_placeholders_present_then_literals_surround_each() {
    let segments = parse_template("/<a><int:b>").expect("template should parse");

    assert_eq!(segments.len(), 5);
    assert_eq!(segments[0], Segment::Literal("/".into()));
    assert!(segments[1].is_variable());
    assert_eq!(segments[2], Segment::Literal(String::new()));
    assert!(segments[3].is_variable());
    assert_eq!(segments[4], Segment::Literal(String::new()));
    assert_eq!(
        variable_parts(&segments),
        vec![(DEFAULT_CONVERTER, "a"), ("int", "b")]
    );
}

#[test]
fn template_when_converter_has_arguments_then_they_are_parsed() {
    let segments = parse_template("/page/<int(fixed_digits=3):page>/<any('a', 'b,c'):kind>")
        .expect("template should parse");

    let vars: Vec<_> = segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Variable(var) => Some(var),
            Segment::Literal(_) => None,
        })
        .collect();

    assert_eq!(vars[0].converter, "int");
    assert_eq!(
        vars[0].args.keyword.as_slice(),
        &[("fixed_digits".to_string(), ArgValue::Int(3))]
    );
    assert_eq!(vars[1].converter, "any");
    assert_eq!(
        vars[1].args.positional.as_slice(),
        &[ArgValue::Str("a".into()), ArgValue::Str("b,c".into())]
    );
}

#[test]
fn template_when_leading_slash_missing_then_returns_error() {
    match parse_template("about").expect_err("expected missing slash error") {
        PatternError::MissingLeadingSlash { template } => assert_eq!(template, "about"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn template_when_placeholder_unterminated_then_returns_error() {
    match parse_template("/users/<id").expect_err("expected unterminated error") {
        PatternError::UnterminatedPlaceholder { index, .. } => assert_eq!(index, 7),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn template_when_placeholder_malformed_then_reports_offending_character() {
    match parse_template("/users/<int:id-x>").expect_err("expected invalid placeholder") {
        PatternError::InvalidPlaceholder { found, .. } => assert_eq!(found, '-'),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn template_when_arguments_unterminated_then_returns_error() {
    assert!(matches!(
        parse_template("/x/<int(3:id>"),
        Err(PatternError::UnterminatedArguments { .. })
    ));
}

#[test]
fn template_when_variable_starts_with_underscore_then_returns_error() {
    match parse_template("/x/<_id>").expect_err("expected invalid variable name") {
        PatternError::InvalidVariableName { name, .. } => assert_eq!(name, "_id"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn template_when_variable_repeated_then_returns_error() {
    match parse_template("/<id>/<int:id>").expect_err("expected duplicate variable") {
        PatternError::DuplicateVariable { name, .. } => assert_eq!(name, "id"),
        other => panic!("unexpected error: {other:?}"),
    }
}
