use rulemap_router_rs::pattern::PatternError;
use rulemap_router_rs::rule::{BuildKey, RuleMatch};
use rulemap_router_rs::{HttpMethod, MethodSet, RouteMap, Rule, RuleError, Value, Variables};

fn bound(template: &str) -> (RouteMap, rulemap_router_rs::RuleId) {
    let mut map = RouteMap::new();
    let id = map
        .add(Rule::new(template, [HttpMethod::Get], "endpoint"))
        .expect("rule should bind");
    (map, id)
}

fn matched(map: &RouteMap, id: rulemap_router_rs::RuleId, path: &str) -> Option<RuleMatch> {
    map.rule(id)
        .expect("rule should exist")
        .match_path(path)
        .expect("bound rule should match without error")
}

fn vars<const N: usize>(pairs: [(&str, Value); N]) -> Variables {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

#[test]
fn rule_when_static_leaf_then_matches_exact_path_only() {
    let (map, id) = bound("/about");

    let hit = matched(&map, id, "/about").expect("exact path should match");
    assert!(hit.variables.is_empty());
    assert!(!hit.needs_redirect);
    assert!(matched(&map, id, "/about/").is_none());
    assert!(matched(&map, id, "/abou").is_none());
}

#[test]
fn rule_when_branch_without_trailing_slash_requested_then_needs_redirect() {
    let (map, id) = bound("/docs/");

    let with_slash = matched(&map, id, "/docs/").expect("branch path should match");
    assert!(!with_slash.needs_redirect);

    let without_slash = matched(&map, id, "/docs").expect("branch path should match");
    assert!(without_slash.needs_redirect);
}

#[test]
fn rule_when_branch_not_strict_then_trailing_slash_is_required() {
    let mut map = RouteMap::new();
    let id = map
        .add(Rule::new("/docs/", [HttpMethod::Get], "docs").with_strict_slashes(false))
        .expect("rule should bind");

    assert!(matched(&map, id, "/docs").is_none());
    let hit = matched(&map, id, "/docs/").expect("exact branch path should match");
    assert!(!hit.needs_redirect);
}

#[test]
fn rule_when_path_ends_with_double_slash_then_does_not_match() {
    let (map, id) = bound("/files/<path:rest>/");

    assert!(matched(&map, id, "/files/a/b//").is_none());
    let hit = matched(&map, id, "/files/a/b/").expect("single trailing slash should match");
    assert_eq!(hit.variables.get("rest"), Some(&Value::from("a/b")));
}

#[test]
fn rule_when_typed_variable_present_then_converts_value() {
    let (map, id) = bound("/user/<int:id>/<name>");

    let hit = matched(&map, id, "/user/42/ada").expect("typed path should match");
    assert_eq!(hit.variables.get("id"), Some(&Value::Int(42)));
    assert_eq!(hit.variables.get("name"), Some(&Value::from("ada")));
    assert!(matched(&map, id, "/user/abc/ada").is_none());
    assert!(matched(&map, id, "/user/42/").is_none());
}

#[test]
fn rule_when_converter_rejects_text_then_reports_no_match() {
    let (map, id) = bound("/page/<int(fixed_digits=2):n>");

    assert!(matched(&map, id, "/page/07").is_some());
    assert!(matched(&map, id, "/page/007").is_none());
}

#[test]
fn rule_when_not_bound_then_operations_return_error() {
    let rule = Rule::new("/loose", [HttpMethod::Get], "loose");

    assert!(!rule.is_bound());
    assert!(matches!(
        rule.match_path("/loose"),
        Err(RuleError::NotBound { .. })
    ));
    assert!(matches!(
        rule.build(&Variables::new()),
        Err(RuleError::NotBound { .. })
    ));
    assert!(matches!(rule.match_key(), Err(RuleError::NotBound { .. })));
}

#[test]
fn rule_when_bound_twice_then_returns_error() {
    let first = RouteMap::new();
    let second = RouteMap::new();
    let mut rule = Rule::new("/twice", [HttpMethod::Get], "twice");

    rule.bind(&first).expect("first bind should succeed");
    assert_eq!(rule.bound_map(), Some(first.id()));

    match rule.bind(&second).expect_err("expected already bound error") {
        RuleError::AlreadyBound { template, map } => {
            assert_eq!(template, "/twice");
            assert_eq!(map, first.id());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rule_when_no_methods_given_then_bind_fails() {
    let mut map = RouteMap::new();
    let err = map.add(Rule::new("/none", Vec::<HttpMethod>::new(), "none"));

    match err.expect_err("expected empty methods error") {
        RuleError::EmptyMethods { template } => assert_eq!(template, "/none"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rule_when_get_accepted_then_head_is_added() {
    let mut map = RouteMap::new();
    let get = map
        .add(Rule::new("/get", [HttpMethod::Get], "get"))
        .expect("rule should bind");
    let post = map
        .add(Rule::new("/post", [HttpMethod::Post], "post"))
        .expect("rule should bind");

    let get_methods = map.rule(get).expect("rule exists").methods();
    assert_eq!(get_methods, MethodSet::GET | MethodSet::HEAD);
    assert_eq!(map.rule(post).expect("rule exists").methods(), MethodSet::POST);
}

#[test]
fn rule_when_built_then_renders_each_variable() {
    let (map, id) = bound("/page/<int(fixed_digits=3):n>/<slug>");
    let rule = map.rule(id).expect("rule exists");

    let path = rule
        .build(&vars([("n", Value::Int(5)), ("slug", Value::from("intro"))]))
        .expect("rule should build");
    assert_eq!(path, "/page/005/intro");
}

#[test]
fn rule_when_build_values_mismatch_then_reports_variable() {
    let (map, id) = bound("/item/<int:id>");
    let rule = map.rule(id).expect("rule exists");

    match rule.build(&Variables::new()).expect_err("expected missing value") {
        RuleError::MissingValue { name, .. } => assert_eq!(name, "id"),
        other => panic!("unexpected error: {other:?}"),
    }

    let extra = vars([("id", Value::Int(1)), ("page", Value::Int(2))]);
    match rule.build(&extra).expect_err("expected unexpected value") {
        RuleError::UnexpectedValue { name, .. } => assert_eq!(name, "page"),
        other => panic!("unexpected error: {other:?}"),
    }

    let wrong = vars([("id", Value::from("seven"))]);
    match rule.build(&wrong).expect_err("expected render error") {
        RuleError::Render { variable, .. } => assert_eq!(variable, "id"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rule_when_checking_buildable_then_requires_exact_variables_and_method() {
    let (map, id) = bound("/item/<int:id>");
    let rule = map.rule(id).expect("rule exists");
    let values = vars([("id", Value::Int(1))]);

    assert_eq!(rule.buildable(&values, None), Ok(true));
    assert_eq!(rule.buildable(&values, Some(HttpMethod::Head)), Ok(true));
    assert_eq!(rule.buildable(&values, Some(HttpMethod::Post)), Ok(false));
    assert_eq!(rule.buildable(&Variables::new(), None), Ok(false));
    assert_eq!(
        rule.buildable(&vars([("id", Value::Int(1)), ("x", Value::Int(2))]), None),
        Ok(false)
    );
}

#[test]
fn rule_keys_when_compared_then_follow_specificity() {
    let mut map = RouteMap::new();
    let literal = map
        .add(Rule::new("/a/b", [HttpMethod::Get], "literal"))
        .expect("rule should bind");
    let int = map
        .add(Rule::new("/a/<int:x>", [HttpMethod::Get], "int"))
        .expect("rule should bind");
    let string = map
        .add(Rule::new("/a/<x>", [HttpMethod::Get], "string"))
        .expect("rule should bind");
    let path = map
        .add(Rule::new("/a/<path:x>", [HttpMethod::Get], "path"))
        .expect("rule should bind");

    let key = |id| {
        map.rule(id)
            .expect("rule exists")
            .match_key()
            .expect("bound rule has a key")
            .clone()
    };

    assert!(!key(literal).has_variables);
    assert!(key(literal) < key(int));
    assert!(key(int) < key(string));
    assert!(key(string) < key(path));
}

#[test]
fn rule_build_key_when_more_variables_then_sorts_first() {
    let (map, id) = bound("/<a>/<b>");
    let rule = map.rule(id).expect("rule exists");

    assert_eq!(rule.build_key(), Ok(BuildKey(-2)));
    assert_eq!(
        rule.variable_names().expect("bound").collect::<Vec<_>>(),
        vec!["a", "b"]
    );
}

#[test]
fn rule_when_variable_repeated_then_add_fails_with_configuration_error() {
    let mut map = RouteMap::new();
    let err = map.add(Rule::new("/<id>/<id>", [HttpMethod::Get], "dup"));

    match err.expect_err("expected duplicate variable error") {
        RuleError::Pattern(PatternError::DuplicateVariable { template, name }) => {
            assert_eq!(template, "/<id>/<id>");
            assert_eq!(name, "id");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(map.is_empty());
}

#[test]
fn rule_when_converter_unknown_then_add_fails_with_configuration_error() {
    let mut map = RouteMap::new();
    let err = map.add(Rule::new("/<bogus:x>", [HttpMethod::Get], "bogus"));

    match err.expect_err("expected unknown converter error") {
        RuleError::Pattern(PatternError::UnknownConverter { converter, .. }) => {
            assert_eq!(converter, "bogus");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(map.is_empty());
}

#[test]
fn rule_when_digits_are_not_ascii_then_numeric_converters_do_not_match() {
    let (map, id) = bound("/n/<int:n>");
    assert!(matched(&map, id, "/n/\u{0664}\u{0662}").is_none());

    let (map, id) = bound("/f/<float:x>");
    assert!(matched(&map, id, "/f/\u{0664}.\u{0662}").is_none());
    assert!(matched(&map, id, "/f/4.2").is_some());
}
