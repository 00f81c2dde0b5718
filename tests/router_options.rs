use rulemap_router_rs::router::{
    DEFAULT_MAX_RULES, DEFAULT_SCHEME, MAX_RULES_LIMIT, RouterConfigError, RouterOptionsBuilder,
};
use rulemap_router_rs::{RouteMap, Router, RouterError, RouterOptions};

#[test]
fn router_options_when_defaulted_then_values_are_strict() {
    let options = RouterOptions::default();

    assert!(options.strict_slashes);
    assert!(options.automatic_head);
    assert_eq!(options.max_rules, DEFAULT_MAX_RULES);
    assert_eq!(options.default_scheme, DEFAULT_SCHEME);
    assert!(options.validate().is_ok());
}

#[test]
fn router_options_when_all_fields_customized_then_values_are_assigned() {
    let options = RouterOptionsBuilder::default()
        .strict_slashes(false)
        .automatic_head(false)
        .max_rules(10)
        .default_scheme("https")
        .build()
        .expect("router options should build");

    assert!(!options.strict_slashes);
    assert!(!options.automatic_head);
    assert_eq!(options.max_rules, 10);
    assert_eq!(options.default_scheme, "https");

    let router = Router::new(Some(options.clone())).expect("router should build");
    assert_eq!(router.options(), options);
}

#[test]
fn router_options_when_max_rules_zero_then_returns_error() {
    let err = RouterOptions::builder().max_rules(0).build();
    assert_eq!(
        err.expect_err("expected invalid max rules"),
        RouterConfigError::MaxRulesInvalid { provided: 0 }
    );
}

#[cfg(target_pointer_width = "64")]
#[test]
fn router_options_when_max_rules_exceeds_id_space_then_returns_error() {
    let err = RouterOptions::builder()
        .max_rules(MAX_RULES_LIMIT + 1)
        .build();
    assert_eq!(
        err.expect_err("expected invalid max rules"),
        RouterConfigError::MaxRulesInvalid {
            provided: MAX_RULES_LIMIT + 1
        }
    );
    assert!(
        RouterOptions::builder()
            .max_rules(MAX_RULES_LIMIT)
            .build()
            .is_ok()
    );
}

#[test]
fn router_options_when_scheme_invalid_then_returns_error() {
    for scheme in ["", "1http", "ht tp", "web/socket"] {
        match RouterOptions::builder().default_scheme(scheme).build() {
            Err(RouterConfigError::InvalidScheme { scheme: reported }) => {
                assert_eq!(reported, scheme);
            }
            other => panic!("unexpected result for '{scheme}': {other:?}"),
        }
    }
    assert!(
        RouterOptions::builder()
            .default_scheme("git+ssh")
            .build()
            .is_ok()
    );
}

#[test]
fn router_options_when_invalid_then_router_and_map_refuse_them() {
    let options = RouterOptions {
        max_rules: 0,
        ..RouterOptions::default()
    };

    match Router::new(Some(options.clone())).expect_err("expected config error") {
        RouterError::Config(RouterConfigError::MaxRulesInvalid { provided }) => {
            assert_eq!(provided, 0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(RouteMap::with_options(options).is_err());
}

#[test]
fn router_options_when_automatic_head_disabled_then_get_stays_alone() {
    let options = RouterOptions::builder()
        .automatic_head(false)
        .build()
        .expect("options should build");
    let mut map = RouteMap::with_options(options).expect("map should build");
    let id = map
        .add(rulemap_router_rs::Rule::new(
            "/x",
            [rulemap_router_rs::HttpMethod::Get],
            "x",
        ))
        .expect("rule should register");

    assert_eq!(
        map.rule(id).expect("rule exists").methods(),
        rulemap_router_rs::MethodSet::GET
    );
}

#[test]
fn router_options_when_deserialized_then_missing_fields_use_defaults() {
    let options: RouterOptions =
        serde_json::from_str(r#"{"strict_slashes": false, "default_scheme": "https"}"#)
            .expect("options should deserialize");

    assert!(!options.strict_slashes);
    assert!(options.automatic_head);
    assert_eq!(options.max_rules, DEFAULT_MAX_RULES);
    assert_eq!(options.default_scheme, "https");

    let encoded = serde_json::to_value(&options).expect("options should serialize");
    assert_eq!(encoded["max_rules"], serde_json::json!(DEFAULT_MAX_RULES));
}
