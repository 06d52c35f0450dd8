//! Property tests for request parameter materialization.

use http::Uri;
use parmenides_extract::{
    materialize, ExtractionContext, ExtractionContextBuilder, ExtractionErrorKind,
    SerializationConfig,
};
use parmenides_macros::Bindable;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Bindable)]
#[serde(default)]
struct Profile {
    name: String,
    age: i64,
    display_name: String,
    nickname: Option<String>,
}

fn uri_with_query(pairs: &[(&str, &str)]) -> Uri {
    let query = serde_urlencoded::to_string(pairs).unwrap();
    Uri::try_from(format!("/profile?{query}")).unwrap()
}

fn with_casing(word: &str, upper: &[bool]) -> String {
    word.chars()
        .zip(upper.iter().chain(std::iter::repeat(&false)))
        .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c })
        .collect()
}

fn run(ctx: &ExtractionContext) -> Profile {
    materialize(ctx, &SerializationConfig::default()).unwrap()
}

proptest! {
    /// Route beats query beats body, whichever sources are present.
    #[test]
    fn prop_source_precedence(
        body in "[a-zA-Z0-9 ]{0,12}",
        query in proptest::option::of("[a-zA-Z0-9 ]{0,12}"),
        route in proptest::option::of("[a-zA-Z0-9]{0,12}"),
    ) {
        let mut builder = ExtractionContextBuilder::new()
            .body(serde_json::json!({ "name": body }).to_string());
        if let Some(query) = &query {
            builder = builder.uri(uri_with_query(&[("name", query)]));
        }
        if let Some(route) = &route {
            builder = builder.route_value("name", route.clone());
        }

        let expected = route.or(query).unwrap_or(body);
        prop_assert_eq!(run(&builder.build()).name, expected);
    }

    /// Query keys bind whatever their casing.
    #[test]
    fn prop_query_keys_ignore_case(
        upper in proptest::collection::vec(any::<bool>(), 4),
        value in "[a-z]{1,10}",
    ) {
        let key = with_casing("name", &upper);
        let ctx = ExtractionContextBuilder::new()
            .uri(uri_with_query(&[(&key, &value)]))
            .build();

        prop_assert_eq!(run(&ctx).name, value);
    }

    /// A lone `code` parameter is never input.
    #[test]
    fn prop_lone_code_is_missing_input(
        upper in proptest::collection::vec(any::<bool>(), 4),
        token in "[A-Za-z0-9]{1,24}",
    ) {
        let key = with_casing("code", &upper);
        let ctx = ExtractionContextBuilder::new()
            .uri(uri_with_query(&[(&key, &token)]))
            .build();

        let err = materialize::<Profile>(&ctx, &SerializationConfig::default()).unwrap_err();
        prop_assert_eq!(err.kind(), ExtractionErrorKind::MissingInput);
    }

    /// Integer text from the query string lands as the integer.
    #[test]
    fn prop_integer_coercion(age in any::<i64>()) {
        let text = age.to_string();
        let ctx = ExtractionContextBuilder::new()
            .uri(uri_with_query(&[("age", &text)]))
            .build();

        prop_assert_eq!(run(&ctx).age, age);
    }

    /// Writing then reading with the same options gives the value back.
    #[test]
    fn prop_body_round_trip(
        name in "[a-zA-Z ]{0,16}",
        age in any::<i64>(),
        display_name in "\\PC{0,16}",
        nickname in proptest::option::of("[a-z]{1,8}"),
    ) {
        let config = SerializationConfig::web();
        let profile = Profile { name, age, display_name, nickname };

        let bytes = config.to_vec(&profile).unwrap();
        let ctx = ExtractionContextBuilder::new().body(bytes).build();

        let decoded: Profile = materialize(&ctx, &config).unwrap();
        prop_assert_eq!(decoded, profile);
    }
}

#[test]
fn test_web_options_write_camel_case_and_read_it_back() {
    let config = SerializationConfig::web();
    let profile = Profile {
        display_name: "Ada L.".to_string(),
        ..Profile::default()
    };

    let json: serde_json::Value = serde_json::from_slice(&config.to_vec(&profile).unwrap()).unwrap();
    assert_eq!(json["displayName"], "Ada L.");
    assert!(json.get("nickname").is_none());

    let ctx = ExtractionContextBuilder::new()
        .body(r#"{"DisplayName":"Grace"}"#)
        .build();
    let decoded: Profile = materialize(&ctx, &config).unwrap();
    assert_eq!(decoded.display_name, "Grace");
}

#[test]
fn test_repeated_query_keys_join_with_commas() {
    let ctx = ExtractionContextBuilder::new()
        .uri(Uri::from_static("/profile?name=a&NAME=b"))
        .build();

    assert_eq!(run(&ctx).name, "a,b");
}
