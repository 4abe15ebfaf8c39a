use halkit::{CaseStyle, EmbeddedSpec, HalError, HalSerializer, OptionSpec, Schema};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

fn counting_serializer() -> HalSerializer {
    let mut serializer = HalSerializer::new();
    serializer.register_default(
        "articles",
        Schema::new().top_level_meta(
            OptionSpec::new().field_fn("count", |extra, _| Ok(extra.get("count").cloned())),
        ),
    );
    serializer
}

// ── Registration lookups ─────────────────────────────────────────

#[test]
fn unregistered_type_fails() {
    let serializer = counting_serializer();
    let err = serializer.serialize("authors", &json!({}), None, &Value::Null).unwrap_err();
    assert!(matches!(err, HalError::UnregisteredType(_)));
    assert_eq!(err.to_string(), "no type registered for authors");
}

#[test]
fn unregistered_schema_fails() {
    let serializer = counting_serializer();
    let err = serializer
        .serialize("articles", &json!({}), Some("custom"), &Value::Null)
        .unwrap_err();
    assert!(matches!(err, HalError::UnregisteredSchema { .. }));
    assert_eq!(err.to_string(), "no schema custom registered for articles");
}

#[test]
fn unregistered_relation_type_fails() {
    let mut serializer = HalSerializer::new();
    serializer.register_default("articles", Schema::new().embed("author", EmbeddedSpec::new("people")));

    let err = serializer
        .serialize("articles", &json!({"id": "1"}), None, &Value::Null)
        .unwrap_err();
    assert!(matches!(err, HalError::UnregisteredType(t) if t == "people"));
}

// ── Empty payloads ───────────────────────────────────────────────

#[test]
fn empty_single_without_top_level_options_is_null() {
    let mut serializer = HalSerializer::new();
    serializer.register_default("articles", Schema::new());

    assert_eq!(serializer.serialize("articles", &json!({}), None, &Value::Null).unwrap(), Value::Null);
    assert_eq!(serializer.serialize("articles", &Value::Null, None, &Value::Null).unwrap(), Value::Null);
}

#[test]
fn empty_collection_without_top_level_options_is_empty_array() {
    let mut serializer = HalSerializer::new();
    serializer.register_default("articles", Schema::new());

    assert_eq!(serializer.serialize("articles", &json!([]), None, &Value::Null).unwrap(), json!([]));
}

#[test]
fn empty_single_keeps_top_level_meta() {
    let serializer = counting_serializer();
    let doc = serializer
        .serialize("articles", &json!({}), None, &json!({"count": 0}))
        .unwrap();
    assert_eq!(doc, json!({"count": 0}));
}

#[test]
fn empty_collection_keeps_embedded_array_and_meta() {
    let serializer = counting_serializer();
    let doc = serializer
        .serialize("articles", &json!([]), None, &json!({"count": 0}))
        .unwrap();
    assert_eq!(doc, json!({"count": 0, "_embedded": {"articles": []}}));
}

// ── Envelope ─────────────────────────────────────────────────────

#[test]
fn custom_schema_by_name() {
    let mut serializer = HalSerializer::new();
    serializer.register("articles", "only-title", Schema::new().whitelist(["title"]));

    let doc = serializer
        .serialize(
            "articles",
            &json!({"id": "1", "title": "JSON API paints my bikeshed!", "body": "The shortest article. Ever."}),
            Some("only-title"),
            &Value::Null,
        )
        .unwrap();
    assert_eq!(doc, json!({"title": "JSON API paints my bikeshed!"}));
}

#[test]
fn top_level_meta_is_flat_and_body_wins_collisions() {
    let mut serializer = HalSerializer::new();
    serializer.register_default(
        "articles",
        Schema::new()
            .top_level_meta(OptionSpec::new().field("title", json!("from meta")).field("version", json!(1))),
    );

    let doc = serializer
        .serialize("articles", &json!({"title": "from body"}), None, &Value::Null)
        .unwrap();
    assert_eq!(doc, json!({"title": "from body", "version": 1}));
}

#[test]
fn resource_links_override_top_level_links() {
    let mut serializer = HalSerializer::new();
    serializer.register_default(
        "articles",
        Schema::new()
            .top_level_links(OptionSpec::new().field("self", json!({"href": "/articles"})))
            .links(OptionSpec::new().field_fn("self", |data, _| {
                Ok(Some(json!({"href": format!("/articles/{}", data["id"].as_str().unwrap_or_default())})))
            })),
    );

    let single = serializer
        .serialize("articles", &json!({"id": "9"}), None, &Value::Null)
        .unwrap();
    assert_eq!(single["_links"], json!({"self": {"href": "/articles/9"}}));

    let collection = serializer
        .serialize("articles", &json!([{"id": "9"}]), None, &Value::Null)
        .unwrap();
    assert_eq!(collection["_links"], json!({"self": {"href": "/articles"}}));
    assert_eq!(
        collection["_embedded"]["articles"][0]["_links"],
        json!({"self": {"href": "/articles/9"}})
    );
}

#[test]
fn relation_links_stay_on_the_parent() {
    let mut serializer = HalSerializer::new();
    serializer.register_default("people", Schema::new());
    serializer.register_default(
        "articles",
        Schema::new().embed(
            "author",
            EmbeddedSpec::new("people").links(OptionSpec::from_fn(|data, _| {
                let id = data["id"].as_str().unwrap_or_default();
                Ok(Some(json!({"href": format!("/peoples/{id}")})))
            })),
        ),
    );

    let doc = serializer
        .serialize("articles", &json!({"id": "1", "author": {"id": "7", "name": "A"}}), None, &Value::Null)
        .unwrap();

    assert_eq!(
        doc,
        json!({
            "_links": {"author": {"href": "/peoples/7"}},
            "id": "1",
            "_embedded": {"author": {"id": "7", "name": "A"}}
        })
    );
}

#[test]
fn top_level_options_see_extra_then_payload() {
    let mut serializer = HalSerializer::new();
    serializer.register_default(
        "articles",
        Schema::new().top_level_meta(OptionSpec::from_fn(|extra, data| {
            Ok(Some(json!({
                "page": extra["page"],
                "size": data.as_array().map(Vec::len).unwrap_or(1)
            })))
        })),
    );

    let doc = serializer
        .serialize("articles", &json!([{"id": "1"}, {"id": "2"}]), None, &json!({"page": 3}))
        .unwrap();
    assert_eq!(doc["page"], json!(3));
    assert_eq!(doc["size"], json!(2));
}

#[test]
fn resource_links_receive_extra_as_context() {
    let mut serializer = HalSerializer::new();
    serializer.register_default(
        "articles",
        Schema::new().links(OptionSpec::new().field_fn("self", |data, extra| {
            Ok(Some(json!({"href": format!("{}/articles/{}", extra["base"].as_str().unwrap_or(""), data["id"])})))
        })),
    );

    let doc = serializer
        .serialize("articles", &json!({"id": 4}), None, &json!({"base": "https://api.test"}))
        .unwrap();
    assert_eq!(doc["_links"]["self"]["href"], json!("https://api.test/articles/4"));
}

#[test]
fn failing_link_function_aborts_the_call() {
    let mut serializer = HalSerializer::new();
    serializer.register_default(
        "articles",
        Schema::new().links(OptionSpec::from_fn(|data, _| {
            if data["id"] == json!("2") {
                anyhow::bail!("cannot link article 2");
            }
            Ok(None)
        })),
    );

    let err = serializer
        .serialize("articles", &json!([{"id": "1"}, {"id": "2"}]), None, &Value::Null)
        .unwrap_err();
    assert!(matches!(err, HalError::Resolver(_)));
    assert_eq!(err.to_string(), "cannot link article 2");
}

#[test]
fn case_conversion_applies_to_attributes_and_embedded_keys() {
    let mut serializer = HalSerializer::new();
    serializer.register_default("people", Schema::new().convert_case(CaseStyle::KebabCase));
    serializer.register_default(
        "articles",
        Schema::new()
            .convert_case(CaseStyle::KebabCase)
            .embed("mainAuthor", EmbeddedSpec::new("people")),
    );

    let doc = serializer
        .serialize(
            "articles",
            &json!({"createdAt": "now", "mainAuthor": {"firstName": "Jane"}}),
            None,
            &Value::Null,
        )
        .unwrap();
    assert_eq!(
        doc,
        json!({
            "created-at": "now",
            "_embedded": {"main-author": {"first-name": "Jane"}}
        })
    );
}

// ── Configuration entry points ───────────────────────────────────

#[test]
fn register_json_defaults_and_validation() {
    let mut serializer = HalSerializer::new();
    serializer.register_json("articles", None, Value::Null).unwrap();
    serializer
        .register_json("articles", Some("public"), json!({"blacklist": "secret"}))
        .unwrap();

    let doc = serializer
        .serialize("articles", &json!({"id": "1", "secret": "x"}), Some("public"), &Value::Null)
        .unwrap();
    assert_eq!(doc, json!({"id": "1"}));

    let err = serializer
        .register_json("bad", None, json!({"blacklist": {"bad": "badOptions"}}))
        .unwrap_err();
    assert!(matches!(err, HalError::ConfigValidation(_)));
    assert!(!serializer.registry().contains_type("bad"));
}

// ── Typed payloads ───────────────────────────────────────────────

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Article {
    id: String,
    title: String,
}

#[test]
fn typed_round_trip() {
    let mut serializer = HalSerializer::new();
    serializer.register_default(
        "articles",
        Schema::new().links(OptionSpec::from_fn(|data, _| {
            Ok(Some(json!({"self": {"href": format!("/articles/{}", data["id"].as_str().unwrap_or_default())}})))
        })),
    );

    let article = Article { id: "1".into(), title: "Typed".into() };
    let doc = serializer.to_hal("articles", &article, None, &Value::Null).unwrap();
    assert_eq!(doc["_links"]["self"]["href"], json!("/articles/1"));

    let back: Article = serializer.from_hal("articles", &doc, None).unwrap().unwrap();
    assert_eq!(back, article);
}
