//! Shared fixtures: a small blog with articles, people, tags, photos and
//! comments.

#![allow(dead_code)]

use halkit::{EmbeddedSpec, HalSerializer, OptionSpec, Schema};
use serde_json::{Value, json};

pub fn href(prefix: &str, id: &Value) -> Value {
    let id = match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    json!({ "href": format!("{prefix}/{id}") })
}

/// Registers the blog schemas used across the integration tests.
pub fn blog_serializer() -> HalSerializer {
    let mut serializer = HalSerializer::new();

    serializer.register_default(
        "article",
        Schema::new()
            .blacklist(["updated"])
            .links(OptionSpec::from_fn(|data, _| {
                Ok(Some(json!({ "self": href("/articles", &data["id"]) })))
            }))
            .embed(
                "author",
                EmbeddedSpec::new("people").links(OptionSpec::from_fn(|data, _| {
                    // Populated authors carry their id; bare ids are the value itself.
                    let id = data.get("id").unwrap_or(data);
                    Ok(Some(href("/peoples", id)))
                })),
            )
            .embed("tags", EmbeddedSpec::new("tag"))
            .embed("photos", EmbeddedSpec::new("photo"))
            .embed("comments", EmbeddedSpec::new("comment").schema("only-body"))
            .top_level_meta(OptionSpec::new().field_fn("count", |extra, _| Ok(extra.get("count").cloned())))
            .top_level_links(OptionSpec::new().field("self", json!({ "href": "/articles" }))),
    );
    serializer.register_default(
        "people",
        Schema::new().links(OptionSpec::from_fn(|data, _| {
            Ok(Some(json!({ "self": href("/peoples", &data["id"]) })))
        })),
    );
    serializer.register_default("tag", Schema::new());
    serializer.register_default("photo", Schema::new());
    serializer.register("comment", "only-body", Schema::new().whitelist(["body"]));

    serializer
}

pub fn articles() -> Value {
    json!([
        {
            "id": "1",
            "title": "HAL Hypertext Application Language",
            "body": "The shortest article. Ever.",
            "created": "2015-05-22T14:56:29.000Z",
            "updated": "2015-05-22T14:56:28.000Z",
            "author": {
                "id": "1",
                "firstName": "Kaley",
                "lastName": "Maggio",
                "email": "Kaley-Maggio@example.com",
                "age": "80",
                "gender": "male"
            },
            "tags": ["1", "2"],
            "photos": [
                "ed70cf44-9a34-4878-84e6-0c0e4a450cfe",
                "24ba3666-a593-498c-9f5d-55a4ee08c72e"
            ],
            "comments": [
                { "_id": "1", "body": "First !", "created": "2015-08-14T18:42:16.475Z" },
                { "_id": "2", "body": "I Like !", "created": "2015-09-14T18:42:12.475Z" },
                { "_id": "3", "body": "Awesome", "created": "2015-09-15T18:42:12.475Z" }
            ]
        },
        {
            "id": "2",
            "title": "draft-kelly-json-hal-07",
            "body": "HAL specifications",
            "created": "2015-05-23T14:56:29.000Z",
            "updated": "2015-05-24T14:56:28.000Z",
            "author": {
                "id": "2",
                "firstName": "Harold",
                "lastName": "Marvin",
                "email": "Harold-Marvin@example.com",
                "age": "33",
                "gender": "female"
            },
            "tags": ["2"],
            "photos": ["f386492d-df61-4573-b4e3-54f6f5d08acf"],
            "comments": [
                { "_id": "4", "body": "Recommended", "created": "2015-08-14T18:42:16.475Z" },
                { "_id": "5", "body": "Really nice", "created": "2015-09-14T18:42:12.475Z" },
                { "_id": "6", "body": "Awesome", "created": "2015-09-15T18:42:12.475Z" }
            ]
        }
    ])
}
