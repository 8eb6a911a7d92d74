//! Round-trip tests for the persisted JSON schema.
//!
//! The store must satisfy serialize(deserialize(x)) == x for every blob the
//! site persists, including the bundled fixtures themselves: a field the
//! Rust schema silently dropped would show up here as a value mismatch.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use portico::model::content::{MarkBook, Profile, SkillBook};
use portico::model::post::{BodyBlock, Post};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src/assets")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("could not read fixture {}: {}", name, e))
}

/// Parse a fixture twice — once into the typed schema, once into a raw
/// JSON value — and assert the typed round-trip loses nothing.
fn assert_value_round_trip<T>(name: &str)
where
    T: serde::de::DeserializeOwned + serde::Serialize,
{
    let raw = fixture(name);
    let typed: T = serde_json::from_str(&raw)
        .unwrap_or_else(|e| panic!("fixture {} does not parse into the schema: {}", name, e));
    let reserialized: serde_json::Value = serde_json::to_value(&typed).unwrap();
    let original: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(reserialized, original, "round-trip mismatch for {}", name);
}

// ============================================================================
// Fixture round-trips
// ============================================================================

#[test]
fn round_trip_posts_fixture() {
    assert_value_round_trip::<Vec<Post>>("posts.json");
}

#[test]
fn round_trip_tags_fixture() {
    assert_value_round_trip::<Vec<String>>("tags.json");
}

#[test]
fn round_trip_users_fixture() {
    assert_value_round_trip::<IndexMap<String, String>>("users.json");
}

#[test]
fn round_trip_profile_fixture() {
    assert_value_round_trip::<Profile>("profile.json");
}

#[test]
fn round_trip_skills_fixture() {
    assert_value_round_trip::<SkillBook>("skills.json");
}

#[test]
fn round_trip_marks_fixture() {
    assert_value_round_trip::<MarkBook>("marks.json");
}

// ============================================================================
// Post schema round-trips
// ============================================================================

#[test]
fn round_trip_post_with_every_block_kind() {
    let post = Post {
        title: "Mixed".into(),
        date: "2025-05-21".into(),
        tags: vec!["a".into(), "b".into()],
        body: vec![
            BodyBlock::text("paragraph one"),
            BodyBlock::images(vec!["x.png".into(), "y.jpeg".into()]),
            BodyBlock::text(""),
            BodyBlock::empty_images(),
        ],
    };
    let json = serde_json::to_string(&post).unwrap();
    let back: Post = serde_json::from_str(&json).unwrap();
    assert_eq!(back, post);
}

#[test]
fn round_trip_post_with_data_url_image() {
    let post = Post {
        title: "Picture post".into(),
        date: "2025-01-01".into(),
        tags: vec![],
        body: vec![BodyBlock::images(vec![
            "data:image/png;base64,iVBORw0KGgo=".into(),
        ])],
    };
    let json = serde_json::to_string(&post).unwrap();
    let back: Post = serde_json::from_str(&json).unwrap();
    assert_eq!(back, post);
}

#[test]
fn round_trip_empty_post_collection() {
    let posts: Vec<Post> = Vec::new();
    let json = serde_json::to_string(&posts).unwrap();
    let back: Vec<Post> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, posts);
}

#[test]
fn block_kind_is_recovered_from_field_names() {
    // The untagged body encoding relies on the field name alone.
    let blocks: Vec<BodyBlock> =
        serde_json::from_str(r#"[{"images":["i.png"]},{"text":"t"}]"#).unwrap();
    assert!(matches!(blocks[0], BodyBlock::Images { .. }));
    assert!(matches!(blocks[1], BodyBlock::Text { .. }));
}
