use super::*;
use crate::schema::{ForeignKeyType, PropertyType};
use serde_json::{json, Value};

fn schema(value: Value) -> Schema {
    Schema::from_value(value).unwrap()
}

fn emit(value: Value) -> String {
    generate("Test", &schema(value)).unwrap().source
}

fn interface(members: &[&str]) -> String {
    let mut all = members.to_vec();
    all.push(INDEX_SIGNATURE);
    format!("export interface Test {{ {} }}", all.join("\n"))
}

#[test]
fn fields_follow_declaration_order() {
    let out = emit(json!({
        "type": "object",
        "properties": {
            "zeta": { "title": "Z", "type": "string" },
            "alpha": { "title": "A", "type": "number" },
            "flag": { "title": "F", "type": "boolean" }
        }
    }));
    assert_eq!(out, interface(&["zeta?: string;", "alpha?: number;", "flag?: boolean;"]));
}

#[test]
fn required_gates_the_optional_marker() {
    let out = emit(json!({
        "type": "object",
        "properties": {
            "id": { "type": "number" },
            "nickname": { "type": ["string", "null"] }
        },
        "required": ["id"]
    }));
    assert_eq!(out, interface(&["id: number;", "nickname?: string | null;"]));
}

#[test]
fn nullable_strings_either_way_round() {
    let out = emit(json!({
        "type": "object",
        "properties": {
            "a": { "type": ["string", "null"] },
            "b": { "type": ["null", "string"] },
            "c": { "type": ["boolean", "null"] }
        }
    }));
    assert_eq!(out, interface(&["a?: string | null;", "b?: string | null;", "c?: boolean | null;"]));
}

#[test]
fn enum_without_nullability_drops_null_member() {
    let out = emit(json!({
        "type": "object",
        "properties": {
            "kind": { "type": "string", "enum": ["joka", "boka", "test", null] }
        },
        "required": ["kind"]
    }));
    assert_eq!(out, interface(&["kind: 'joka' | 'boka' | 'test';"]));
    assert!(!out.contains("| null"));
}

#[test]
fn enum_with_nullability_ends_in_null() {
    let out = emit(json!({
        "type": "object",
        "properties": {
            "kind": { "type": ["string", "null"], "enum": ["joka", "boka", "test", null] },
            "reversed": { "type": ["string", "null"], "enum": [null, "test", "test2"] }
        }
    }));
    assert_eq!(
        out,
        interface(&[
            "kind?: 'joka' | 'boka' | 'test' | null;",
            "reversed?: 'test' | 'test2' | null;",
        ])
    );
}

#[test]
fn empty_string_enum_member_is_explicit() {
    let out = emit(json!({
        "type": "object",
        "properties": {
            "grade": { "type": "string", "enum": ["", "a"] }
        }
    }));
    assert_eq!(out, interface(&["grade?: '' | 'a';"]));
}

#[test]
fn duplicate_pair_collapses() {
    let out = emit(json!({
        "type": "object",
        "properties": { "name": { "type": ["string", "string"] } }
    }));
    assert_eq!(out, interface(&["name?: string;"]));
}

#[test]
fn object_without_properties_is_an_unknown_map() {
    let out = emit(json!({
        "type": "object",
        "properties": {
            "meta": { "type": "object" },
            "extra": { "type": ["null", "object"] }
        }
    }));
    assert_eq!(
        out,
        interface(&[
            "meta?: { [key: string]: unknown; };",
            "extra?: { [key: string]: unknown; } | null;",
        ])
    );
}

#[test]
fn nested_objects_render_inline() {
    let out = emit(json!({
        "type": "object",
        "properties": {
            "twoPropertyObject": {
                "title": "test",
                "type": "object",
                "properties": {
                    "oneProperty": { "title": "test", "type": "string" },
                    "twoProperty": { "title": "test", "type": "boolean" }
                }
            }
        },
        "required": ["twoPropertyObject", "oneProperty"]
    }));
    // `required` only names properties on its own level.
    assert_eq!(
        out,
        interface(&["twoPropertyObject: { oneProperty?: string; twoProperty?: boolean; };"])
    );
}

#[test]
fn nullable_nested_objects_in_both_orders() {
    let nested = json!({
        "oneProperty": { "title": "test", "type": ["string", "null"] },
        "twoProperty": { "title": "test", "type": ["boolean", "null"] }
    });
    let out = emit(json!({
        "type": "object",
        "properties": {
            "first": { "type": ["object", "null"], "properties": nested.clone() },
            "second": { "type": ["null", "object"], "properties": nested }
        }
    }));
    let expr = "{ oneProperty?: string | null; twoProperty?: boolean | null; } | null";
    let first = format!("first?: {expr};");
    let second = format!("second?: {expr};");
    assert_eq!(out, interface(&[first.as_str(), second.as_str()]));
}

#[test]
fn nested_required_list_applies_to_its_own_level() {
    let out = emit(json!({
        "type": "object",
        "properties": {
            "profile": {
                "type": "object",
                "properties": {
                    "handle": { "type": "string" },
                    "bio": { "type": "string" }
                },
                "required": ["handle"]
            }
        }
    }));
    assert_eq!(out, interface(&["profile?: { handle: string; bio?: string; };"]));
}

#[test]
fn top_level_keys_are_trimmed() {
    let out = emit(json!({
        "type": "object",
        "properties": { "  padded ": { "type": "number" } },
        "required": ["padded"]
    }));
    assert_eq!(out, interface(&["padded: number;"]));
}

#[test]
fn many_to_one_relation_follows_properties() {
    let generated = generate(
        "Test",
        &schema(json!({
            "type": "object",
            "properties": {
                "userId": { "type": "string", "foreignKey": "user", "foreignKeyType": "many-to-one" },
                "title": { "type": "string" }
            },
            "required": ["title"]
        })),
    )
    .unwrap();
    assert_eq!(
        generated.source,
        interface(&["userId?: string;", "title: string;", "user?: User;"])
    );
    assert_eq!(generated.relations.get("User"), Some("user"));
}

#[test]
fn one_to_many_and_nullable_relations() {
    let generated = generate(
        "Test",
        &schema(json!({
            "type": "object",
            "properties": {
                "postsId": { "type": "number", "foreignKey": "post", "foreignKeyType": "one-to-many" },
                "avatarId": {
                    "type": ["string", "null"],
                    "foreignKey": "user-avatar",
                    "foreignKeyType": "one-to-one"
                }
            },
            "required": ["avatarId"]
        })),
    )
    .unwrap();
    assert_eq!(
        generated.source,
        interface(&[
            "postsId?: number;",
            "avatarId: string | null;",
            "posts?: Post[];",
            "avatar: UserAvatar | null;",
        ])
    );
    let entries = generated.relations.iter().collect::<Vec<_>>();
    assert_eq!(entries, [("Post", "post"), ("UserAvatar", "user-avatar")]);
}

#[test]
fn relations_are_not_resolved_below_the_top_level() {
    let generated = generate(
        "Test",
        &schema(json!({
            "type": "object",
            "properties": {
                "owner": {
                    "type": "object",
                    "properties": {
                        "teamId": { "type": "string", "foreignKey": "team", "foreignKeyType": "many-to-one" }
                    }
                }
            }
        })),
    )
    .unwrap();
    assert_eq!(generated.source, interface(&["owner?: { teamId?: string; };"]));
    assert!(generated.relations.is_empty());
}

#[test]
fn half_a_foreign_key_is_ignored() {
    let generated = generate(
        "Test",
        &schema(json!({
            "type": "object",
            "properties": {
                "userId": { "type": "string", "foreignKeyType": "many-to-one" },
                "teamId": { "type": "string", "foreignKey": "team" }
            }
        })),
    )
    .unwrap();
    assert_eq!(generated.source, interface(&["userId?: string;", "teamId?: string;"]));
    assert!(generated.relations.is_empty());
}

#[test]
fn unsupported_shape_names_the_nested_path() {
    let err = generate(
        "Test",
        &schema(json!({
            "type": "object",
            "properties": {
                "outer": {
                    "type": "object",
                    "properties": {
                        "inner": { "type": ["string", "number", "null"] }
                    }
                }
            }
        })),
    )
    .unwrap_err();
    assert_eq!(err.path().to_string(), "outer.inner");
    assert_eq!(
        err.to_string(),
        r#"unsupported shape at `outer.inner`: ["string", "number", "null"]"#
    );
}

#[test]
fn unknown_tag_is_unsupported() {
    let err = generate(
        "Test",
        &schema(json!({
            "type": "object",
            "properties": { "count": { "type": "integer" } }
        })),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::UnsupportedShape { ref shape, .. } if shape == "\"integer\""));
}

#[test]
fn object_paired_with_non_null_aborts_without_partial_output() {
    let s = schema(json!({
        "type": "object",
        "properties": {
            "userId": { "type": "string", "foreignKey": "user", "foreignKeyType": "many-to-one" },
            "bad": { "type": ["object", "number"] }
        }
    }));
    let mut cg = Codegen::new(&s);
    let err = cg.emit("Test").unwrap_err();
    assert!(matches!(err, GenerateError::InvalidObjectPair { ref other, .. } if other == "number"));
    assert!(cg.relations().is_empty());
    assert_eq!(cg.into_string(), "");
}

#[test]
fn independent_runs_do_not_share_relations() {
    let with_fk = Schema::object([(
        "userId",
        Property::new(PropertyType::String).with_foreign_key("user", ForeignKeyType::ManyToOne),
    )]);
    let plain = Schema::object([("name", Property::new(PropertyType::String))]);

    let first = generate("A", &with_fk).unwrap();
    let second = generate("B", &plain).unwrap();
    assert_eq!(first.relations.len(), 1);
    assert!(second.relations.is_empty());
}

#[test]
fn one_run_can_emit_several_declarations() {
    let s = Schema::object([("id", Property::new(PropertyType::Number))]).with_required(["id"]);
    let mut cg = Codegen::new(&s);
    cg.emit("First").unwrap();
    cg.emit("Second").unwrap();
    assert_eq!(
        cg.into_string(),
        format!(
            "export interface First {{ id: number;\n{INDEX_SIGNATURE} }}\n\n\
             export interface Second {{ id: number;\n{INDEX_SIGNATURE} }}"
        )
    );
}

#[test]
fn empty_schema_still_has_index_signature() {
    assert_eq!(emit(json!({ "type": "object", "properties": {} })), interface(&[]));
}
