use pretty_assertions::assert_eq;

use crate::processor::ProcessorConfig;
use crate::tests::testkit::{literal_expr, literal_expr_with_config, picked_expr_with_config};
use crate::transform::TypegenOptions;

#[test]
fn list_and_non_null_modifiers_wrap_inside_out() {
    let expression = literal_expr(
        r#"
          type Query { box: Box }
          type Box { tags: [String!]! names: [String] }
        "#,
        "{ box { tags names } }",
        TypegenOptions::default(),
    );

    assert_eq!(
        expression,
        "{ box: Maybe<{ tags: Array<string>, names: Maybe<Array<Maybe<string>>> }> }"
    );
}

#[test]
fn scalars_resolve_through_the_scalar_map() {
    let mut config = ProcessorConfig::default();
    config
        .scalars
        .insert("DateTime".to_string(), "string".to_string());

    let expression = literal_expr_with_config(
        r#"
          scalar DateTime
          scalar Blob
          enum Color { RED BLUE }
          type Query { widget: Widget }
          type Widget { color: Color! created: DateTime! blob: Blob }
        "#,
        "{ widget { color created blob } }",
        TypegenOptions::default(),
        config,
    );

    assert_eq!(
        expression,
        "{ widget: Maybe<{ color: Color, created: string, blob: Maybe<any> }> }"
    );
}

#[test]
fn enum_names_are_prefixed_and_qualified() {
    let config = ProcessorConfig {
        namespace: Some("Types".to_string()),
        enum_prefix: Some("E".to_string()),
        ..ProcessorConfig::default()
    };

    let expression = literal_expr_with_config(
        r#"
          enum Color { RED BLUE }
          type Query { widget: Widget }
          type Widget { color: Color! }
        "#,
        "{ widget { color } }",
        TypegenOptions::default(),
        config,
    );

    assert_eq!(expression, "{ widget: Maybe<{ color: Types.EColor }> }");
}

#[test]
fn immutable_fields_carry_the_mutability_qualifier() {
    let config = ProcessorConfig {
        immutable_fields: true,
        ..ProcessorConfig::default()
    };

    let expression = literal_expr_with_config(
        r#"
          type Query { dog: Dog }
          type Dog { id: ID! }
        "#,
        "{ dog { id } }",
        TypegenOptions::default(),
        config,
    );

    assert_eq!(
        expression,
        "{ readonly dog: Maybe<{ readonly id: string }> }"
    );
}

#[test]
fn picked_processor_qualifies_base_types_with_the_namespace() {
    let config = ProcessorConfig {
        namespace: Some("Types".to_string()),
        ..ProcessorConfig::default()
    };

    let expression = picked_expr_with_config(
        r#"
          type Query { dog: Dog }
          type Dog { id: ID! bark: String! }
        "#,
        "{ dog { id woof: bark } }",
        TypegenOptions::default(),
        config,
    );

    assert_eq!(
        expression,
        "{ dog: Maybe<{ woof: Types.Dog['bark'] } & Pick<Types.Dog, 'id'>> }"
    );
}
