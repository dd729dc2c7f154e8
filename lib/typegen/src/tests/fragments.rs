use pretty_assertions::assert_eq;

use crate::tests::testkit::{literal_expr, literal_units, render_units};
use crate::transform::TypegenOptions;

const PETS_SCHEMA: &str = r#"
  type Query { pet: Node }
  interface Node { id: ID! }
  type Dog implements Node { id: ID! bark: String! }
  type Cat implements Node { id: ID! meow: String! }
"#;

#[test]
fn spread_intersects_with_inline_selections_per_branch() {
    let expression = literal_expr(
        PETS_SCHEMA,
        r#"
          query { pet { ...F ... on Dog { bark } } }
          fragment F on Node { id }
        "#,
        TypegenOptions::default(),
    );

    assert_eq!(
        expression,
        "{ pet: Maybe<{ bark: string } & FFragment_Dog | FFragment_Cat> }"
    );
}

#[test]
fn single_possible_type_spread_keeps_an_unsuffixed_token() {
    let expression = literal_expr(
        PETS_SCHEMA,
        r#"
          query { pet { ...D } }
          fragment D on Dog { bark }
        "#,
        TypegenOptions::default(),
    );

    assert_eq!(expression, "{ pet: Maybe<DFragment> }");
}

#[test]
fn duplicate_spreads_collapse_into_one_usage() {
    let expression = literal_expr(
        PETS_SCHEMA,
        r#"
          query { pet { ...D ...D } }
          fragment D on Dog { bark }
        "#,
        TypegenOptions::default(),
    );

    assert_eq!(expression, "{ pet: Maybe<DFragment> }");
}

#[test]
fn unknown_spread_is_skipped() {
    let expression = literal_expr(
        PETS_SCHEMA,
        "{ pet { id ...Missing } }",
        TypegenOptions::default(),
    );

    assert_eq!(
        expression,
        "{ pet: Maybe<{ id: string } | { id: string }> }"
    );
}

#[test]
fn polymorphic_fragment_emits_suffixed_declarations_plus_a_union() {
    let units = literal_units(
        PETS_SCHEMA,
        "fragment F on Node { id }",
        TypegenOptions::default(),
    );

    insta::assert_snapshot!(render_units(&units), @r"
    FFragment_Dog = { id: string }
    FFragment_Cat = { id: string }
    FFragment = FFragment_Dog | FFragment_Cat
    ");
}

#[test]
fn non_contributing_possible_types_still_get_a_fragment_declaration() {
    let units = literal_units(
        PETS_SCHEMA,
        "fragment F on Node { ... on Dog { bark } }",
        TypegenOptions::default(),
    );

    insta::assert_snapshot!(render_units(&units), @r"
    FFragment_Dog = { bark: string }
    FFragment_Cat = {}
    FFragment = FFragment_Dog | FFragment_Cat
    ");
}

#[test]
fn monomorphic_fragment_emits_a_single_declaration() {
    let units = literal_units(
        PETS_SCHEMA,
        "fragment D on Dog { bark }",
        TypegenOptions::default(),
    );

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].name, "DFragment");
    assert_eq!(units[0].expression, "{ bark: string }");
}

#[test]
fn spread_inside_a_narrower_branch_stays_in_that_branch() {
    let expression = literal_expr(
        PETS_SCHEMA,
        r#"
          query { pet { ... on Dog { ...F } } }
          fragment F on Node { id }
        "#,
        TypegenOptions::default(),
    );

    assert_eq!(expression, "{ pet: Maybe<FFragment_Dog> }");
}
