use pretty_assertions::assert_eq;

use crate::ast::fragments::FragmentLibrary;
use crate::error::TypegenError;
use crate::processor::{LiteralTypeProcessor, ProcessorConfig};
use crate::tests::testkit::{first_operation, schema_state};
use crate::transform::{TypegenContext, TypegenOptions};
use crate::utils::parsing::parse_operation;

const DOG_SCHEMA: &str = r#"
  type Query { dog: Dog }
  type Dog { id: ID! }
"#;

fn transform_error(sdl: &str, query: &str) -> TypegenError {
    let state = schema_state(sdl);
    let document = parse_operation(query);
    let fragments = FragmentLibrary::new(&document);
    let processor = LiteralTypeProcessor::new(ProcessorConfig::default());
    let ctx = TypegenContext::new(&state, &fragments, &processor, TypegenOptions::default());

    ctx.transform_operation("Test", first_operation(&document))
        .expect_err("expected the transformation to fail")
}

#[test]
fn selecting_a_missing_field_is_a_schema_inconsistency() {
    let error = transform_error(DOG_SCHEMA, "{ dog { nope } }");

    assert_eq!(
        error,
        TypegenError::FieldNotFoundInType {
            field_name: "nope".to_string(),
            type_name: "Dog".to_string(),
        }
    );
    assert_eq!(error.to_string(), "Field 'nope' not found in type 'Dog'.");
}

#[test]
fn selecting_into_a_leaf_field_is_rejected() {
    let error = transform_error(DOG_SCHEMA, "{ dog { id { x } } }");

    assert_eq!(
        error,
        TypegenError::ExpectedCompositeType {
            field_name: "id".to_string(),
            type_name: "Dog".to_string(),
        }
    );
}

#[test]
fn operations_without_a_root_type_are_rejected() {
    let error = transform_error(DOG_SCHEMA, "mutation { x }");

    assert_eq!(
        error,
        TypegenError::MissingRootType {
            operation_kind: "mutation".to_string(),
        }
    );
}

#[test]
fn unknown_type_names_do_not_resolve() {
    let state = schema_state(DOG_SCHEMA);

    assert_eq!(
        state.possible_types("Nope").unwrap_err(),
        TypegenError::SchemaTypeNotFound {
            type_name: "Nope".to_string(),
        }
    );
}
