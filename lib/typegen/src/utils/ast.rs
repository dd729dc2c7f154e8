use graphql_parser::schema::Type;

use crate::processor::ProcessorConfig;

/// Returns the innermost named type of a schema type reference.
pub fn inner_type_name<'t>(field_type: &'t Type<'static, String>) -> &'t str {
    match field_type {
        Type::NamedType(name) => name,
        Type::ListType(inner) => inner_type_name(inner),
        Type::NonNullType(inner) => inner_type_name(inner),
    }
}

pub fn is_non_null(field_type: &Type<'static, String>) -> bool {
    matches!(field_type, Type::NonNullType(_))
}

/// Wraps an already-rendered type expression with the optionality and list
/// modifiers of the schema type reference it was selected through. Wrapping
/// recurses inside-out: the innermost named position first, then each list
/// level, with a non-null stripping one level of optionality.
pub fn wrap_type_modifiers(
    field_type: &Type<'static, String>,
    base: &str,
    config: &ProcessorConfig,
) -> String {
    wrap_inner(field_type, base, config, true)
}

fn wrap_inner(
    field_type: &Type<'static, String>,
    base: &str,
    config: &ProcessorConfig,
    nullable: bool,
) -> String {
    match field_type {
        Type::NonNullType(inner) => wrap_inner(inner, base, config, false),
        Type::ListType(inner) => {
            let item = wrap_inner(inner, base, config, true);
            let list = format!("{}<{}>", config.list_wrapper, item);
            if nullable {
                config.optional(&list)
            } else {
                list
            }
        }
        Type::NamedType(_) => {
            if nullable {
                config.optional(base)
            } else {
                base.to_string()
            }
        }
    }
}
