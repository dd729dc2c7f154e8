use graphql_parser::query::{Field, FragmentSpread, Selection, TypeCondition};
use graphql_parser::schema::TypeDefinition;
use tracing::{trace, warn};

use crate::ast::fragments::{type_condition_name, FragmentLibrary};
use crate::ast::selection_item::SelectionItem;
use crate::ast::type_map::TypeMap;
use crate::error::TypegenError;
use crate::processor::ProcessorConfig;
use crate::state::schema_state::SchemaState;

pub(crate) struct FlattenCtx<'a> {
    pub schema: &'a SchemaState,
    pub fragments: &'a FragmentLibrary,
    pub config: &'a ProcessorConfig,
}

/// Distributes every selected item to every concrete type it can apply to at
/// runtime, producing a complete partition over the parent's possible types.
/// Concrete types untouched by the selection still appear with an empty item
/// list, so the composer decides to omit them instead of losing them.
pub(crate) fn flatten_selection_set(
    ctx: &FlattenCtx<'_>,
    parent_type_name: &str,
    items: &[Selection<'static, String>],
) -> Result<TypeMap, TypegenError> {
    let possible = ctx.schema.possible_types(parent_type_name)?.to_vec();
    trace!(
        parent = parent_type_name,
        possible_types = possible.len(),
        "flattening selection set"
    );
    let mut map = TypeMap::new(&possible);
    apply_selections(ctx, &mut map, parent_type_name, parent_type_name, items)?;
    Ok(map)
}

/// Applies one inline-fragment scope. `governing` is the schema type the
/// scope is read against and `condition` its type condition; loose fields
/// reach this function wrapped in the synthetic scope where both coincide.
fn apply_selections(
    ctx: &FlattenCtx<'_>,
    map: &mut TypeMap,
    governing: &str,
    condition: &str,
    items: &[Selection<'static, String>],
) -> Result<(), TypegenError> {
    let targets = condition_targets(ctx, governing, condition)?;
    if targets.is_empty() {
        return Ok(());
    }

    for selection in items {
        match selection {
            Selection::Field(field) => {
                for target in &targets {
                    attach_field(map, target, field);
                }
            }
            Selection::InlineFragment(fragment) => {
                let nested_condition = fragment
                    .type_condition
                    .as_ref()
                    .map(|type_condition| {
                        let TypeCondition::On(name) = type_condition;
                        name.as_str()
                    })
                    .unwrap_or(condition);
                apply_selections(
                    ctx,
                    map,
                    condition,
                    nested_condition,
                    &fragment.selection_set.items,
                )?;
            }
            Selection::FragmentSpread(spread) => {
                apply_spread(ctx, map, condition, spread)?;
            }
        }
    }

    Ok(())
}

/// The concrete types a type condition narrows the governing type to,
/// following the polymorphism fan-out rules.
fn condition_targets(
    ctx: &FlattenCtx<'_>,
    governing: &str,
    condition: &str,
) -> Result<Vec<String>, TypegenError> {
    // A condition repeating the governing type is a bare re-assertion: it
    // covers everything the governing type covers.
    if governing == condition {
        return Ok(ctx.schema.possible_types(governing)?.to_vec());
    }

    let governing_def = ctx.schema.type_def(governing)?;
    let condition_def = ctx.schema.type_def(condition)?;

    match governing_def {
        TypeDefinition::Object(object) => match condition_def {
            // Interface-scoped narrowing succeeds when the object satisfies
            // the interface.
            TypeDefinition::Interface(interface) => {
                if object.implements_interfaces.contains(&interface.name) {
                    Ok(vec![governing.to_string()])
                } else {
                    Ok(Vec::new())
                }
            }
            TypeDefinition::Union(union_type) => {
                if union_type.types.contains(&object.name) {
                    Ok(vec![governing.to_string()])
                } else {
                    Ok(Vec::new())
                }
            }
            // A different object type is an impossible branch.
            _ => Ok(Vec::new()),
        },
        TypeDefinition::Interface(_) => {
            let possible = ctx.schema.possible_types(governing)?;
            match condition_def {
                TypeDefinition::Object(object) => {
                    if possible.iter().any(|name| name == &object.name) {
                        Ok(vec![object.name.clone()])
                    } else {
                        Ok(Vec::new())
                    }
                }
                _ => Ok(Vec::new()),
            }
        }
        TypeDefinition::Union(_) => {
            let members = ctx.schema.possible_types(governing)?;
            match condition_def {
                TypeDefinition::Object(object) => {
                    if members.iter().any(|name| name == &object.name) {
                        Ok(vec![object.name.clone()])
                    } else {
                        Ok(Vec::new())
                    }
                }
                TypeDefinition::Interface(_) => {
                    let implementors = ctx.schema.possible_types(condition)?;
                    Ok(members
                        .iter()
                        .filter(|member| implementors.contains(member))
                        .cloned()
                        .collect())
                }
                _ => Ok(Vec::new()),
            }
        }
        _ => Ok(Vec::new()),
    }
}

fn attach_field(map: &mut TypeMap, target: &str, field: &Field<'static, String>) {
    if !map.contains(target) {
        return;
    }

    if field.name == "__typename" {
        map.push(target, SelectionItem::Typename);
        return;
    }

    let item = if field.selection_set.items.is_empty() {
        match &field.alias {
            Some(alias) if alias != &field.name => SelectionItem::AliasedField {
                alias: alias.clone(),
                name: field.name.clone(),
            },
            _ => SelectionItem::Field {
                name: field.name.clone(),
            },
        }
    } else {
        let response_key = field.alias.clone().unwrap_or_else(|| field.name.clone());
        SelectionItem::Link {
            response_key,
            field_name: field.name.clone(),
            selections: field.selection_set.items.clone(),
        }
    };

    map.push(target, item);
}

/// Expands a named-fragment spread into per-concrete-type usage tokens over
/// the intersection of the fragment's and the governing scope's possible
/// types. Unknown fragment names were validated away upstream and are
/// skipped.
fn apply_spread(
    ctx: &FlattenCtx<'_>,
    map: &mut TypeMap,
    governing: &str,
    spread: &FragmentSpread<'static, String>,
) -> Result<(), TypegenError> {
    let Some(fragment) = ctx.fragments.get(&spread.fragment_name) else {
        warn!(
            fragment = %spread.fragment_name,
            "skipping spread of unknown fragment"
        );
        return Ok(());
    };

    let condition = type_condition_name(fragment);
    let fragment_possible = ctx.schema.possible_types(condition)?;
    let governing_possible = ctx.schema.possible_types(governing)?;
    let spans_multiple = fragment_possible.len() > 1;

    for concrete in fragment_possible {
        if !governing_possible.contains(concrete) {
            continue;
        }
        let type_ref =
            ctx.config
                .fragment_usage_name(&fragment.name, concrete, spans_multiple);
        map.push(concrete, SelectionItem::FragmentUsage { type_ref });
    }

    Ok(())
}
