use graphql_parser::query::Selection;

use crate::ast::selection_item::SelectionItem;
use crate::error::TypegenError;
use crate::federation_spec::FederationMetadata;
use crate::processor::AliasedField;
use crate::state::schema_state::SchemaState;

/// One concrete type's collected items, bucketed for rendering. Buffers are
/// owned by a single transformation and never escape it.
#[derive(Debug, Default)]
pub(crate) struct ClassifiedSelection {
    pub primitives: Vec<String>,
    pub aliased: Vec<AliasedField>,
    pub links: Vec<LinkField>,
    pub fragment_usages: Vec<String>,
    pub typename_queried: bool,
}

/// A nested-object field candidate keyed by its response key. A second
/// occurrence of the same key merges its child selections into the first;
/// the union is resolved recursively when the child transformation runs.
#[derive(Debug)]
pub(crate) struct LinkField {
    pub response_key: String,
    pub field_name: String,
    pub selections: Vec<Selection<'static, String>>,
}

pub(crate) fn classify_items(
    schema: &SchemaState,
    federation: Option<&FederationMetadata>,
    type_name: &str,
    items: Vec<SelectionItem>,
) -> Result<ClassifiedSelection, TypegenError> {
    let mut classified = ClassifiedSelection::default();

    for item in items {
        match item {
            SelectionItem::Typename => classified.typename_queried = true,
            SelectionItem::Field { name } => {
                schema.field_on_type(type_name, &name)?;
                if is_skipped(federation, schema, type_name, &name) {
                    continue;
                }
                if !classified.primitives.contains(&name) {
                    classified.primitives.push(name);
                }
            }
            SelectionItem::AliasedField { alias, name } => {
                schema.field_on_type(type_name, &name)?;
                if is_skipped(federation, schema, type_name, &name) {
                    continue;
                }
                if !classified.aliased.iter().any(|field| field.alias == alias) {
                    classified.aliased.push(AliasedField { alias, name });
                }
            }
            SelectionItem::Link {
                response_key,
                field_name,
                selections,
            } => {
                if is_skipped(federation, schema, type_name, &field_name) {
                    continue;
                }
                match classified
                    .links
                    .iter_mut()
                    .find(|link| link.response_key == response_key)
                {
                    Some(existing) => existing.selections.extend(selections),
                    None => classified.links.push(LinkField {
                        response_key,
                        field_name,
                        selections,
                    }),
                }
            }
            SelectionItem::FragmentUsage { type_ref } => {
                if !classified.fragment_usages.contains(&type_ref) {
                    classified.fragment_usages.push(type_ref);
                }
            }
        }
    }

    Ok(classified)
}

fn is_skipped(
    federation: Option<&FederationMetadata>,
    schema: &SchemaState,
    type_name: &str,
    field_name: &str,
) -> bool {
    federation.is_some_and(|metadata| metadata.skip_field(schema, type_name, field_name))
}
