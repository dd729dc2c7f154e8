pub mod directives;

use graphql_parser::schema::{Definition, Directive, TypeDefinition};
use rustc_hash::FxHashMap;
use tracing::instrument;

use crate::error::TypegenError;
use crate::state::schema_state::{SchemaDocument, SchemaState};
use crate::utils::ast::{inner_type_name, is_non_null};
use directives::{ExternalDirective, KeyDirective, ProvidesDirective, RequiresDirective};

/// The scalar the federation spec injects for field-set arguments.
pub const FIELD_SET_SCALAR: &str = "_FieldSet";
/// The synthesized entity-resolution field.
pub const RESOLVE_REFERENCE_FIELD: &str = "__resolveReference";

/// One entry of a parsed field-set argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSetItem {
    pub field_name: String,
    pub required: bool,
}

/// Splits a field-set directive argument on whitespace. Nested field sets
/// are not supported and rejected.
pub fn parse_field_set(field_set: &str) -> Result<Vec<String>, TypegenError> {
    if field_set.contains('{') || field_set.contains('}') {
        return Err(TypegenError::UnsupportedFieldSet {
            field_set: field_set.to_string(),
        });
    }

    Ok(field_set
        .split_whitespace()
        .map(|name| name.to_string())
        .collect())
}

/// Reader of the federation decoration on a schema: which fields identify an
/// entity, which are owned elsewhere, and which a service re-supplies.
#[derive(Debug)]
pub struct FederationMetadata {
    enabled: bool,
    /// concrete type name -> field names some `@provides` annotation supplies.
    provides_map: FxHashMap<String, Vec<String>>,
}

impl FederationMetadata {
    #[instrument(level = "trace", skip(schema))]
    pub fn new(schema: &SchemaDocument) -> Result<Self, TypegenError> {
        Ok(Self {
            enabled: true,
            provides_map: Self::build_provides_map(schema)?,
        })
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            provides_map: FxHashMap::default(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    fn build_provides_map(
        schema: &SchemaDocument,
    ) -> Result<FxHashMap<String, Vec<String>>, TypegenError> {
        let mut map: FxHashMap<String, Vec<String>> = FxHashMap::default();

        for def in &schema.definitions {
            let Definition::TypeDefinition(TypeDefinition::Object(object)) = def else {
                continue;
            };
            for field in &object.fields {
                for directive in field.directives.iter().filter(|d| ProvidesDirective::is(d)) {
                    let provides = ProvidesDirective::from(directive);
                    let target = inner_type_name(&field.field_type).to_string();
                    let provided = map.entry(target).or_default();
                    for field_name in parse_field_set(&provides.fields)? {
                        if !provided.contains(&field_name) {
                            provided.push(field_name);
                        }
                    }
                }
            }
        }

        Ok(map)
    }

    pub fn skip_scalar(&self, scalar_name: &str) -> bool {
        self.enabled && scalar_name == FIELD_SET_SCALAR
    }

    pub fn skip_directive(&self, directive_name: &str) -> bool {
        self.enabled
            && matches!(
                directive_name,
                KeyDirective::NAME
                    | RequiresDirective::NAME
                    | ProvidesDirective::NAME
                    | ExternalDirective::NAME
            )
    }

    /// A field owned by another service is skipped from normal generation
    /// unless some local `@provides` annotation re-supplies it.
    pub fn skip_field(&self, schema: &SchemaState, type_name: &str, field_name: &str) -> bool {
        if !self.enabled {
            return false;
        }

        let Ok(field) = schema.field_on_type(type_name, field_name) else {
            return false;
        };
        if !field.directives.iter().any(|d| ExternalDirective::is(d)) {
            return false;
        }

        !self
            .provides_map
            .get(type_name)
            .is_some_and(|provided| provided.iter().any(|name| name == field_name))
    }

    pub fn filter_type_names(&self, type_names: Vec<String>) -> Vec<String> {
        if !self.enabled {
            return type_names;
        }

        type_names
            .into_iter()
            .filter(|name| name != FIELD_SET_SCALAR)
            .collect()
    }

    pub fn filter_field_names(&self, field_names: Vec<String>) -> Vec<String> {
        if !self.enabled {
            return field_names;
        }

        field_names
            .into_iter()
            .filter(|name| name != RESOLVE_REFERENCE_FIELD)
            .collect()
    }

    /// All field sets of the parent type's `@key` annotations, every entry
    /// marked required.
    pub fn key_field_sets(
        &self,
        schema: &SchemaState,
        type_name: &str,
    ) -> Result<Vec<Vec<FieldSetItem>>, TypegenError> {
        let TypeDefinition::Object(object) = schema.type_def(type_name)? else {
            return Ok(Vec::new());
        };

        object
            .directives
            .iter()
            .filter(|d| KeyDirective::is(d))
            .map(|d| {
                let key = KeyDirective::from(d);
                Ok(parse_field_set(&key.fields)?
                    .into_iter()
                    .map(|field_name| FieldSetItem {
                        field_name,
                        required: true,
                    })
                    .collect())
            })
            .collect()
    }

    /// The field set of a `@requires` annotation; each entry's requiredness
    /// follows the underlying field's schema nullability.
    pub fn requires_field_set(
        &self,
        schema: &SchemaState,
        type_name: &str,
        field_set: &str,
    ) -> Result<Vec<FieldSetItem>, TypegenError> {
        parse_field_set(field_set)?
            .into_iter()
            .map(|field_name| {
                let field = schema.field_on_type(type_name, &field_name)?;
                Ok(FieldSetItem {
                    required: is_non_null(&field.field_type),
                    field_name,
                })
            })
            .collect()
    }

    /// Computes the parameter type of the synthesized entity-resolution
    /// field: one projection per `@key` annotation, unioned, with the
    /// field's `@requires` projection intersected onto every alternative.
    /// Non-entity parents keep the base signature untouched.
    pub fn translate_parent_type(
        &self,
        schema: &SchemaState,
        field_name: &str,
        field_directives: &[Directive<'static, String>],
        parent_type_name: &str,
        base_signature: &str,
    ) -> Result<String, TypegenError> {
        if !self.enabled || field_name != RESOLVE_REFERENCE_FIELD {
            return Ok(base_signature.to_string());
        }

        let keys = self.key_field_sets(schema, parent_type_name)?;
        if keys.is_empty() {
            return Ok(base_signature.to_string());
        }

        let requires_projection = field_directives
            .iter()
            .find(|d| RequiresDirective::is(d))
            .map(|d| {
                let requires = RequiresDirective::from(d);
                let items =
                    self.requires_field_set(schema, parent_type_name, &requires.fields)?;
                Ok::<_, TypegenError>(render_projection(base_signature, &items))
            })
            .transpose()?;

        let alternatives: Vec<String> = keys
            .iter()
            .map(|items| {
                let projection = render_projection(base_signature, items);
                match &requires_projection {
                    Some(requires) => format!("{} & {}", projection, requires),
                    None => projection,
                }
            })
            .collect();

        Ok(alternatives.join(" | "))
    }
}

fn render_projection(base_signature: &str, items: &[FieldSetItem]) -> String {
    let keys = items
        .iter()
        .map(|item| format!("'{}'", item.field_name))
        .collect::<Vec<_>>()
        .join(" | ");

    format!("Pick<{}, {}>", base_signature, keys)
}
