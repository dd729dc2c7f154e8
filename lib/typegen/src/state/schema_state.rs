use graphql_parser::schema::{Definition, Document, Field, TypeDefinition};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::instrument;

use crate::error::TypegenError;

static STANDARD_SCALARS: [&str; 5] = ["ID", "String", "Int", "Float", "Boolean"];

pub type SchemaDocument = Document<'static, String>;

const NO_POSSIBLE_TYPES: &[String] = &[];

/// Read-only index over one schema document, built once per generation run.
/// Possible types for every interface and union are computed eagerly, so the
/// state can be shared across threads without interior mutability.
#[derive(Debug)]
pub struct SchemaState {
    /// A map of all type definitions (def_name, def) that exist in the schema.
    definitions: FxHashMap<String, TypeDefinition<'static, String>>,
    /// Concrete object types each selectable definition can resolve to at
    /// runtime: the type itself for objects, implementors for interfaces,
    /// expanded members for unions.
    possible_types: FxHashMap<String, Vec<String>>,
    /// A set of all known scalars in this schema, including built-ins.
    known_scalars: FxHashSet<String>,
    query_type: String,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
}

impl SchemaState {
    #[instrument(level = "trace", skip(schema), name = "new_schema_state")]
    pub fn new(schema: &SchemaDocument) -> Self {
        let definitions = Self::build_definition_map(schema);
        let possible_types = Self::build_possible_types(schema);
        let known_scalars = Self::extract_known_scalars(schema);
        let (query_type, mutation_type, subscription_type) = Self::extract_root_types(schema);

        Self {
            definitions,
            possible_types,
            known_scalars,
            query_type,
            mutation_type,
            subscription_type,
        }
    }

    pub fn type_def(&self, name: &str) -> Result<&TypeDefinition<'static, String>, TypegenError> {
        self.definitions
            .get(name)
            .ok_or_else(|| TypegenError::SchemaTypeNotFound {
                type_name: name.to_string(),
            })
    }

    pub fn maybe_type_def(&self, name: &str) -> Option<&TypeDefinition<'static, String>> {
        self.definitions.get(name)
    }

    /// The ordered, deduplicated set of concrete object types `name` can
    /// represent at runtime. Scalars and enums resolve to an empty set; a name
    /// missing from the schema entirely is a caller error.
    pub fn possible_types(&self, name: &str) -> Result<&[String], TypegenError> {
        if let Some(possible) = self.possible_types.get(name) {
            return Ok(possible);
        }

        if self.definitions.contains_key(name) {
            Ok(NO_POSSIBLE_TYPES)
        } else {
            Err(TypegenError::SchemaTypeNotFound {
                type_name: name.to_string(),
            })
        }
    }

    pub fn field_on_type(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Result<&Field<'static, String>, TypegenError> {
        let fields = match self.type_def(type_name)? {
            TypeDefinition::Object(object) => &object.fields,
            TypeDefinition::Interface(interface) => &interface.fields,
            _ => {
                return Err(TypegenError::FieldNotFoundInType {
                    field_name: field_name.to_string(),
                    type_name: type_name.to_string(),
                })
            }
        };

        fields
            .iter()
            .find(|field| field.name == field_name)
            .ok_or_else(|| TypegenError::FieldNotFoundInType {
                field_name: field_name.to_string(),
                type_name: type_name.to_string(),
            })
    }

    pub fn is_scalar_type(&self, type_name: &str) -> bool {
        if STANDARD_SCALARS.contains(&type_name) {
            return true;
        }

        self.known_scalars.contains(type_name)
    }

    pub fn is_enum_type(&self, type_name: &str) -> bool {
        matches!(self.maybe_type_def(type_name), Some(TypeDefinition::Enum(_)))
    }

    pub fn is_composite_type(&self, type_name: &str) -> bool {
        matches!(
            self.maybe_type_def(type_name),
            Some(
                TypeDefinition::Object(_) | TypeDefinition::Interface(_) | TypeDefinition::Union(_)
            )
        )
    }

    pub fn query_type_name(&self) -> &str {
        &self.query_type
    }

    pub fn mutation_type_name(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    pub fn subscription_type_name(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }

    fn build_definition_map(
        schema: &SchemaDocument,
    ) -> FxHashMap<String, TypeDefinition<'static, String>> {
        let mut map = FxHashMap::default();

        for def in &schema.definitions {
            if let Definition::TypeDefinition(type_def) = def {
                map.insert(type_definition_name(type_def).to_string(), type_def.clone());
            }
        }

        map
    }

    fn build_possible_types(schema: &SchemaDocument) -> FxHashMap<String, Vec<String>> {
        let mut map: FxHashMap<String, Vec<String>> = FxHashMap::default();

        for def in &schema.definitions {
            let Definition::TypeDefinition(type_def) = def else {
                continue;
            };

            match type_def {
                TypeDefinition::Object(object) => {
                    map.insert(object.name.clone(), vec![object.name.clone()]);
                }
                TypeDefinition::Interface(interface) => {
                    map.insert(
                        interface.name.clone(),
                        Self::interface_implementors(schema, &interface.name),
                    );
                }
                TypeDefinition::Union(union_type) => {
                    let mut members: Vec<String> = Vec::new();
                    for member in &union_type.types {
                        match Self::find_type_definition(schema, member) {
                            Some(TypeDefinition::Object(object)) => {
                                push_unique(&mut members, &object.name);
                            }
                            // A union member that is itself abstract contributes
                            // the intersection of its implementors with the
                            // union's own declared members.
                            Some(TypeDefinition::Interface(interface)) => {
                                for declared in &union_type.types {
                                    if let Some(TypeDefinition::Object(object)) =
                                        Self::find_type_definition(schema, declared)
                                    {
                                        if object.implements_interfaces.contains(&interface.name) {
                                            push_unique(&mut members, &object.name);
                                        }
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                    map.insert(union_type.name.clone(), members);
                }
                _ => {}
            }
        }

        map
    }

    fn interface_implementors(schema: &SchemaDocument, interface_name: &str) -> Vec<String> {
        let mut implementors = Vec::new();

        for def in &schema.definitions {
            if let Definition::TypeDefinition(TypeDefinition::Object(object)) = def {
                if object
                    .implements_interfaces
                    .iter()
                    .any(|implemented| implemented == interface_name)
                {
                    implementors.push(object.name.clone());
                }
            }
        }

        implementors
    }

    fn find_type_definition<'s>(
        schema: &'s SchemaDocument,
        name: &str,
    ) -> Option<&'s TypeDefinition<'static, String>> {
        schema.definitions.iter().find_map(|def| match def {
            Definition::TypeDefinition(type_def) if type_definition_name(type_def) == name => {
                Some(type_def)
            }
            _ => None,
        })
    }

    fn extract_known_scalars(schema: &SchemaDocument) -> FxHashSet<String> {
        let mut set = FxHashSet::default();

        for def in schema.definitions.iter() {
            if let Definition::TypeDefinition(TypeDefinition::Scalar(scalar_type)) = def {
                set.insert(scalar_type.name.to_string());
            }
        }

        for builtin in STANDARD_SCALARS {
            set.insert(builtin.to_string());
        }

        set
    }

    fn extract_root_types(schema: &SchemaDocument) -> (String, Option<String>, Option<String>) {
        let schema_def = schema.definitions.iter().find_map(|def| match def {
            Definition::SchemaDefinition(schema_def) => Some(schema_def),
            _ => None,
        });

        let default_root = |name: &str| -> Option<String> {
            Self::find_type_definition(schema, name)
                .filter(|def| matches!(def, TypeDefinition::Object(_)))
                .map(|_| name.to_string())
        };

        let query = schema_def
            .and_then(|def| def.query.clone())
            .unwrap_or_else(|| "Query".to_string());
        let mutation = schema_def
            .and_then(|def| def.mutation.clone())
            .or_else(|| default_root("Mutation"));
        let subscription = schema_def
            .and_then(|def| def.subscription.clone())
            .or_else(|| default_root("Subscription"));

        (query, mutation, subscription)
    }
}

fn type_definition_name<'d>(type_def: &'d TypeDefinition<'static, String>) -> &'d str {
    match type_def {
        TypeDefinition::Scalar(scalar) => &scalar.name,
        TypeDefinition::Object(object) => &object.name,
        TypeDefinition::Interface(interface) => &interface.name,
        TypeDefinition::Union(union_type) => &union_type.name,
        TypeDefinition::Enum(enum_type) => &enum_type.name,
        TypeDefinition::InputObject(input_object) => &input_object.name,
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|existing| existing == name) {
        list.push(name.to_string());
    }
}
