use graphql_parser::query::{
    Definition, Document, FragmentDefinition, OperationDefinition, Selection, SelectionSet,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::ast::classify::{classify_items, LinkField};
use crate::ast::flatten::{flatten_selection_set, FlattenCtx};
use crate::ast::fragments::{type_condition_name, FragmentLibrary};
use crate::ast::selection_item::SelectionItem;
use crate::composer::{build_declarations, compose_operands, compose_union, DeclarationUnit};
use crate::error::TypegenError;
use crate::federation_spec::FederationMetadata;
use crate::processor::{RenderedLinkField, TypeExpressionProcessor};
use crate::state::schema_state::SchemaState;
use crate::utils::ast::{inner_type_name, wrap_type_modifiers};

/// Discriminant emission flags. The discriminant is present whenever one of
/// the flags is set or the field was explicitly queried, and optional only
/// when it was added by `add_typename` alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypegenOptions {
    /// Adds `__typename` to every generated shape even when not queried.
    pub add_typename: bool,
    /// Forces the discriminant to be non-optional whenever it is emitted.
    pub non_optional_typename: bool,
}

/// One generation run over a schema/document pair. Each nested link field is
/// processed by an independently owned child transformation; the only shared
/// state is the read-only schema index.
pub struct TypegenContext<'a> {
    schema: &'a SchemaState,
    fragments: &'a FragmentLibrary,
    processor: &'a dyn TypeExpressionProcessor,
    options: TypegenOptions,
    federation: Option<&'a FederationMetadata>,
}

impl<'a> TypegenContext<'a> {
    pub fn new(
        schema: &'a SchemaState,
        fragments: &'a FragmentLibrary,
        processor: &'a dyn TypeExpressionProcessor,
        options: TypegenOptions,
    ) -> Self {
        Self {
            schema,
            fragments,
            processor,
            options,
            federation: None,
        }
    }

    pub fn with_federation(mut self, federation: &'a FederationMetadata) -> Self {
        self.federation = Some(federation);
        self
    }

    /// Computes the inline type expression for a selection set read against
    /// `parent_type_name`.
    #[instrument(level = "trace", skip(self, selection_set))]
    pub fn transform_selection_set(
        &self,
        parent_type_name: &str,
        selection_set: &SelectionSet<'static, String>,
    ) -> Result<String, TypegenError> {
        Ok(self
            .union_of_branches(parent_type_name, &selection_set.items)?
            .unwrap_or_else(|| "{}".to_string()))
    }

    /// Emits the declarations for one operation, rooted at the matching
    /// operation type of the schema.
    #[instrument(level = "trace", skip(self, operation))]
    pub fn transform_operation(
        &self,
        base_name: &str,
        operation: &OperationDefinition<'static, String>,
    ) -> Result<Vec<DeclarationUnit>, TypegenError> {
        let (root_type, selection_set) = self.operation_root(operation)?;
        let branches = self.branch_expressions(&root_type, &selection_set.items)?;
        Ok(build_declarations(base_name, branches))
    }

    /// Emits the standalone declarations for a named fragment. A fragment
    /// whose type condition is polymorphic produces one declaration per
    /// possible concrete type plus a top-level union of their names, so that
    /// every per-type usage token resolves to a declaration even when the
    /// type contributes nothing.
    #[instrument(level = "trace", skip(self, fragment), fields(fragment = %fragment.name))]
    pub fn transform_fragment(
        &self,
        fragment: &FragmentDefinition<'static, String>,
    ) -> Result<Vec<DeclarationUnit>, TypegenError> {
        let condition = type_condition_name(fragment);
        let base_name = self.processor.config().fragment_base_name(&fragment.name);
        let branches = self.branch_expressions_all(condition, &fragment.selection_set.items)?;

        if branches.len() > 1 {
            let complete = branches
                .into_iter()
                .map(|(type_name, expression)| {
                    (type_name, expression.unwrap_or_else(|| "{}".to_string()))
                })
                .collect();
            Ok(build_declarations(&base_name, complete))
        } else {
            let contributing = branches
                .into_iter()
                .filter_map(|(type_name, expression)| expression.map(|expr| (type_name, expr)))
                .collect();
            Ok(build_declarations(&base_name, contributing))
        }
    }

    /// Emits declarations for every operation and fragment of an executable
    /// document.
    pub fn transform_document(
        &self,
        document: &Document<'static, String>,
    ) -> Result<Vec<DeclarationUnit>, TypegenError> {
        let mut units = Vec::new();

        for definition in &document.definitions {
            match definition {
                Definition::Operation(operation) => {
                    let name = operation_name(operation).unwrap_or("Unnamed");
                    units.extend(self.transform_operation(name, operation)?);
                }
                Definition::Fragment(fragment) => {
                    units.extend(self.transform_fragment(fragment)?);
                }
            }
        }

        Ok(units)
    }

    fn union_of_branches(
        &self,
        parent_type_name: &str,
        items: &[Selection<'static, String>],
    ) -> Result<Option<String>, TypegenError> {
        let branches = self.branch_expressions(parent_type_name, items)?;
        let expressions: Vec<String> = branches.into_iter().map(|(_, expr)| expr).collect();
        Ok(compose_union(&expressions))
    }

    /// The composed expression of every concrete type of the governing set,
    /// in possible-types order; `None` marks a type contributing nothing
    /// observable.
    fn branch_expressions_all(
        &self,
        parent_type_name: &str,
        items: &[Selection<'static, String>],
    ) -> Result<Vec<(String, Option<String>)>, TypegenError> {
        let flatten_ctx = FlattenCtx {
            schema: self.schema,
            fragments: self.fragments,
            config: self.processor.config(),
        };
        let type_map = flatten_selection_set(&flatten_ctx, parent_type_name, items)?;

        let mut branches = Vec::new();
        for (type_name, type_items) in type_map.into_entries() {
            let expression = self.build_branch(&type_name, type_items)?;
            branches.push((type_name, expression));
        }

        Ok(branches)
    }

    /// Only the contributing concrete types, non-contributors omitted.
    fn branch_expressions(
        &self,
        parent_type_name: &str,
        items: &[Selection<'static, String>],
    ) -> Result<Vec<(String, String)>, TypegenError> {
        Ok(self
            .branch_expressions_all(parent_type_name, items)?
            .into_iter()
            .filter_map(|(type_name, expression)| expression.map(|expr| (type_name, expr)))
            .collect())
    }

    fn build_branch(
        &self,
        type_name: &str,
        items: Vec<SelectionItem>,
    ) -> Result<Option<String>, TypegenError> {
        let classified = classify_items(self.schema, self.federation, type_name, items)?;

        let mut tokens = Vec::new();
        if let Some(optional) = self.discriminant_mode(classified.typename_queried) {
            tokens.push(self.processor.render_discriminant(type_name, optional));
        }
        tokens.extend(
            self.processor
                .render_primitives(self.schema, type_name, &classified.primitives)?,
        );
        tokens.extend(self.processor.render_aliased_primitives(
            self.schema,
            type_name,
            &classified.aliased,
        )?);

        let links = self.render_links(type_name, classified.links)?;
        tokens.extend(self.processor.render_link_fields(&links));

        Ok(compose_operands(tokens, &classified.fragment_usages))
    }

    fn render_links(
        &self,
        type_name: &str,
        links: Vec<LinkField>,
    ) -> Result<Vec<RenderedLinkField>, TypegenError> {
        let mut rendered = Vec::new();

        for link in links {
            let field = self.schema.field_on_type(type_name, &link.field_name)?;
            let target = inner_type_name(&field.field_type);
            if !self.schema.is_composite_type(target) {
                return Err(TypegenError::ExpectedCompositeType {
                    field_name: link.field_name.clone(),
                    type_name: type_name.to_string(),
                });
            }

            let child = self
                .union_of_branches(target, &link.selections)?
                .unwrap_or_else(|| "{}".to_string());
            rendered.push(RenderedLinkField {
                response_key: link.response_key,
                type_text: wrap_type_modifiers(&field.field_type, &child, self.processor.config()),
            });
        }

        Ok(rendered)
    }

    fn discriminant_mode(&self, queried: bool) -> Option<bool> {
        let present = self.options.add_typename || self.options.non_optional_typename || queried;
        let optional = !queried && !self.options.non_optional_typename;
        present.then_some(optional)
    }

    fn operation_root<'o>(
        &self,
        operation: &'o OperationDefinition<'static, String>,
    ) -> Result<(String, &'o SelectionSet<'static, String>), TypegenError> {
        match operation {
            OperationDefinition::SelectionSet(selection_set) => {
                Ok((self.schema.query_type_name().to_string(), selection_set))
            }
            OperationDefinition::Query(query) => {
                Ok((self.schema.query_type_name().to_string(), &query.selection_set))
            }
            OperationDefinition::Mutation(mutation) => {
                let root = self.schema.mutation_type_name().ok_or_else(|| {
                    TypegenError::MissingRootType {
                        operation_kind: "mutation".to_string(),
                    }
                })?;
                Ok((root.to_string(), &mutation.selection_set))
            }
            OperationDefinition::Subscription(subscription) => {
                let root = self.schema.subscription_type_name().ok_or_else(|| {
                    TypegenError::MissingRootType {
                        operation_kind: "subscription".to_string(),
                    }
                })?;
                Ok((root.to_string(), &subscription.selection_set))
            }
        }
    }
}

fn operation_name<'o>(operation: &'o OperationDefinition<'static, String>) -> Option<&'o str> {
    match operation {
        OperationDefinition::SelectionSet(_) => None,
        OperationDefinition::Query(query) => query.name.as_deref(),
        OperationDefinition::Mutation(mutation) => mutation.name.as_deref(),
        OperationDefinition::Subscription(subscription) => subscription.name.as_deref(),
    }
}
