mod config;
mod literal;
mod picked;

pub use config::ProcessorConfig;
pub use literal::LiteralTypeProcessor;
pub use picked::PickedTypeProcessor;

use crate::error::TypegenError;
use crate::state::schema_state::SchemaState;

/// A leaf field selected under an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasedField {
    pub alias: String,
    pub name: String,
}

/// A nested-object field whose child type expression has already been
/// produced recursively and wrapped with its schema type modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLinkField {
    pub response_key: String,
    pub type_text: String,
}

/// A `name: type` pair destined for the merged record fragment of one
/// concrete type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPair {
    pub name: String,
    pub optional: bool,
    pub type_text: String,
}

/// One rendered fragment of a concrete type's expression: either a named
/// field pair, or an already-composed expression used verbatim as an
/// intersection operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorToken {
    Field(FieldPair),
    Text(String),
}

/// Renders classified fields into target-syntax fragments. Exactly one
/// implementation is active per generation run; implementations encode
/// different target idioms but carry the same information: every primitive
/// field with its nullability, every link field with its nested shape and
/// wrapping, the discriminant per policy.
pub trait TypeExpressionProcessor {
    fn config(&self) -> &ProcessorConfig;

    fn render_discriminant(&self, type_name: &str, optional: bool) -> ProcessorToken {
        ProcessorToken::Field(FieldPair {
            name: self.config().format_field_name("__typename"),
            optional,
            type_text: format!("'{}'", type_name),
        })
    }

    fn render_primitives(
        &self,
        schema: &SchemaState,
        type_name: &str,
        fields: &[String],
    ) -> Result<Vec<ProcessorToken>, TypegenError>;

    fn render_aliased_primitives(
        &self,
        schema: &SchemaState,
        type_name: &str,
        fields: &[AliasedField],
    ) -> Result<Vec<ProcessorToken>, TypegenError>;

    fn render_link_fields(&self, links: &[RenderedLinkField]) -> Vec<ProcessorToken> {
        links
            .iter()
            .map(|link| {
                ProcessorToken::Field(FieldPair {
                    name: self.config().format_field_name(&link.response_key),
                    optional: false,
                    type_text: link.type_text.clone(),
                })
            })
            .collect()
    }
}
