use graphql_parser::schema::Field;

use super::{
    AliasedField, FieldPair, ProcessorConfig, ProcessorToken, TypeExpressionProcessor,
};
use crate::error::TypegenError;
use crate::state::schema_state::SchemaState;
use crate::utils::ast::{inner_type_name, wrap_type_modifiers};

/// Pre-resolves every selected field into an independent literal shape:
/// scalars go through the scalar map, enums through name conversion, and the
/// declared nullability/list modifiers are applied inside-out.
#[derive(Debug, Default)]
pub struct LiteralTypeProcessor {
    config: ProcessorConfig,
}

impl LiteralTypeProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    fn resolve_field_type(&self, schema: &SchemaState, field: &Field<'static, String>) -> String {
        let inner = inner_type_name(&field.field_type);
        let base = if schema.is_scalar_type(inner) {
            self.config.scalar_type(inner)
        } else if schema.is_enum_type(inner) {
            self.config.convert_enum_name(inner)
        } else {
            self.config.convert_type_name(inner)
        };

        wrap_type_modifiers(&field.field_type, &base, &self.config)
    }
}

impl TypeExpressionProcessor for LiteralTypeProcessor {
    fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    fn render_primitives(
        &self,
        schema: &SchemaState,
        type_name: &str,
        fields: &[String],
    ) -> Result<Vec<ProcessorToken>, TypegenError> {
        fields
            .iter()
            .map(|name| {
                let field = schema.field_on_type(type_name, name)?;
                Ok(ProcessorToken::Field(FieldPair {
                    name: self.config.format_field_name(name),
                    optional: false,
                    type_text: self.resolve_field_type(schema, field),
                }))
            })
            .collect()
    }

    fn render_aliased_primitives(
        &self,
        schema: &SchemaState,
        type_name: &str,
        fields: &[AliasedField],
    ) -> Result<Vec<ProcessorToken>, TypegenError> {
        fields
            .iter()
            .map(|aliased| {
                let field = schema.field_on_type(type_name, &aliased.name)?;
                Ok(ProcessorToken::Field(FieldPair {
                    name: self.config.format_field_name(&aliased.alias),
                    optional: false,
                    type_text: self.resolve_field_type(schema, field),
                }))
            })
            .collect()
    }
}
