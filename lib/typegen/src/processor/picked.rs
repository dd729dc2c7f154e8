use super::{
    AliasedField, FieldPair, ProcessorConfig, ProcessorToken, TypeExpressionProcessor,
};
use crate::error::TypegenError;
use crate::state::schema_state::SchemaState;

/// Projects the queried fields onto the base type generated for the schema
/// type: plain fields become one `Pick<Parent, 'a' | 'b'>` projection and
/// aliased fields become indexed accesses into the same base type.
#[derive(Debug, Default)]
pub struct PickedTypeProcessor {
    config: ProcessorConfig,
}

impl PickedTypeProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }
}

impl TypeExpressionProcessor for PickedTypeProcessor {
    fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    fn render_primitives(
        &self,
        _schema: &SchemaState,
        type_name: &str,
        fields: &[String],
    ) -> Result<Vec<ProcessorToken>, TypegenError> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }

        let parent = self.config.convert_type_name(type_name);
        let keys = fields
            .iter()
            .map(|field| format!("'{}'", field))
            .collect::<Vec<_>>()
            .join(" | ");

        Ok(vec![ProcessorToken::Text(format!("Pick<{}, {}>", parent, keys))])
    }

    fn render_aliased_primitives(
        &self,
        _schema: &SchemaState,
        type_name: &str,
        fields: &[AliasedField],
    ) -> Result<Vec<ProcessorToken>, TypegenError> {
        let parent = self.config.convert_type_name(type_name);

        Ok(fields
            .iter()
            .map(|field| {
                ProcessorToken::Field(FieldPair {
                    name: self.config.format_field_name(&field.alias),
                    optional: false,
                    type_text: format!("{}['{}']", parent, field.name),
                })
            })
            .collect())
    }
}
