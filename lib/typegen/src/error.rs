#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TypegenError {
    #[error("Schema type '{type_name}' not found.")]
    SchemaTypeNotFound { type_name: String },

    #[error("Field '{field_name}' not found in type '{type_name}'.")]
    FieldNotFoundInType {
        field_name: String,
        type_name: String,
    },

    #[error("Field '{field_name}' on type '{type_name}' does not resolve to an object, interface or union type.")]
    ExpectedCompositeType {
        field_name: String,
        type_name: String,
    },

    #[error("Nested selections in field sets are not supported: '{field_set}'.")]
    UnsupportedFieldSet { field_set: String },

    #[error("Root operation type for '{operation_kind}' is not defined in the schema.")]
    MissingRootType { operation_kind: String },
}
