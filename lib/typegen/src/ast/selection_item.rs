use graphql_parser::query::Selection;

/// One selected item attributed to a single concrete object type by the
/// flattening pass. Items exist only for the duration of one selection-set
/// transformation.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionItem {
    /// A leaf field selected under its own name.
    Field { name: String },
    /// A leaf field selected under an alias.
    AliasedField { alias: String, name: String },
    /// A field with a nested selection set, keyed by its response key.
    Link {
        response_key: String,
        field_name: String,
        selections: Vec<Selection<'static, String>>,
    },
    /// An opaque reference to a named fragment's generated type.
    FragmentUsage { type_ref: String },
    /// The `__typename` meta field.
    Typename,
}
