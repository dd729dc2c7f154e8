use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Shared configuration consumed by every type-expression processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Schema scalar name to target primitive type name. Unmapped scalars
    /// fall back to `any`.
    pub scalars: FxHashMap<String, String>,
    /// Qualifier prepended to generated schema type references, e.g. `Types`
    /// when base types are imported under a namespace.
    pub namespace: Option<String>,
    /// Prefix applied to enum type names before qualification.
    pub enum_prefix: Option<String>,
    /// Marks every generated field as immutable.
    pub immutable_fields: bool,
    /// Wrapper applied to nullable positions.
    pub optional_wrapper: String,
    /// Wrapper applied to list positions.
    pub list_wrapper: String,
    /// Suffix of generated fragment type names.
    pub fragment_suffix: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            scalars: default_scalars(),
            namespace: None,
            enum_prefix: None,
            immutable_fields: false,
            optional_wrapper: "Maybe".to_string(),
            list_wrapper: "Array".to_string(),
            fragment_suffix: "Fragment".to_string(),
        }
    }
}

fn default_scalars() -> FxHashMap<String, String> {
    [
        ("ID", "string"),
        ("String", "string"),
        ("Int", "number"),
        ("Float", "number"),
        ("Boolean", "boolean"),
    ]
    .iter()
    .map(|(scalar, target)| (scalar.to_string(), target.to_string()))
    .collect()
}

impl ProcessorConfig {
    pub fn convert_type_name(&self, name: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}.{}", namespace, name),
            None => name.to_string(),
        }
    }

    pub fn convert_enum_name(&self, name: &str) -> String {
        let prefixed = match &self.enum_prefix {
            Some(prefix) => format!("{}{}", prefix, name),
            None => name.to_string(),
        };
        self.convert_type_name(&prefixed)
    }

    pub fn format_field_name(&self, name: &str) -> String {
        if self.immutable_fields {
            format!("readonly {}", name)
        } else {
            name.to_string()
        }
    }

    pub fn scalar_type(&self, name: &str) -> String {
        self.scalars
            .get(name)
            .cloned()
            .unwrap_or_else(|| "any".to_string())
    }

    pub fn optional(&self, text: &str) -> String {
        format!("{}<{}>", self.optional_wrapper, text)
    }

    /// The declared name of a fragment's generated type.
    pub fn fragment_base_name(&self, fragment_name: &str) -> String {
        format!("{}{}", fragment_name, self.fragment_suffix)
    }

    /// The usage token of one concrete-type variant of a fragment. The
    /// concrete type name disambiguates only when the fragment's type
    /// condition spans more than one possible type.
    pub fn fragment_usage_name(
        &self,
        fragment_name: &str,
        concrete_type: &str,
        spans_multiple: bool,
    ) -> String {
        let base = self.fragment_base_name(fragment_name);
        if spans_multiple {
            format!("{}_{}", base, concrete_type)
        } else {
            base
        }
    }
}
