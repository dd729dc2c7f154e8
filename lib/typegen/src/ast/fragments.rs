use graphql_parser::query::{Definition, Document, FragmentDefinition, TypeCondition};
use rustc_hash::FxHashMap;

/// The library of named fragment definitions available to spread resolution.
#[derive(Debug, Default)]
pub struct FragmentLibrary {
    fragments: FxHashMap<String, FragmentDefinition<'static, String>>,
}

impl FragmentLibrary {
    pub fn new(document: &Document<'static, String>) -> Self {
        let mut fragments = FxHashMap::default();

        for def in &document.definitions {
            if let Definition::Fragment(fragment) = def {
                fragments.insert(fragment.name.clone(), fragment.clone());
            }
        }

        Self { fragments }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FragmentDefinition<'static, String>> {
        self.fragments.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

pub fn type_condition_name<'f>(fragment: &'f FragmentDefinition<'static, String>) -> &'f str {
    let TypeCondition::On(type_name) = &fragment.type_condition;
    type_name
}
