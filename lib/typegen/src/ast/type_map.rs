use rustc_hash::FxHashMap;

use super::selection_item::SelectionItem;

/// A complete partition of selected items over the governing set of concrete
/// object types. Every possible type holds an entry, even when nothing was
/// selected for it; pushes targeting a type outside the governing set are
/// dropped.
#[derive(Debug, Default)]
pub struct TypeMap {
    order: Vec<String>,
    items: FxHashMap<String, Vec<SelectionItem>>,
}

impl TypeMap {
    pub fn new(possible_types: &[String]) -> Self {
        let mut items = FxHashMap::default();
        for type_name in possible_types {
            items.insert(type_name.clone(), Vec::new());
        }

        Self {
            order: possible_types.to_vec(),
            items,
        }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.items.contains_key(type_name)
    }

    pub fn push(&mut self, type_name: &str, item: SelectionItem) {
        if let Some(list) = self.items.get_mut(type_name) {
            list.push(item);
        }
    }

    pub fn get(&self, type_name: &str) -> Option<&[SelectionItem]> {
        self.items.get(type_name).map(Vec::as_slice)
    }

    pub fn types(&self) -> &[String] {
        &self.order
    }

    /// Consumes the map in possible-types order.
    pub fn into_entries(self) -> Vec<(String, Vec<SelectionItem>)> {
        let TypeMap { order, mut items } = self;
        order
            .into_iter()
            .map(|type_name| {
                let list = items.remove(&type_name).unwrap_or_default();
                (type_name, list)
            })
            .collect()
    }
}
