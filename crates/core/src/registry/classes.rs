use std::collections::HashMap;

use canvas_style_protocol::StyleClass;

/// Read-only snapshot of the style classes, in authored order.
#[derive(Debug, Clone, Default)]
pub struct ClassStore {
    classes: Vec<StyleClass>,
    index: HashMap<String, usize>,
}

impl ClassStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_classes(classes: impl IntoIterator<Item = StyleClass>) -> Self {
        let mut store = Self::new();
        for class in classes {
            store.insert(class);
        }
        store
    }

    /// Insert a class, replacing (in place) any class with the same name.
    pub fn insert(&mut self, class: StyleClass) -> Option<StyleClass> {
        match self.index.get(&class.name) {
            Some(&idx) => Some(std::mem::replace(&mut self.classes[idx], class)),
            None => {
                self.index.insert(class.name.clone(), self.classes.len());
                self.classes.push(class);
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<StyleClass> {
        let idx = self.index.remove(name)?;
        let removed = self.classes.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, name: &str) -> Option<&StyleClass> {
        self.index.get(name).map(|&idx| &self.classes[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleClass> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
