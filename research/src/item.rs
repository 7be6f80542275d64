use rustc_hash::FxHashMap;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Interns item names as dense ids.
#[derive(Default)]
pub struct ItemIds {
    inner: FxHashMap<Box<str>, ItemId>,
    names: Vec<Box<str>>,
}

impl ItemIds {
    pub fn get_or_insert(&mut self, name: String) -> ItemId {
        if let Some(&id) = self.inner.get(name.as_str()) {
            return id;
        }
        let id = ItemId(self.names.len());
        let name = name.into_boxed_str();
        self.names.push(name.clone());
        self.inner.insert(name, id);
        id
    }

    pub fn get(&self, name: &str) -> Option<ItemId> {
        self.inner.get(name).copied()
    }

    pub fn name(&self, ItemId(id): ItemId) -> &str {
        &self.names[id]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Dense table of per-item values.
pub struct ByItemId<T> {
    inner: Vec<Option<T>>,
}

impl<T> Default for ByItemId<T> {
    fn default() -> Self {
        ByItemId { inner: Vec::new() }
    }
}

impl<T> ByItemId<T> {
    pub fn get(&self, ItemId(id): ItemId) -> Option<&T> {
        match self.inner.get(id) {
            Some(Some(t)) => Some(t),
            _ => None,
        }
    }

    pub fn set(&mut self, ItemId(id): ItemId, value: T) {
        if self.inner.len() <= id {
            self.inner.resize_with(id + 1, || None);
        }
        self.inner[id] = Some(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &T)> {
        self.inner
            .iter()
            .enumerate()
            .filter_map(|(id, value)| value.as_ref().map(|value| (ItemId(id), value)))
    }
}
