//! Local list of stored items with optimistic removal.
//!
//! A delete removes the entry from the list before the store confirms. If the
//! store delete fails, [`ListModel::restore`] puts the entry back at its
//! original position so the list matches the store again.

#[cfg(test)]
#[path = "listing_test.rs"]
mod listing_test;

/// Items addressable by a store id.
pub trait Listed {
    fn id(&self) -> &str;
}

/// An entry taken out of a list, with the position it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed<T> {
    position: usize,
    item: T,
}

impl<T> Removed<T> {
    #[must_use]
    pub fn item(&self) -> &T {
        &self.item
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListModel<T> {
    items: Vec<T>,
}

impl<T> Default for ListModel<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Listed> ListModel<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the contents, e.g. after a fresh fetch.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Take the entry with `id` out of the list.
    pub fn remove(&mut self, id: &str) -> Option<Removed<T>> {
        let position = self.items.iter().position(|item| item.id() == id)?;
        let item = self.items.remove(position);
        Some(Removed { position, item })
    }

    /// Put a removed entry back where it was.
    pub fn restore(&mut self, removed: Removed<T>) {
        let position = removed.position.min(self.items.len());
        self.items.insert(position, removed.item);
    }
}
