#![forbid(unsafe_code)]

//! Ordered containers of items, with a membership index.
//!
//! [`Board`] is the caller-owned data the engine reads. The engine never
//! mutates it; callers apply the intents the coordinator reports with
//! [`Board::apply`] (or their own logic) and re-render.
//!
//! # Invariants
//!
//! 1. Container ids are unique.
//! 2. Every item id appears exactly once across all containers.
//! 3. The index maps every item id to its current (container, position)
//!    and every container id to its current position.
//!
//! `Board::new` rejects data that breaks 1 or 2; every mutation keeps 3.

use ahash::AHashMap;

use crate::error::BoardError;
use crate::intent::ReorderIntent;

/// A single entry in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub label: String,
}

impl Item {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A named, ordered list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Container {
    pub id: String,
    pub name: String,
    pub items: Vec<Item>,
}

impl Container {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Builder: append an item.
    #[must_use]
    pub fn with_item(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.items.push(Item::new(id, label));
        self
    }
}

/// Where an item currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLocation {
    /// Position of the owning container in the board.
    pub container: usize,
    /// Position of the item within its container.
    pub index: usize,
}

/// Ordered containers plus a reverse index for O(1) membership lookups.
#[derive(Debug, Clone, Default)]
pub struct Board {
    containers: Vec<Container>,
    container_index: AHashMap<String, usize>,
    item_index: AHashMap<String, ItemLocation>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.containers == other.containers
    }
}

impl Eq for Board {}

impl Board {
    /// Build a board, rejecting duplicate container or item ids.
    pub fn new(containers: Vec<Container>) -> Result<Self, BoardError> {
        let mut container_index = AHashMap::with_capacity(containers.len());
        let mut item_index = AHashMap::new();

        for (ci, container) in containers.iter().enumerate() {
            if container_index.insert(container.id.clone(), ci).is_some() {
                return Err(BoardError::DuplicateContainer(container.id.clone()));
            }
            for (index, item) in container.items.iter().enumerate() {
                let loc = ItemLocation {
                    container: ci,
                    index,
                };
                if let Some(prev) = item_index.insert(item.id.clone(), loc) {
                    return Err(BoardError::DuplicateItem {
                        item_id: item.id.clone(),
                        first_container: containers[prev.container].id.clone(),
                        second_container: container.id.clone(),
                    });
                }
            }
        }

        Ok(Self {
            containers,
            container_index,
            item_index,
        })
    }

    #[inline]
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Consume the board, returning its containers.
    pub fn into_containers(self) -> Vec<Container> {
        self.containers
    }

    /// Number of containers.
    #[inline]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Total number of items across all containers.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.item_index.len()
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.container_position(id).map(|ci| &self.containers[ci])
    }

    /// Position of a container in the board order.
    #[inline]
    pub fn container_position(&self, id: &str) -> Option<usize> {
        self.container_index.get(id).copied()
    }

    /// Current location of an item.
    #[inline]
    pub fn locate_item(&self, item_id: &str) -> Option<ItemLocation> {
        self.item_index.get(item_id).copied()
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        let loc = self.locate_item(item_id)?;
        self.containers.get(loc.container)?.items.get(loc.index)
    }

    /// The container that currently owns an item.
    pub fn owner_of(&self, item_id: &str) -> Option<&Container> {
        let loc = self.locate_item(item_id)?;
        self.containers.get(loc.container)
    }

    /// Apply a reorder intent.
    ///
    /// Cross-container moves append the item to the end of the target.
    pub fn apply(&mut self, intent: &ReorderIntent) -> Result<(), BoardError> {
        match intent {
            ReorderIntent::ItemMove {
                item_id,
                from_container,
                to_container,
            } => {
                let owner = self
                    .owner_of(item_id)
                    .ok_or_else(|| BoardError::UnknownItem(item_id.clone()))?;
                if owner.id != *from_container {
                    return Err(BoardError::UnknownItem(item_id.clone()));
                }
                self.move_item(item_id, to_container, None).map(|_| ())
            }
            ReorderIntent::ItemReorder {
                container_id,
                from_index,
                to_index,
            } => self.reorder_items(container_id, *from_index, *to_index),
            ReorderIntent::ContainerReorder {
                from_index,
                to_index,
            } => self.reorder_containers(*from_index, *to_index),
        }
    }

    /// Move an item into `to_container` at `at` (appending when `None` or
    /// past the end). Returns where the item was before the move.
    pub fn move_item(
        &mut self,
        item_id: &str,
        to_container: &str,
        at: Option<usize>,
    ) -> Result<ItemLocation, BoardError> {
        let from = self
            .locate_item(item_id)
            .ok_or_else(|| BoardError::UnknownItem(item_id.to_owned()))?;
        let to = self
            .container_position(to_container)
            .ok_or_else(|| BoardError::UnknownContainer(to_container.to_owned()))?;

        let item = self.containers[from.container].items.remove(from.index);
        let dest = &mut self.containers[to].items;
        let index = at.unwrap_or(dest.len()).min(dest.len());
        dest.insert(index, item);

        self.reindex_container(from.container);
        if to != from.container {
            self.reindex_container(to);
        }
        Ok(from)
    }

    /// Move the item at `from` to `to` within one container.
    pub fn reorder_items(
        &mut self,
        container_id: &str,
        from: usize,
        to: usize,
    ) -> Result<(), BoardError> {
        let ci = self
            .container_position(container_id)
            .ok_or_else(|| BoardError::UnknownContainer(container_id.to_owned()))?;
        array_move(&mut self.containers[ci].items, from, to)?;
        self.reindex_container(ci);
        Ok(())
    }

    /// Move the container at `from` to `to`.
    pub fn reorder_containers(&mut self, from: usize, to: usize) -> Result<(), BoardError> {
        array_move(&mut self.containers, from, to)?;
        self.reindex_all();
        Ok(())
    }

    /// Rename a container in place.
    pub fn rename_container(&mut self, id: &str, name: impl Into<String>) -> Result<(), BoardError> {
        let ci = self
            .container_position(id)
            .ok_or_else(|| BoardError::UnknownContainer(id.to_owned()))?;
        self.containers[ci].name = name.into();
        Ok(())
    }

    fn reindex_container(&mut self, ci: usize) {
        for (index, item) in self.containers[ci].items.iter().enumerate() {
            self.item_index.insert(
                item.id.clone(),
                ItemLocation {
                    container: ci,
                    index,
                },
            );
        }
    }

    fn reindex_all(&mut self) {
        self.container_index.clear();
        for (ci, container) in self.containers.iter().enumerate() {
            self.container_index.insert(container.id.clone(), ci);
        }
        for ci in 0..self.containers.len() {
            self.reindex_container(ci);
        }
    }
}

/// Remove the element at `from` and re-insert it at `to`.
fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), BoardError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(BoardError::IndexOutOfRange { index, len });
        }
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}
