#![forbid(unsafe_code)]

//! Tagged drag identifiers.
//!
//! Items and containers live in separate id spaces. A [`DragId`] carries its
//! kind explicitly, so an item `"7"` and a container `"7"` never compare
//! equal and classification never has to sniff string prefixes.
//!
//! For interop with callers that still pass namespaced strings, `DragId`
//! displays as `item-<id>` / `container-<id>` and [`DragId::parse`] accepts
//! that form back.

use std::fmt;
use std::str::FromStr;

use crate::error::DragIdError;

const ITEM_PREFIX: &str = "item-";
const CONTAINER_PREFIX: &str = "container-";

/// Which id space a [`DragId`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DragKind {
    Item,
    Container,
}

/// Identifier of a drag source or drop target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragId {
    pub kind: DragKind,
    pub id: String,
}

impl DragId {
    /// An item id.
    pub fn item(id: impl Into<String>) -> Self {
        Self {
            kind: DragKind::Item,
            id: id.into(),
        }
    }

    /// A container id.
    pub fn container(id: impl Into<String>) -> Self {
        Self {
            kind: DragKind::Container,
            id: id.into(),
        }
    }

    #[inline]
    pub fn is_item(&self) -> bool {
        self.kind == DragKind::Item
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.kind == DragKind::Container
    }

    /// The raw domain id without its namespace.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Parse the namespaced `item-<id>` / `container-<id>` form.
    pub fn parse(raw: &str) -> Result<Self, DragIdError> {
        let (kind, rest) = if let Some(rest) = raw.strip_prefix(CONTAINER_PREFIX) {
            (DragKind::Container, rest)
        } else if let Some(rest) = raw.strip_prefix(ITEM_PREFIX) {
            (DragKind::Item, rest)
        } else {
            return Err(DragIdError::MissingNamespace(raw.to_owned()));
        };
        if rest.is_empty() {
            return Err(DragIdError::EmptyId);
        }
        Ok(Self {
            kind,
            id: rest.to_owned(),
        })
    }
}

impl fmt::Display for DragId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            DragKind::Item => ITEM_PREFIX,
            DragKind::Container => CONTAINER_PREFIX,
        };
        write!(f, "{prefix}{}", self.id)
    }
}

impl FromStr for DragId {
    type Err = DragIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
