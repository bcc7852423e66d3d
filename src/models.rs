//! Drink records and their collection semantics.
//!
//! A [`Drink`] is an immutable value once constructed; edits produce a fresh
//! record that replaces or appends into the ordered collection. Every drink
//! carries a stable [`DrinkId`] generated at creation, so an edit targets a
//! record by identity rather than by its position in the list.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier assigned to a drink when it is created or first decoded.
///
/// Seed files shipped with the app predate ids; records decoded without one
/// get a fresh id, which becomes durable the first time the collection is
/// saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrinkId(Uuid);

impl DrinkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DrinkId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DrinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A single drink recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    /// Stable identity; generated when absent in legacy/seed files.
    #[serde(default)]
    pub id: DrinkId,
    /// Display name.
    pub name: String,
    /// Image file name / remote key. Empty for locally created records that
    /// have no photo yet.
    #[serde(default)]
    pub img: String,
    /// Free-text ingredient list.
    pub ingredients: String,
    /// Free-text preparation directions.
    pub directions: String,
}

impl Drink {
    /// Create a new drink with a fresh identity.
    pub fn new(
        name: impl Into<String>,
        img: impl Into<String>,
        ingredients: impl Into<String>,
        directions: impl Into<String>,
    ) -> Self {
        Self {
            id: DrinkId::new(),
            name: name.into(),
            img: img.into(),
            ingredients: ingredients.into(),
            directions: directions.into(),
        }
    }

    /// Whether the record has an image key to resolve.
    pub fn has_image(&self) -> bool {
        !self.img.is_empty()
    }

    /// Whether every user-editable field is filled in. The editor uses this
    /// to gate its save affordance.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.ingredients.is_empty() && !self.directions.is_empty()
    }
}
