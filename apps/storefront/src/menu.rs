//! # Menu Boundary
//!
//! Turns the menu API payload into a validated catalog.
//!
//! ## Boundary Checks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Menu Payload → Menu                                  │
//! │                                                                         │
//! │  GET /menu (JSON, camelCase)                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  serde_json::from_str ───── wrong shape ──────► MenuError::Malformed   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  every entry:  id non-empty, name non-empty,                           │
//! │                price >= 0  ── violated ───────► MenuError::InvalidEntry│
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ids unique per kind ────── repeated ─────────► MenuError::DuplicateId │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Menu (typed, read-only for the session)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing downstream re-checks catalog shape; pricing trusts these values.

use std::collections::HashSet;

use pizzeria_core::types::CatalogItem;
use pizzeria_core::validation::{validate_id, validate_name, validate_price};
use pizzeria_core::{Beverage, PizzaCrust, PizzaExtra, PizzaFlavor, PizzaType};
use serde::{Deserialize, Serialize};

use crate::error::{MenuError, MenuResult};

/// The catalog served by the menu API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    #[serde(default)]
    pizza_types: Vec<PizzaType>,
    #[serde(default)]
    flavors: Vec<PizzaFlavor>,
    #[serde(default)]
    extras: Vec<PizzaExtra>,
    #[serde(default)]
    crusts: Vec<PizzaCrust>,
    #[serde(default)]
    beverages: Vec<Beverage>,
}

impl Menu {
    /// Parses and validates a menu payload.
    pub fn from_json(payload: &str) -> MenuResult<Self> {
        let menu: Menu = serde_json::from_str(payload)?;
        menu.validate()?;
        Ok(menu)
    }

    /// Builds a menu from already typed lists, validating them.
    pub fn new(
        pizza_types: Vec<PizzaType>,
        flavors: Vec<PizzaFlavor>,
        extras: Vec<PizzaExtra>,
        crusts: Vec<PizzaCrust>,
        beverages: Vec<Beverage>,
    ) -> MenuResult<Self> {
        let menu = Menu {
            pizza_types,
            flavors,
            extras,
            crusts,
            beverages,
        };
        menu.validate()?;
        Ok(menu)
    }

    fn validate(&self) -> MenuResult<()> {
        validate_entries("pizza type", &self.pizza_types)?;
        validate_entries("flavor", &self.flavors)?;
        validate_entries("extra", &self.extras)?;
        validate_entries("crust", &self.crusts)?;
        validate_entries("beverage", &self.beverages)?;

        for pizza_type in &self.pizza_types {
            validate_entries("extra", &pizza_type.available_extras)?;
            validate_entries("crust", &pizza_type.available_crusts)?;
        }

        Ok(())
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn pizza_type(&self, id: &str) -> Option<&PizzaType> {
        self.pizza_types.iter().find(|p| p.id == id)
    }

    pub fn flavor(&self, id: &str) -> Option<&PizzaFlavor> {
        self.flavors.iter().find(|f| f.id == id)
    }

    /// Finds an extra, preferring the pizza type's own offer list.
    pub fn extra_for<'a>(
        &'a self,
        pizza_type: &'a PizzaType,
        id: &str,
    ) -> Option<&'a PizzaExtra> {
        pizza_type
            .available_extras
            .iter()
            .chain(&self.extras)
            .find(|e| e.id == id)
    }

    /// Finds a crust, preferring the pizza type's own offer list.
    pub fn crust_for<'a>(
        &'a self,
        pizza_type: &'a PizzaType,
        id: &str,
    ) -> Option<&'a PizzaCrust> {
        pizza_type
            .available_crusts
            .iter()
            .chain(&self.crusts)
            .find(|c| c.id == id)
    }

    pub fn beverage(&self, id: &str) -> Option<&Beverage> {
        self.beverages.iter().find(|b| b.id == id)
    }

    /// Beverages matching the drinks page filters.
    ///
    /// - `category_id`: only that category
    /// - `query`: case-insensitive match on name or description
    pub fn search_beverages(&self, category_id: Option<&str>, query: Option<&str>) -> Vec<&Beverage> {
        let query = query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty());

        self.beverages
            .iter()
            .filter(|b| match category_id {
                Some(id) => b.category.as_ref().is_some_and(|c| c.id == id),
                None => true,
            })
            .filter(|b| match &query {
                Some(q) => {
                    b.name.to_lowercase().contains(q)
                        || b.description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(q))
                }
                None => true,
            })
            .collect()
    }

    pub fn pizza_types(&self) -> &[PizzaType] {
        &self.pizza_types
    }

    pub fn flavors(&self) -> &[PizzaFlavor] {
        &self.flavors
    }

    pub fn beverages(&self) -> &[Beverage] {
        &self.beverages
    }
}

fn validate_entries<T: CatalogItem>(kind: &'static str, entries: &[T]) -> MenuResult<()> {
    let mut seen = HashSet::new();

    for entry in entries {
        let invalid = |source| MenuError::InvalidEntry {
            kind,
            id: entry.id().to_string(),
            source,
        };

        validate_id("id", entry.id()).map_err(invalid)?;
        validate_name(entry.name()).map_err(invalid)?;
        validate_price("price", entry.price()).map_err(invalid)?;

        if !seen.insert(entry.id()) {
            return Err(MenuError::DuplicateId {
                kind,
                id: entry.id().to_string(),
            });
        }
    }

    Ok(())
}
