//! # Extras Placement
//!
//! Tracks where each extra topping goes on a pizza: the whole pizza or one
//! flavor half. Placement is a labeling concern for the kitchen and the
//! customer; pricing ignores it.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  One active placement per extra                                         │
//! │                                                                         │
//! │   toggle(bacon, Flavor(A))   →  [bacon@A]                               │
//! │   toggle(bacon, Whole)       →  [bacon@Whole]     (moved, not added)    │
//! │   toggle(bacon, Whole)       →  []                (same target = off)   │
//! │                                                                         │
//! │  Reverting to a single flavor                                           │
//! │                                                                         │
//! │   [bacon@A, olives@B]  retain_flavors([A])  →  [bacon@A, olives@Whole]  │
//! │   nothing ever points at a flavor that left the selection               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::PizzaExtra;

// =============================================================================
// Placement
// =============================================================================

/// Target of an extra topping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(tag = "target", content = "flavorId", rename_all = "camelCase")]
#[ts(export)]
pub enum Placement {
    /// Spread over the whole pizza.
    #[default]
    Whole,
    /// Only on the half covered by the given flavor id.
    Flavor(String),
}

impl Placement {
    /// Creates a placement on one flavor half.
    pub fn on_flavor(flavor_id: impl Into<String>) -> Self {
        Placement::Flavor(flavor_id.into())
    }

    /// Returns the flavor id for half placements, `None` for the whole pizza.
    pub fn flavor_id(&self) -> Option<&str> {
        match self {
            Placement::Whole => None,
            Placement::Flavor(id) => Some(id),
        }
    }

    /// Checks if this placement covers the whole pizza.
    pub fn is_whole(&self) -> bool {
        matches!(self, Placement::Whole)
    }
}

// =============================================================================
// Applied Extra
// =============================================================================

/// An extra together with where it goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppliedExtra {
    pub extra: PizzaExtra,
    pub placement: Placement,
}

// =============================================================================
// Extras Placement
// =============================================================================

/// The set of extras on one pizza, at most one placement per extra.
///
/// Insertion order is kept so receipts list extras in the order the customer
/// picked them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtrasPlacement {
    applied: Vec<AppliedExtra>,
}

impl ExtrasPlacement {
    /// Creates an empty placement set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `extra` on `placement`, moving it if it was active elsewhere.
    ///
    /// Returns the previous placement, if any. The extra keeps its position
    /// in the list when moved.
    pub fn place(&mut self, extra: PizzaExtra, placement: Placement) -> Option<Placement> {
        match self.applied.iter_mut().find(|a| a.extra.id == extra.id) {
            Some(existing) => {
                existing.extra = extra;
                Some(std::mem::replace(&mut existing.placement, placement))
            }
            None => {
                self.applied.push(AppliedExtra { extra, placement });
                None
            }
        }
    }

    /// Removes the extra's single placement entry.
    pub fn remove(&mut self, extra_id: &str) -> Option<AppliedExtra> {
        let index = self.applied.iter().position(|a| a.extra.id == extra_id)?;
        Some(self.applied.remove(index))
    }

    /// Toggles an extra on a placement, the way a checkbox per target does.
    ///
    /// - Not active: placed on `placement`
    /// - Active on a different target: moved to `placement`
    /// - Active on the same target: removed
    ///
    /// Returns `true` when the extra is active afterwards.
    pub fn toggle(&mut self, extra: PizzaExtra, placement: Placement) -> bool {
        if self.placement_of(&extra.id) == Some(&placement) {
            self.remove(&extra.id);
            false
        } else {
            self.place(extra, placement);
            true
        }
    }

    /// Returns the active placement of an extra.
    pub fn placement_of(&self, extra_id: &str) -> Option<&Placement> {
        self.applied
            .iter()
            .find(|a| a.extra.id == extra_id)
            .map(|a| &a.placement)
    }

    /// Reassigns to `Whole` every extra placed on a flavor not in `flavor_ids`.
    ///
    /// Returns how many extras were reassigned.
    pub fn retain_flavors(&mut self, flavor_ids: &[&str]) -> usize {
        let mut reassigned = 0;
        for applied in &mut self.applied {
            if let Placement::Flavor(id) = &applied.placement {
                if !flavor_ids.contains(&id.as_str()) {
                    applied.placement = Placement::Whole;
                    reassigned += 1;
                }
            }
        }
        reassigned
    }

    /// Returns the applied extras in selection order.
    pub fn applied(&self) -> &[AppliedExtra] {
        &self.applied
    }

    /// Number of active extras.
    pub fn len(&self) -> usize {
        self.applied.len()
    }

    /// Checks if no extra is active.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

impl From<Vec<AppliedExtra>> for ExtrasPlacement {
    /// Builds a placement set, keeping the last placement of a repeated extra.
    fn from(applied: Vec<AppliedExtra>) -> Self {
        let mut placement = ExtrasPlacement::new();
        for a in applied {
            placement.place(a.extra, a.placement);
        }
        placement
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
