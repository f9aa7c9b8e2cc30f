//! # Pizza Selection
//!
//! The ephemeral state of the customization screen: one pizza type, one or
//! two flavors, an optional crust, placed extras, quantity and observations.
//!
//! Every mutator keeps the placement invariant:
//! - single flavor: every extra sits on the whole pizza
//! - half-and-half: an extra sits on the whole pizza or on one of the two
//!   selected flavors, never on a flavor that left the selection

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::placement::{ExtrasPlacement, Placement};
use crate::types::{PizzaCrust, PizzaExtra, PizzaFlavor, PizzaType};
use crate::validation::{
    validate_flavor_count, validate_observations, validate_quantity, ValidationResult,
};

/// A pizza being customized.
#[derive(Debug, Clone, PartialEq)]
pub struct PizzaSelection {
    pizza_type: PizzaType,
    flavors: Vec<PizzaFlavor>,
    crust: Option<PizzaCrust>,
    extras: ExtrasPlacement,
    quantity: i64,
    observations: String,
}

impl PizzaSelection {
    /// Starts a selection for a pizza type: no flavor yet, quantity 1.
    pub fn new(pizza_type: PizzaType) -> Self {
        PizzaSelection {
            pizza_type,
            flavors: Vec::new(),
            crust: None,
            extras: ExtrasPlacement::new(),
            quantity: 1,
            observations: String::new(),
        }
    }

    // =========================================================================
    // Flavors
    // =========================================================================

    /// Selects a single flavor for the whole pizza.
    ///
    /// Switching from half-and-half moves every half-placed extra to the
    /// whole pizza. Returns how many extras were moved.
    pub fn choose_flavor(&mut self, flavor: PizzaFlavor) -> usize {
        self.flavors = vec![flavor];
        self.extras.retain_flavors(&[])
    }

    /// Selects two flavors, one per half.
    ///
    /// Extras placed on a flavor that is not one of the two new halves are
    /// moved to the whole pizza. Returns how many extras were moved.
    pub fn choose_halves(
        &mut self,
        first: PizzaFlavor,
        second: PizzaFlavor,
    ) -> ValidationResult<usize> {
        if first.id == second.id {
            return Err(ValidationError::Duplicate {
                field: "flavor".to_string(),
                value: first.id,
            });
        }

        self.flavors = vec![first, second];
        let keep: Vec<&str> = self.flavors.iter().map(|f| f.id.as_str()).collect();
        Ok(self.extras.retain_flavors(&keep))
    }

    /// Leaves half-and-half mode, keeping the first flavor.
    ///
    /// Returns how many extras were moved to the whole pizza.
    pub fn revert_to_single(&mut self) -> usize {
        self.flavors.truncate(1);
        self.extras.retain_flavors(&[])
    }

    /// Checks if two flavors are selected.
    pub fn is_half_and_half(&self) -> bool {
        self.flavors.len() > 1
    }

    /// Checks if at least one flavor is selected.
    pub fn has_flavor(&self) -> bool {
        !self.flavors.is_empty()
    }

    // =========================================================================
    // Crust
    // =========================================================================

    /// Sets or clears the crust.
    pub fn set_crust(&mut self, crust: Option<PizzaCrust>) -> ValidationResult<()> {
        if let Some(crust) = &crust {
            if !self.pizza_type.offers_crust(&crust.id) {
                return Err(self.not_offered("crust", &self.pizza_type.available_crusts));
            }
        }

        self.crust = crust;
        Ok(())
    }

    // =========================================================================
    // Extras
    // =========================================================================

    /// Toggles an extra on a placement (see [`ExtrasPlacement::toggle`]).
    ///
    /// ## Errors
    /// - The pizza type does not offer this extra
    /// - A half placement on a single-flavor pizza
    /// - A half placement on a flavor that is not selected
    ///
    /// Returns `true` when the extra is active afterwards.
    pub fn toggle_extra(
        &mut self,
        extra: PizzaExtra,
        placement: Placement,
    ) -> ValidationResult<bool> {
        if !self.pizza_type.offers_extra(&extra.id) {
            return Err(self.not_offered("extra", &self.pizza_type.available_extras));
        }

        self.check_placement(&extra.id, &placement)?;
        Ok(self.extras.toggle(extra, placement))
    }

    fn check_placement(&self, extra_id: &str, placement: &Placement) -> ValidationResult<()> {
        let Some(flavor_id) = placement.flavor_id() else {
            return Ok(());
        };

        let on_selected_half =
            self.is_half_and_half() && self.flavors.iter().any(|f| f.id == flavor_id);

        if on_selected_half {
            Ok(())
        } else {
            Err(ValidationError::InvalidPlacement {
                extra_id: extra_id.to_string(),
                flavor_id: flavor_id.to_string(),
            })
        }
    }

    fn not_offered<T: crate::types::CatalogItem>(
        &self,
        field: &str,
        offered: &[T],
    ) -> ValidationError {
        ValidationError::NotAllowed {
            field: field.to_string(),
            allowed: offered.iter().map(|item| item.id().to_string()).collect(),
        }
    }

    // =========================================================================
    // Quantity & Observations
    // =========================================================================

    /// Sets the quantity (1..=999).
    pub fn set_quantity(&mut self, quantity: i64) -> ValidationResult<()> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    /// Sets the free-text observations.
    pub fn set_observations(&mut self, text: impl Into<String>) -> ValidationResult<()> {
        let text = text.into();
        validate_observations(&text)?;
        self.observations = text;
        Ok(())
    }

    // =========================================================================
    // Validation & Accessors
    // =========================================================================

    /// Checks that the selection may be added to the cart.
    ///
    /// ## Errors
    /// - `IncompleteSelection` when no flavor is selected
    /// - `Validation` for a bad quantity or a dangling extra placement
    pub fn validate(&self) -> CoreResult<()> {
        if self.flavors.is_empty() {
            return Err(CoreError::IncompleteSelection {
                pizza_type: self.pizza_type.name.clone(),
            });
        }

        validate_flavor_count(self.flavors.len())?;
        validate_quantity(self.quantity)?;
        validate_observations(&self.observations)?;

        for applied in self.extras.applied() {
            self.check_placement(&applied.extra.id, &applied.placement)?;
        }

        Ok(())
    }

    /// Name shown in the cart: `"Large (Calabresa / Tuna)"`.
    pub fn display_name(&self) -> String {
        let flavors: Vec<&str> = self.flavors.iter().map(|f| f.name.as_str()).collect();
        format!("{} ({})", self.pizza_type.name, flavors.join(" / "))
    }

    pub fn pizza_type(&self) -> &PizzaType {
        &self.pizza_type
    }

    pub fn flavors(&self) -> &[PizzaFlavor] {
        &self.flavors
    }

    pub fn crust(&self) -> Option<&PizzaCrust> {
        self.crust.as_ref()
    }

    pub fn extras(&self) -> &ExtrasPlacement {
        &self.extras
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn observations(&self) -> &str {
        &self.observations
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn pizza_type() -> PizzaType {
        PizzaType {
            id: "large".to_string(),
            name: "Large".to_string(),
            description: None,
            base_price: Money::from_cents(2500),
            available_extras: Vec::new(),
            available_crusts: Vec::new(),
        }
    }

    fn flavor(id: &str, name: &str) -> PizzaFlavor {
        PizzaFlavor {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            price: Money::from_cents(500),
        }
    }

    fn extra(id: &str) -> PizzaExtra {
        PizzaExtra {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            price: Money::from_cents(300),
        }
    }

    fn crust(id: &str) -> PizzaCrust {
        PizzaCrust {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            price: Money::from_cents(800),
        }
    }

    #[test]
    fn test_new_selection_is_incomplete() {
        let selection = PizzaSelection::new(pizza_type());
        assert!(!selection.has_flavor());
        assert_eq!(selection.quantity(), 1);
        assert!(matches!(
            selection.validate(),
            Err(CoreError::IncompleteSelection { .. })
        ));
    }

    #[test]
    fn test_half_placement_requires_half_and_half() {
        let mut selection = PizzaSelection::new(pizza_type());
        selection.choose_flavor(flavor("calabresa", "Calabresa"));

        let err = selection
            .toggle_extra(extra("bacon"), Placement::on_flavor("calabresa"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPlacement { .. }));

        assert!(selection.toggle_extra(extra("bacon"), Placement::Whole).unwrap());
        assert!(selection.validate().is_ok());
    }

    #[test]
    fn test_half_placement_on_unselected_flavor_is_rejected() {
        let mut selection = PizzaSelection::new(pizza_type());
        selection
            .choose_halves(flavor("a", "A"), flavor("b", "B"))
            .unwrap();

        assert!(selection
            .toggle_extra(extra("bacon"), Placement::on_flavor("b"))
            .unwrap());
        assert!(selection
            .toggle_extra(extra("olives"), Placement::on_flavor("c"))
            .is_err());
        assert_eq!(selection.extras().len(), 1);
    }

    #[test]
    fn test_revert_to_single_moves_half_extras_to_whole() {
        let mut selection = PizzaSelection::new(pizza_type());
        selection
            .choose_halves(flavor("a", "A"), flavor("b", "B"))
            .unwrap();
        selection
            .toggle_extra(extra("bacon"), Placement::on_flavor("b"))
            .unwrap();
        selection
            .toggle_extra(extra("olives"), Placement::on_flavor("a"))
            .unwrap();

        let moved = selection.revert_to_single();

        assert_eq!(moved, 2);
        assert!(!selection.is_half_and_half());
        assert_eq!(selection.flavors()[0].id, "a");
        assert!(selection.extras().applied().iter().all(|a| a.placement.is_whole()));
        assert!(selection.validate().is_ok());
    }

    #[test]
    fn test_swapping_one_half_drops_its_placements() {
        let mut selection = PizzaSelection::new(pizza_type());
        selection
            .choose_halves(flavor("a", "A"), flavor("b", "B"))
            .unwrap();
        selection
            .toggle_extra(extra("bacon"), Placement::on_flavor("b"))
            .unwrap();

        let moved = selection
            .choose_halves(flavor("a", "A"), flavor("c", "C"))
            .unwrap();

        assert_eq!(moved, 1);
        assert_eq!(selection.extras().placement_of("bacon"), Some(&Placement::Whole));
    }

    #[test]
    fn test_same_flavor_twice_is_rejected() {
        let mut selection = PizzaSelection::new(pizza_type());
        assert!(selection
            .choose_halves(flavor("a", "A"), flavor("a", "A"))
            .is_err());
        assert!(!selection.has_flavor());
    }

    #[test]
    fn test_unavailable_crust_and_extra() {
        let mut restricted = pizza_type();
        restricted.available_crusts.push(crust("catupiry"));
        restricted.available_extras.push(extra("bacon"));
        let mut selection = PizzaSelection::new(restricted);
        selection.choose_flavor(flavor("a", "A"));

        assert!(selection.set_crust(Some(crust("catupiry"))).is_ok());
        assert!(selection.set_crust(Some(crust("cheddar"))).is_err());
        assert_eq!(selection.crust().map(|c| c.id.as_str()), Some("catupiry"));

        assert!(selection.toggle_extra(extra("olives"), Placement::Whole).is_err());
        assert!(selection.set_crust(None).is_ok());
        assert!(selection.crust().is_none());
    }

    #[test]
    fn test_quantity_and_observations() {
        let mut selection = PizzaSelection::new(pizza_type());
        assert!(selection.set_quantity(0).is_err());
        assert!(selection.set_quantity(3).is_ok());
        assert_eq!(selection.quantity(), 3);

        selection.set_observations("sem cebola").unwrap();
        assert_eq!(selection.observations(), "sem cebola");
    }

    #[test]
    fn test_display_name() {
        let mut selection = PizzaSelection::new(pizza_type());
        selection
            .choose_halves(flavor("a", "Calabresa"), flavor("b", "Atum"))
            .unwrap();
        assert_eq!(selection.display_name(), "Large (Calabresa / Atum)");
    }
}
