//! # Menu Commands
//!
//! Menu loading, catalog reads and the live price preview of the
//! customization page.

use pizzeria_core::pricing::price_pizza;
use pizzeria_core::{Beverage, PriceBreakdown};
use tracing::debug;

use super::cart::{resolve_pizza, PizzaRequest};
use crate::error::ApiError;
use crate::menu::Menu;

/// Validates the menu payload fetched from the menu API.
///
/// ## Errors
/// - `MENU_ERROR` for a malformed payload, an invalid entry or a duplicate id
pub fn load_menu(payload: &str) -> Result<Menu, ApiError> {
    debug!(bytes = payload.len(), "load_menu command");
    let menu = Menu::from_json(payload)?;
    Ok(menu)
}

/// Gets the whole catalog.
pub fn get_menu(menu: &Menu) -> Menu {
    debug!("get_menu command");
    menu.clone()
}

/// Lists beverages for the drinks page.
///
/// ## Arguments
/// * `category_id` - Only beverages of this category
/// * `query` - Case-insensitive text matched on name and description
pub fn list_beverages(menu: &Menu, category_id: Option<&str>, query: Option<&str>) -> Vec<Beverage> {
    debug!(?category_id, ?query, "list_beverages command");
    menu.search_beverages(category_id, query)
        .into_iter()
        .cloned()
        .collect()
}

/// Prices a pizza while it is being customized.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Customer changes flavor / crust / extra / quantity                    │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  previewPizza({ pizzaTypeId, flavorIds, crustId, extras, quantity })   │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  { base, flavors, extras, crust, unitPrice, quantity, totalPrice }     │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  "Add to cart - R$ 76,00"                                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// With no flavor chosen yet every amount is zero.
pub fn preview_pizza(menu: &Menu, request: &PizzaRequest) -> Result<PriceBreakdown, ApiError> {
    debug!(pizza_type = %request.pizza_type_id, "preview_pizza command");
    let selection = resolve_pizza(menu, request)?;
    Ok(price_pizza(&selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::ExtraRequest;
    use crate::error::ErrorCode;
    use pizzeria_core::Money;

    fn menu() -> Menu {
        Menu::from_json(
            r#"{
            "pizzaTypes": [{ "id": "medium", "name": "Medium", "basePrice": 18 }],
            "flavors": [
                { "id": "marguerita", "name": "Marguerita", "price": 2 },
                { "id": "portuguesa", "name": "Portuguesa", "price": 4 }
            ],
            "extras": [{ "id": "bacon", "name": "Bacon", "price": 3 }],
            "beverages": [
                { "id": "cola", "name": "Cola", "price": 6.5,
                  "category": { "id": "soft", "name": "Soft drinks" } },
                { "id": "ipa", "name": "IPA", "price": 14,
                  "category": { "id": "beer", "name": "Beers" }, "alcoholic": true }
            ]
        }"#,
        )
        .unwrap()
    }

    fn request(flavors: &[&str]) -> PizzaRequest {
        PizzaRequest {
            pizza_type_id: "medium".to_string(),
            flavor_ids: flavors.iter().map(|f| f.to_string()).collect(),
            crust_id: None,
            extras: vec![ExtraRequest {
                extra_id: "bacon".to_string(),
                flavor_id: None,
            }],
            quantity: None,
            observations: None,
        }
    }

    #[test]
    fn test_load_menu_rejections_are_menu_errors() {
        let menu = load_menu(r#"{ "flavors": [{ "id": "a", "name": "A", "price": 1 }] }"#).unwrap();
        assert!(menu.flavor("a").is_some());

        let err = load_menu(r#"{ "flavors": [{ "id": "a", "name": "A", "price": -1 }] }"#)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuError);
        assert!(err.message.contains("'a'"));

        let err = load_menu("{ \"flavors\": 3 }").unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuError);
    }

    #[test]
    fn test_preview_half_and_half() {
        let preview = preview_pizza(&menu(), &request(&["marguerita", "portuguesa"])).unwrap();

        assert_eq!(preview.flavors, Money::from_cents(300));
        assert_eq!(preview.extras, Money::from_cents(300));
        assert_eq!(preview.unit_price, Money::from_cents(2400));
        assert_eq!(preview.total_price, Money::from_cents(2400));
    }

    #[test]
    fn test_preview_without_flavor_is_zero() {
        let preview = preview_pizza(&menu(), &request(&[])).unwrap();

        assert_eq!(preview.unit_price, Money::zero());
        assert_eq!(preview.total_price, Money::zero());
    }

    #[test]
    fn test_list_beverages_filters() {
        let menu = menu();

        assert_eq!(list_beverages(&menu, None, None).len(), 2);

        let beers = list_beverages(&menu, Some("beer"), None);
        assert_eq!(beers.len(), 1);
        assert!(beers[0].alcoholic);

        assert!(list_beverages(&menu, None, Some("wine")).is_empty());
        assert_eq!(get_menu(&menu), menu);
    }
}
