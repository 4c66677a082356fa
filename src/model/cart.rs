//! Cart lines and the pricing engine that merges selections into them.

use crate::cart_actor::CartError;
use crate::model::{OrderDetails, OrderSubmission, Product};
use crate::pricing::extract_price;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;
use tracing::warn;
use uuid::Uuid;

/// Type-safe identifier for carts (one per session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

/// What the customer picked in the product dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub size: Option<String>,
    pub ingredients: Vec<String>,
    pub quantity: u32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            size: None,
            ingredients: Vec::new(),
            quantity: 1,
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn ingredient(mut self, name: impl Into<String>) -> Self {
        self.ingredients.push(name.into());
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// A fixed-price item offered as a one-click order button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickItem {
    pub name: String,
    pub unit_price: u64,
}

impl QuickItem {
    pub fn new(name: impl Into<String>, unit_price: u64) -> Self {
        Self {
            name: name.into(),
            unit_price,
        }
    }

    /// The house specials shown above the menu.
    pub fn house_specials() -> Vec<QuickItem> {
        vec![
            QuickItem::new("Margherita della Nonna", 280),
            QuickItem::new("Don Capone Supreme", 420),
            QuickItem::new("Pepperoni Brotherhood", 300),
        ]
    }
}

/// One distinct product/size/ingredient combination and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    /// Display name, e.g. `Margherita (Ø 30 cm) + Olivy, Šunka`.
    pub name: String,
    pub product_name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub size: Option<String>,
    /// Sorted and without duplicates.
    pub ingredients: Vec<String>,
}

impl CartLine {
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }

    fn same_item(&self, product_name: &str, size: Option<&str>, ingredients: &[String]) -> bool {
        self.product_name == product_name
            && self.size.as_deref() == size
            && self.ingredients == ingredients
    }
}

/// Builds `Name (size) + a, b`.
fn display_name(product_name: &str, size: Option<&str>, ingredients: &[String]) -> String {
    let mut name = product_name.to_string();
    if let Some(size) = size {
        name.push_str(&format!(" ({})", size));
    }
    if !ingredients.is_empty() {
        name.push_str(" + ");
        name.push_str(&ingredients.join(", "));
    }
    name
}

/// A shopping cart: the priced lines of one ordering session.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// so every open cart lives inside the cart [`ResourceActor`](crate::framework::ResourceActor)
/// and is only changed through [`CartAction`](crate::cart_actor::CartAction)s.
///
/// The methods below are the pricing engine itself; they are plain synchronous
/// code so they can be used and tested without the actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cart {
    pub id: CartId,
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            lines: Vec::new(),
        }
    }

    /// Prices the selection and merges it into the cart.
    ///
    /// A size the product does not offer falls back to the default price and
    /// unknown ingredients are dropped; malformed catalog data degrades instead
    /// of failing.
    pub fn add_to_order(&mut self, product: &Product, selection: Selection) -> Result<CartLine, CartError> {
        if selection.quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }

        let size = selection.size.filter(|label| !label.is_empty());
        let size = match size {
            Some(label) if product.sizes.get(&label).is_none() => {
                warn!(product = %product.name, size = %label, "Size not offered, using default price");
                None
            }
            other => other,
        };

        let requested: BTreeSet<String> = selection.ingredients.into_iter().collect();
        let mut ingredients = Vec::with_capacity(requested.len());
        let mut extras = 0u64;
        for name in requested {
            match product.ingredient(&name) {
                Some(ingredient) => {
                    extras = extras.saturating_add(extract_price(&ingredient.price));
                    ingredients.push(name);
                }
                None => warn!(product = %product.name, ingredient = %name, "Unknown ingredient ignored"),
            }
        }

        let unit_price = product.base_price(size.as_deref()).saturating_add(extras);
        Ok(self.merge(
            &product.name,
            size,
            ingredients,
            unit_price,
            selection.quantity,
        ))
    }

    /// Adds an item with a fixed price (the quick-order buttons).
    ///
    /// Lines are keyed by name, size and ingredients, so a quick item named
    /// like a plain catalog product joins that product's line and is charged
    /// the line's existing unit price.
    pub fn add_priced(&mut self, name: &str, unit_price: u64, quantity: u32) -> Result<CartLine, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        Ok(self.merge(name, None, Vec::new(), unit_price, quantity))
    }

    fn merge(
        &mut self,
        product_name: &str,
        size: Option<String>,
        ingredients: Vec<String>,
        unit_price: u64,
        quantity: u32,
    ) -> CartLine {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.same_item(product_name, size.as_deref(), &ingredients))
        {
            if line.unit_price != unit_price {
                warn!(
                    line = %line.name,
                    kept = line.unit_price,
                    ignored = unit_price,
                    "Merged item priced differently, keeping line price"
                );
            }
            line.quantity = line.quantity.saturating_add(quantity);
            return line.clone();
        }

        let line = CartLine {
            name: display_name(product_name, size.as_deref(), &ingredients),
            product_name: product_name.to_string(),
            unit_price,
            quantity,
            size,
            ingredients,
        };
        self.lines.push(line.clone());
        line
    }

    /// Adds one unit to the line with this display name.
    ///
    /// Returns the new quantity, or `None` if no such line exists.
    pub fn increment_line(&mut self, name: &str) -> Option<u32> {
        let line = self.lines.iter_mut().find(|line| line.name == name)?;
        line.quantity = line.quantity.saturating_add(1);
        Some(line.quantity)
    }

    /// Removes one unit from the line with this display name; the last unit
    /// removes the line.
    ///
    /// Returns the new quantity (0 when the line was removed), or `None` if no
    /// such line exists.
    pub fn decrement_line(&mut self, name: &str) -> Option<u32> {
        let index = self.lines.iter().position(|line| line.name == name)?;
        let line = &mut self.lines[index];
        if line.quantity > 1 {
            line.quantity -= 1;
            Some(line.quantity)
        } else {
            self.lines.remove(index);
            Some(0)
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `unit_price × quantity` over the current lines.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |total, line| total.saturating_add(line.line_total()))
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Validates the cart and the form, and snapshots the order.
    ///
    /// The cart is left untouched; it is cleared once the submission has gone
    /// through.
    pub fn checkout(&self, details: OrderDetails) -> Result<OrderSubmission, CartError> {
        if self.is_empty() {
            return Err(CartError::EmptyCart);
        }
        details.validate()?;

        Ok(OrderSubmission {
            reference: Uuid::new_v4(),
            cart_id: self.id,
            customer: details.customer,
            delivery: details.delivery,
            items: self.lines.clone(),
            total: self.total(),
            notes: details.notes.filter(|notes| !notes.trim().is_empty()),
            submitted_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerInfo, DeliveryInfo, DeliveryTime};

    fn margherita() -> Product {
        Product::new("Margherita", "159 Kč")
            .with_sizes([("Ø30cm", "159 Kč"), ("Ø45cm", "259 Kč")])
            .with_ingredient("Šunka", "20 Kč")
            .with_ingredient("Olivy", "15 Kč")
            .with_ingredient("Bazalka", "zdarma")
    }

    fn details() -> OrderDetails {
        OrderDetails::new(
            CustomerInfo::new("Vito", "777 123 456", "vito@example.com"),
            DeliveryInfo::pickup(DeliveryTime::Asap),
        )
    }

    #[test]
    fn test_quick_item_named_like_product_keeps_line_price() {
        let mut cart = Cart::new(CartId(1));
        cart.add_to_order(&Product::new("Margherita", "159 Kč"), Selection::new())
            .unwrap();
        let line = cart.add_priced("Margherita", 280, 1).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, 159);
        assert_eq!(cart.total(), 318);
    }

    #[test]
    fn test_size_and_ingredients_are_priced() {
        let mut cart = Cart::new(CartId(1));
        let line = cart
            .add_to_order(
                &margherita(),
                Selection::new().size("Ø30cm").ingredient("Šunka").ingredient("Olivy"),
            )
            .unwrap();

        assert_eq!(line.unit_price, 194);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.name, "Margherita (Ø30cm) + Olivy, Šunka");
        assert_eq!(cart.total(), 194);
    }

    #[test]
    fn test_same_combination_merges_regardless_of_ingredient_order() {
        let mut cart = Cart::new(CartId(1));
        let product = margherita();
        cart.add_to_order(&product, Selection::new().size("Ø45cm").ingredient("Olivy").ingredient("Šunka"))
            .unwrap();
        let line = cart
            .add_to_order(&product, Selection::new().size("Ø45cm").ingredient("Šunka").ingredient("Olivy"))
            .unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(line.quantity, 2);
        assert_eq!(cart.total(), 2 * 294);
    }

    #[test]
    fn test_different_size_or_ingredients_are_separate_lines() {
        let mut cart = Cart::new(CartId(1));
        let product = margherita();
        cart.add_to_order(&product, Selection::new().size("Ø30cm")).unwrap();
        cart.add_to_order(&product, Selection::new().size("Ø45cm")).unwrap();
        cart.add_to_order(&product, Selection::new().size("Ø30cm").ingredient("Olivy"))
            .unwrap();

        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.total(), 159 + 259 + 174);
    }

    #[test]
    fn test_no_size_uses_default_price() {
        let mut cart = Cart::new(CartId(1));
        let line = cart.add_to_order(&margherita(), Selection::new()).unwrap();
        assert_eq!(line.unit_price, 159);
        assert_eq!(line.name, "Margherita");
        assert_eq!(line.size, None);
    }

    #[test]
    fn test_unknown_size_and_ingredient_degrade() {
        let mut cart = Cart::new(CartId(1));
        let line = cart
            .add_to_order(
                &margherita(),
                Selection::new().size("Ø60cm").ingredient("Ananas").ingredient("Bazalka"),
            )
            .unwrap();
        assert_eq!(line.unit_price, 159);
        assert_eq!(line.size, None);
        assert_eq!(line.ingredients, vec!["Bazalka".to_string()]);
    }

    #[test]
    fn test_quantity_is_added_and_zero_rejected() {
        let mut cart = Cart::new(CartId(1));
        let product = margherita();
        cart.add_to_order(&product, Selection::new().quantity(3)).unwrap();
        assert_eq!(
            cart.add_to_order(&product, Selection::new().quantity(0)),
            Err(CartError::InvalidQuantity(0))
        );
        assert_eq!(cart.total(), 3 * 159);
    }

    #[test]
    fn test_decrement_from_one_removes_line() {
        let mut cart = Cart::new(CartId(1));
        cart.add_priced("Don Capone Supreme", 420, 1).unwrap();
        cart.add_priced("Pepperoni Brotherhood", 300, 2).unwrap();

        assert_eq!(cart.decrement_line("Don Capone Supreme"), Some(0));
        assert!(cart.line("Don Capone Supreme").is_none());
        assert_eq!(cart.total(), 600);

        assert_eq!(cart.decrement_line("Pepperoni Brotherhood"), Some(1));
        assert_eq!(cart.total(), 300);
    }

    #[test]
    fn test_increment_and_missing_lines() {
        let mut cart = Cart::new(CartId(1));
        cart.add_priced("Margherita della Nonna", 280, 1).unwrap();

        assert_eq!(cart.increment_line("Margherita della Nonna"), Some(2));
        assert_eq!(cart.increment_line("Calzone"), None);
        assert_eq!(cart.decrement_line("Calzone"), None);
        assert_eq!(cart.total(), 560);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_quick_items_merge_by_name() {
        let mut cart = Cart::new(CartId(1));
        cart.add_priced("Margherita della Nonna", 280, 1).unwrap();
        let line = cart.add_priced("Margherita della Nonna", 280, 1).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_checkout_rejects_empty_cart() {
        let cart = Cart::new(CartId(1));
        assert_eq!(cart.checkout(details()).unwrap_err(), CartError::EmptyCart);
    }

    #[test]
    fn test_checkout_snapshots_without_clearing() {
        let mut cart = Cart::new(CartId(4));
        cart.add_to_order(&margherita(), Selection::new().size("Ø45cm")).unwrap();

        let submission = cart.checkout(details().with_notes("  ")).unwrap();
        assert_eq!(submission.cart_id, CartId(4));
        assert_eq!(submission.total, 259);
        assert_eq!(submission.items.len(), 1);
        assert_eq!(submission.notes, None);
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_clear_resets_total() {
        let mut cart = Cart::new(CartId(1));
        cart.add_to_order(&margherita(), Selection::new()).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }
}
