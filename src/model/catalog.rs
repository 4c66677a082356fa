//! Catalog document types, deserialized from the menu JSON.
//!
//! ```json
//! { "categories": [ { "name": "Pizza", "image": "...", "url": "...",
//!     "products": [ { "name": "Margherita", "description": "...", "image": "...",
//!                     "url": "...", "price": "159 Kč",
//!                     "sizes": { "Ø 30 cm": "159 Kč", "Ø 45 cm": "259 Kč" },
//!                     "ingredients": [ { "name": "Šunka", "price": "20 Kč" } ] } ] } ] }
//! ```
//!
//! Prices stay in their display form here; [`crate::pricing::extract_price`]
//! turns them into amounts when they enter a calculation.

use crate::pricing::extract_price;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Reads `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Root of the catalog document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Default price, used when no size is selected.
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: String,
    #[serde(default)]
    pub sizes: Sizes,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
}

/// An optional add-on with its own price.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: String,
}

/// A size label and its price string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeOption {
    pub label: String,
    pub price: String,
}

/// Size options in document order.
///
/// The catalog encodes sizes as a JSON object; the first entry is the size a
/// product dialog preselects, so the order of keys is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sizes(Vec<SizeOption>);

impl Sizes {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|option| option.label == label)
            .map(|option| option.price.as_str())
    }

    pub fn first(&self) -> Option<&SizeOption> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SizeOption> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L: Into<String>, P: Into<String>> FromIterator<(L, P)> for Sizes {
    fn from_iter<I: IntoIterator<Item = (L, P)>>(iter: I) -> Self {
        Sizes(
            iter.into_iter()
                .map(|(label, price)| SizeOption {
                    label: label.into(),
                    price: price.into(),
                })
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for Sizes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SizesVisitor;

        impl<'de> Visitor<'de> for SizesVisitor {
            type Value = Sizes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of size label to price, or null")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Sizes, E> {
                Ok(Sizes::default())
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Sizes, E> {
                Ok(Sizes::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Sizes, A::Error> {
                let mut options = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, price)) = map.next_entry::<String, String>()? {
                    options.push(SizeOption { label, price });
                }
                Ok(Sizes(options))
            }
        }

        deserializer.deserialize_any(SizesVisitor)
    }
}

impl Product {
    /// Creates a product with a name and default price and nothing else.
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            image: String::new(),
            url: None,
            price: price.into(),
            sizes: Sizes::default(),
            ingredients: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_sizes<L: Into<String>, P: Into<String>>(
        mut self,
        sizes: impl IntoIterator<Item = (L, P)>,
    ) -> Self {
        self.sizes = sizes.into_iter().collect();
        self
    }

    pub fn with_ingredient(mut self, name: impl Into<String>, price: impl Into<String>) -> Self {
        self.ingredients.push(Ingredient {
            name: name.into(),
            price: price.into(),
        });
        self
    }

    /// The size a product dialog starts with: the first listed, if any.
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(|option| option.label.as_str())
    }

    /// Base amount for the given size, or the default price when the size is
    /// absent or not offered by this product.
    pub fn base_price(&self, size: Option<&str>) -> u64 {
        let price = size
            .and_then(|label| self.sizes.get(label))
            .unwrap_or(self.price.as_str());
        extract_price(price)
    }

    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|ingredient| ingredient.name == name)
    }
}

impl Category {
    pub fn new(name: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            name: name.into(),
            image: String::new(),
            url: None,
            products,
        }
    }
}

/// A product together with the name of the category it was listed under.
///
/// Produced while iterating the catalog; never stored.
#[derive(Debug, Clone, Copy)]
pub struct ProductWithCategory<'a> {
    pub product: &'a Product,
    pub category_name: &'a str,
}

impl<'a> ProductWithCategory<'a> {
    /// Text the search term is matched against.
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {}",
            self.product.name, self.product.description, self.category_name
        )
    }
}

impl std::ops::Deref for ProductWithCategory<'_> {
    type Target = Product;

    fn deref(&self) -> &Product {
        self.product
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_keeps_size_order() {
        let json = r#"{
            "name": "Quattro Formaggi",
            "price": "189 Kč",
            "sizes": { "Ø 45 cm": "289 Kč", "Ø 30 cm": "189 Kč" }
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        let labels: Vec<_> = product.sizes.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Ø 45 cm", "Ø 30 cm"]);
        assert_eq!(product.default_size(), Some("Ø 45 cm"));
        assert!(product.ingredients.is_empty());
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_deserialize_null_sizes_and_unknown_fields() {
        let json = r#"{ "name": "Tiramisu", "price": "89 Kč", "sizes": null,
                        "sauces": [], "attributes": "vegetarian" }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.sizes.is_empty());
        assert_eq!(product.default_size(), None);
    }

    #[test]
    fn test_deserialize_null_fields_as_empty() {
        let json = r#"{ "name": "Hawaii", "description": null, "image": null, "price": null,
                        "ingredients": null }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.description, "");
        assert_eq!(product.price, "");
        assert_eq!(product.base_price(None), 0);
        assert!(product.ingredients.is_empty());

        let category: Category =
            serde_json::from_str(r#"{ "name": "Pizza", "image": null, "products": null }"#).unwrap();
        assert!(category.products.is_empty());
    }

    #[test]
    fn test_base_price_uses_size_or_falls_back() {
        let product = Product::new("Margherita", "159 Kč")
            .with_sizes([("Ø 30 cm", "159 Kč"), ("Ø 45 cm", "259 Kč")]);
        assert_eq!(product.base_price(None), 159);
        assert_eq!(product.base_price(Some("Ø 45 cm")), 259);
        assert_eq!(product.base_price(Some("Ø 60 cm")), 159);
    }

    #[test]
    fn test_searchable_text_joins_fields() {
        let product = Product::new("Diavola", "199 Kč").with_description("salám, chilli");
        let view = ProductWithCategory {
            product: &product,
            category_name: "Pizza",
        };
        assert_eq!(view.searchable_text(), "Diavola salám, chilli Pizza");
        assert_eq!(view.name, "Diavola");
    }
}
