//! Everything the menu page shows, derived from the catalog, the active
//! filter and the session's cart.
//!
//! [`MenuView::build`] is a pure function; it borrows from its inputs and
//! owns only the strings it has to format.

use crate::cart_actor::CartSnapshot;
use crate::catalog::{highlight, CatalogIndex, CategoryFilter, MenuFilter, Segment, ALL_CATEGORIES};
use crate::model::ProductWithCategory;
use crate::pricing::format_price;
use serde::Serialize;

/// Label of the tab that shows every category.
pub const ALL_CATEGORIES_LABEL: &str = "Vše";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTab<'a> {
    /// Value to filter by: `"all"` or the category name.
    pub key: &'a str,
    pub label: &'a str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeChip<'a> {
    pub label: &'a str,
    pub price: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard<'a> {
    pub category: &'a str,
    /// Exact product name, for adding it to the cart.
    pub product_name: &'a str,
    pub name: Vec<Segment<'a>>,
    pub description: Vec<Segment<'a>>,
    pub price: String,
    pub sizes: Vec<SizeChip<'a>>,
    pub image: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView<'a> {
    pub name: &'a str,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuView<'a> {
    pub tabs: Vec<CategoryTab<'a>>,
    pub products: Vec<ProductCard<'a>>,
    pub result_count: usize,
    /// `Nalezeno N výsledků pro "term"`, only while searching.
    pub search_summary: Option<String>,
    pub cart_lines: Vec<CartLineView<'a>>,
    pub cart_item_count: u64,
    pub cart_total: String,
}

/// Catalog prices are shown as written; a missing one reads as zero.
fn display_price(price: &str) -> String {
    if price.is_empty() {
        format_price(0)
    } else {
        price.to_string()
    }
}

fn product_card<'a>(item: ProductWithCategory<'a>, term: &str) -> ProductCard<'a> {
    let product = item.product;
    ProductCard {
        category: item.category_name,
        product_name: &product.name,
        name: highlight(&product.name, term),
        description: highlight(&product.description, term),
        price: display_price(&product.price),
        sizes: product
            .sizes
            .iter()
            .map(|option| SizeChip {
                label: &option.label,
                price: &option.price,
            })
            .collect(),
        image: &product.image,
    }
}

impl<'a> MenuView<'a> {
    pub fn build(catalog: &'a CatalogIndex, filter: &'a MenuFilter, cart: &'a CartSnapshot) -> Self {
        let tabs = std::iter::once(CategoryTab {
            key: ALL_CATEGORIES,
            label: ALL_CATEGORIES_LABEL,
            active: filter.category == CategoryFilter::All,
        })
        .chain(catalog.category_names().map(|name| CategoryTab {
            key: name,
            label: name,
            active: matches!(&filter.category, CategoryFilter::Named(selected) if selected == name),
        }))
        .collect();

        let products: Vec<_> = catalog
            .filter(filter)
            .into_iter()
            .map(|item| product_card(item, &filter.search_term))
            .collect();
        let result_count = products.len();
        let search_summary = filter
            .is_searching()
            .then(|| format!("Nalezeno {} výsledků pro \"{}\"", result_count, filter.search_term));

        let cart_lines = cart
            .lines
            .iter()
            .map(|line| CartLineView {
                name: &line.name,
                quantity: line.quantity,
                unit_price: format_price(line.unit_price),
                line_total: format_price(line.line_total()),
            })
            .collect();

        Self {
            tabs,
            products,
            result_count,
            search_summary,
            cart_lines,
            cart_item_count: cart.item_count,
            cart_total: format_price(cart.total),
        }
    }

    pub fn is_empty_result(&self) -> bool {
        self.result_count == 0
    }
}
