//! Read-only catalog index: browsing, filtering and product lookup.
//!
//! The index is built once at startup and shared behind an `Arc`; nothing
//! mutates it afterwards, so every query is a plain borrow.

pub mod error;
pub mod loader;
pub mod search;

pub use error::CatalogError;
pub use loader::{fallback_menu, load_from_path, load_from_str, resolve_image, PLACEHOLDER_IMAGE};
pub use search::{highlight, CategoryFilter, MenuFilter, Segment, ALL_CATEGORIES};

use crate::model::{Category, MenuData, ProductWithCategory};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    menu: MenuData,
}

impl CatalogIndex {
    pub fn new(menu: MenuData) -> Self {
        Self { menu }
    }

    /// Loads the catalog at `path`, falling back to the built-in menu when the
    /// document is missing or unparseable. Image paths are resolved either way.
    pub fn load_or_fallback(path: impl AsRef<Path>, placeholder: &str) -> Self {
        let path = path.as_ref();
        let mut menu = match load_from_path(path) {
            Ok(menu) => {
                info!(path = %path.display(), categories = menu.categories.len(), "Catalog loaded");
                menu
            }
            Err(e) => {
                warn!(error = %e, "Catalog unavailable, serving fallback menu");
                fallback_menu(placeholder)
            }
        };
        loader::resolve_images(&mut menu, placeholder);
        Self::new(menu)
    }

    pub fn categories(&self) -> &[Category] {
        &self.menu.categories
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.menu.categories.iter().map(|category| category.name.as_str())
    }

    /// Every product in catalog order, tagged with its category.
    ///
    /// The iterator is `Clone`, so it can be walked more than once.
    pub fn all_products(&self) -> impl Iterator<Item = ProductWithCategory<'_>> + Clone + '_ {
        self.menu.categories.iter().flat_map(|category| {
            category.products.iter().map(move |product| ProductWithCategory {
                product,
                category_name: &category.name,
            })
        })
    }

    pub fn product_count(&self) -> usize {
        self.menu.categories.iter().map(|c| c.products.len()).sum()
    }

    /// Products passing `filter`, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a MenuFilter) -> Vec<ProductWithCategory<'a>> {
        let matches = filter.matcher();
        self.all_products().filter(|product| matches(product)).collect()
    }

    /// Shorthand for [`filter`](Self::filter) with a category label (`"all"`
    /// for every category) and a search term.
    pub fn filter_by(&self, category: &str, search_term: &str) -> Vec<ProductWithCategory<'_>> {
        let filter = MenuFilter::new(category, search_term);
        let matches = filter.matcher();
        self.all_products().filter(|product| matches(product)).collect()
    }

    /// Finds a product by exact name, optionally restricted to one category.
    /// The first match in catalog order wins.
    pub fn find_product(&self, category: Option<&str>, name: &str) -> Option<ProductWithCategory<'_>> {
        self.all_products().find(|item| {
            item.product.name == name && category.map_or(true, |c| c == item.category_name)
        })
    }

    pub fn find_by_name(&self, name: &str) -> Option<ProductWithCategory<'_>> {
        self.find_product(None, name)
    }
}

impl From<MenuData> for CatalogIndex {
    fn from(menu: MenuData) -> Self {
        Self::new(menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;

    fn sample() -> CatalogIndex {
        CatalogIndex::new(MenuData {
            categories: vec![
                Category::new(
                    "Pizza",
                    vec![
                        Product::new("Margherita", "159 Kč").with_description("tomato, sýr"),
                        Product::new("Diavola", "199 Kč").with_description("salám, chilli"),
                    ],
                ),
                Category::new(
                    "Dezerty",
                    vec![Product::new("Tiramisu", "89 Kč").with_description("mascarpone")],
                ),
                Category::new("Nápoje", vec![Product::new("Margherita", "49 Kč")]),
            ],
        })
    }

    fn names(items: &[ProductWithCategory<'_>]) -> Vec<String> {
        items.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_all_products_is_restartable() {
        let index = sample();
        let products = index.all_products();
        assert_eq!(products.clone().count(), 4);
        assert_eq!(products.count(), index.product_count());
        assert_eq!(
            index.category_names().collect::<Vec<_>>(),
            ["Pizza", "Dezerty", "Nápoje"]
        );
    }

    #[test]
    fn test_filter_by_category_and_term() {
        let index = sample();
        assert_eq!(names(&index.filter_by("all", "")), ["Margherita", "Diavola", "Tiramisu", "Margherita"]);
        assert_eq!(names(&index.filter_by("Pizza", "")), ["Margherita", "Diavola"]);
        assert_eq!(names(&index.filter_by("all", "CHILLI")), ["Diavola"]);
        assert_eq!(names(&index.filter_by("Dezerty", "pizza")), Vec::<String>::new());
        // Category name is part of the searchable text.
        assert_eq!(names(&index.filter_by("all", "dezert")), ["Tiramisu"]);
    }

    #[test]
    fn test_filter_with_menu_filter() {
        let index = sample();
        let filter = MenuFilter::new("Nápoje", "marg");
        let found = index.filter(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category_name, "Nápoje");
    }

    #[test]
    fn test_find_product() {
        let index = sample();
        assert_eq!(index.find_by_name("Margherita").unwrap().category_name, "Pizza");
        assert_eq!(
            index.find_product(Some("Nápoje"), "Margherita").unwrap().price,
            "49 Kč"
        );
        assert!(index.find_product(Some("Dezerty"), "Margherita").is_none());
        assert!(index.find_by_name("margherita").is_none());
    }

    #[test]
    fn test_load_or_fallback_on_missing_document() {
        let index = CatalogIndex::load_or_fallback("/no/such/menu.json", PLACEHOLDER_IMAGE);
        assert_eq!(index.category_names().collect::<Vec<_>>(), ["Pizza"]);
        let margherita = index.find_by_name("Margherita").unwrap();
        assert_eq!(margherita.image, PLACEHOLDER_IMAGE);
        assert_eq!(margherita.sizes.len(), 2);
    }
}
