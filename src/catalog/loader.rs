//! Reading the catalog document and preparing it for display.

use super::CatalogError;
use crate::model::{Category, MenuData, Product};
use std::path::Path;
use tracing::debug;

/// Image shown for anything that is not a bundled asset.
pub const PLACEHOLDER_IMAGE: &str = "pizza-cappone-placeholder-500x500.jpg";

/// Images under this prefix ship with the site; everything else is replaced.
pub const LOCAL_IMAGE_PREFIX: &str = "./images/";

/// Returns `path` if it points at a bundled image, otherwise the placeholder.
pub fn resolve_image(path: &str, placeholder: &str) -> String {
    if path.starts_with(LOCAL_IMAGE_PREFIX) {
        path.to_string()
    } else {
        placeholder.to_string()
    }
}

/// Replaces every category and product image that is not a bundled asset.
pub fn resolve_images(menu: &mut MenuData, placeholder: &str) {
    for category in &mut menu.categories {
        category.image = resolve_image(&category.image, placeholder);
        for product in &mut category.products {
            product.image = resolve_image(&product.image, placeholder);
        }
    }
}

pub fn load_from_str(json: &str) -> Result<MenuData, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<MenuData, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let menu = load_from_str(&json)?;
    debug!(path = %path.display(), categories = menu.categories.len(), "Catalog read");
    Ok(menu)
}

/// The one-pizza menu served when the catalog document is unusable.
pub fn fallback_menu(placeholder: &str) -> MenuData {
    let mut margherita = Product::new("Margherita", "159 Kč")
        .with_description("tomati, sýr")
        .with_sizes([("Ø 30 cm", "159 Kč"), ("Ø 45 cm", "259 Kč")]);
    margherita.image = placeholder.to_string();

    MenuData {
        categories: vec![Category::new("Pizza", vec![margherita])],
    }
}
