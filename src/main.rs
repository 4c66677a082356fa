//! # Capone Menu demo
//!
//! Runs one ordering session end to end:
//! 1. Starts the [`MenuSystem`] from `shop.json` (or defaults).
//! 2. Searches the menu and prints the resulting view.
//! 3. Fills a cart from the catalog and the quick-order buttons.
//! 4. Submits the order and signs up for the newsletter.

use capone_menu::cart_actor::CartSnapshot;
use capone_menu::catalog::MenuFilter;
use capone_menu::lifecycle::{setup_tracing, MenuSystem, ShopConfig};
use capone_menu::model::{CustomerInfo, DeliveryInfo, DeliveryTime, OrderDetails, Selection};
use capone_menu::view::MenuView;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "shop.json".to_string());
    let config = ShopConfig::load_or_default(&config_path);
    let system = MenuSystem::new(config);

    // Browse
    let filter = MenuFilter::new("all", "margherita");
    let empty_cart = CartSnapshot::default();
    let view = MenuView::build(&system.catalog, &filter, &empty_cart);
    if let Some(summary) = &view.search_summary {
        info!("{}", summary);
    }
    println!("{}", serde_json::to_string_pretty(&view)?);

    // Order
    let cart = system.cart_client.open_session().await?;
    let span = tracing::info_span!("ordering", %cart);
    let snapshot = async {
        if let Some(first) = system.catalog.filter(&filter).first() {
            let mut selection = Selection::new();
            if let Some(size) = first.default_size() {
                selection = selection.size(size);
            }
            system
                .cart_client
                .add_to_order(cart, Some(first.category_name), &first.name, selection)
                .await?;
        }
        for item in &system.config.quick_items {
            system.cart_client.add_quick_item(cart, item).await?;
        }
        if let Some(special) = system.config.quick_items.first() {
            system.cart_client.increment_line(cart, &special.name).await?;
        }
        system.cart_client.snapshot(cart).await
    }
    .instrument(span)
    .await?;

    let browse_all = MenuFilter::default();
    let view = MenuView::build(&system.catalog, &browse_all, &snapshot);
    for line in &view.cart_lines {
        info!(quantity = line.quantity, total = %line.line_total, "{}", line.name);
    }
    info!(total = %view.cart_total, "Cart ready");

    // Submit
    let details = OrderDetails::new(
        CustomerInfo::new("Vito Corleone", "+420 777 123 456", "vito@capone.cz"),
        DeliveryInfo::delivery("Václavské náměstí 1, Praha", DeliveryTime::In1Hour),
    )
    .with_notes("Zvonek nefunguje, volejte.");

    match system.cart_client.submit_order(cart, details).await {
        Ok(confirmation) => info!(reference = %confirmation.reference, "{}", confirmation.message),
        Err(e) => error!(error = %e, "Order failed"),
    }

    match system.newsletter.subscribe("vito@capone.cz").await {
        Ok(message) => info!("{}", message),
        Err(e) => error!(error = %e, "Newsletter signup failed"),
    }

    system.cart_client.close_session(cart).await?;
    system.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
