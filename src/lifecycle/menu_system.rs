use crate::catalog::CatalogIndex;
use crate::clients::CartClient;
use crate::lifecycle::ShopConfig;
use crate::newsletter::Newsletter;
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator: loads the catalog, starts the cart actor and
/// hands out the clients the ordering front end talks to.
///
/// # Example
///
/// ```ignore
/// let system = MenuSystem::new(ShopConfig::load_or_default("shop.json"));
///
/// let cart = system.cart_client.open_session().await?;
/// system.cart_client.add_to_order(cart, None, "Margherita", Selection::new()).await?;
///
/// system.shutdown().await?;
/// ```
pub struct MenuSystem {
    /// Immutable catalog, shared with the cart actor.
    pub catalog: Arc<CatalogIndex>,

    /// Client for the cart actor (one cart per session)
    pub cart_client: CartClient,

    pub newsletter: Newsletter,

    pub config: ShopConfig,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MenuSystem {
    /// Loads the catalog named by `config` (or the fallback menu) and starts
    /// the cart actor. Must be called inside a Tokio runtime.
    pub fn new(config: ShopConfig) -> Self {
        let catalog = Arc::new(CatalogIndex::load_or_fallback(
            &config.catalog_path,
            &config.placeholder_image,
        ));
        Self::with_catalog(config, catalog)
    }

    /// Starts the system around an already built catalog.
    pub fn with_catalog(config: ShopConfig, catalog: Arc<CatalogIndex>) -> Self {
        let (cart_actor, cart_resource) = crate::cart_actor::new(config.channel_buffer);

        // The cart actor prices items against the shared catalog (Context = Arc<CatalogIndex>)
        let cart_handle = tokio::spawn(cart_actor.run(catalog.clone()));

        let cart_client = CartClient::new(cart_resource, config.submit_delay());
        let newsletter = Newsletter::new(config.newsletter_delay());
        info!(
            categories = catalog.categories().len(),
            products = catalog.product_count(),
            "Menu system started"
        );

        Self {
            catalog,
            cart_client,
            newsletter,
            config,
            handles: vec![cart_handle],
        }
    }

    /// Drops the clients so the actor's channel closes, then waits for the
    /// actor task to finish.
    ///
    /// Clones of `cart_client` still held elsewhere keep the actor alive;
    /// drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down menu system...");

        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Menu system shutdown complete.");
        Ok(())
    }
}
