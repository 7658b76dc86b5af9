use store_framework::tracing::setup_tracing;
use storefront::actions::AppAction;
use storefront::catalog::{CatalogQuery, SortKey};
use storefront::config::StorefrontConfig;
use storefront::lifecycle::StorefrontSystem;
use storefront::model::Category;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StorefrontConfig::from_env().map_err(|e| e.to_string())?;
    let mut system = StorefrontSystem::start(config);

    system
        .wait_for_startup()
        .instrument(tracing::info_span!("startup"))
        .await
        .map_err(|e| e.to_string())?;

    let state = system.state().await.map_err(|e| e.to_string())?;
    if let Some(user) = &state.user {
        info!(user = %user.name, "Signed in");
    }

    let query = CatalogQuery::new()
        .category(Category::Phones)
        .sort_by(SortKey::Price);
    let phones = system.selectors.visible_products(&state, &query);
    info!(
        phones = ?phones.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        "Phones by price"
    );

    // Fill the cart
    let span = tracing::info_span!("shopping");
    async {
        for product in phones.iter().chain(state.products.iter().take(1)) {
            let action = AppAction::add_to_cart(product).map_err(|e| e.to_string())?;
            system
                .store
                .dispatch(action)
                .await
                .map_err(|e| e.to_string())?;
        }
        if let Some(cheapest) = phones.first() {
            system
                .store
                .dispatch(AppAction::change_quantity(cheapest.id, 3))
                .await
                .map_err(|e| e.to_string())?;
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let state = system.state().await.map_err(|e| e.to_string())?;
    info!(
        items = system.selectors.cart_item_count(&state),
        total = system.selectors.cart_total_price(&state),
        "Cart filled"
    );

    let checkout = system.checkout().await.map_err(|e| e.to_string())?;
    checkout.join().await.map_err(|e| e.to_string())?;

    let state = system.state().await.map_err(|e| e.to_string())?;
    match &state.error {
        Some(error) => info!(%error, "Checkout did not go through"),
        None => info!(
            items = system.selectors.cart_item_count(&state),
            "Checkout settled"
        ),
    }
    info!(stats = ?system.selectors.stats(), "Selector cache");

    system.shutdown().await.map_err(|e| e.to_string())?;
    Ok(())
}
