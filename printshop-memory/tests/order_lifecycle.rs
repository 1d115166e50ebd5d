//! End-to-end order lifecycle tests: cart merge, cart-to-order conversion,
//! price snapshotting, and the status audit trail.

use printshop::cart_store::CartStore;
use printshop::catalog::ProductCatalog;
use printshop::errors::StoreError;
use printshop::order::OrderStatus;
use printshop::orders::{OrderService, WELCOME_MESSAGE};
use printshop::product::{NewProduct, Product, ProductPatch};
use printshop::types::{CustomerEmail, Money, ProductName, SessionId};
use printshop_memory::InMemoryRepository;

struct Store {
    catalog: ProductCatalog<InMemoryRepository>,
    carts: CartStore<InMemoryRepository>,
    orders: OrderService<InMemoryRepository>,
}

fn store() -> Store {
    let repo = InMemoryRepository::new();
    Store {
        catalog: ProductCatalog::new(repo.clone()),
        carts: CartStore::new(repo.clone()),
        orders: OrderService::new(repo),
    }
}

fn session(token: &str) -> SessionId {
    SessionId::try_new(token).unwrap()
}

fn email(addr: &str) -> CustomerEmail {
    CustomerEmail::try_new(addr).unwrap()
}

async fn add_product(store: &Store, name: &str, cents: u64) -> Product {
    store
        .catalog
        .create(NewProduct {
            name: ProductName::try_new(name).unwrap(),
            description: format!("{name} description"),
            price: Money::from_cents(cents).unwrap(),
            image_url: format!("/images/{name}.png"),
            category: "Test".to_string(),
            in_stock: 10,
            print_time: "2 hours".to_string(),
            created_by: "Emma (12)".to_string(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn adding_same_product_twice_merges_into_one_line() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let sess = session("sess-merge");

    store.carts.add(&sess, product.id, 2).await.unwrap();
    store.carts.add(&sess, product.id, 3).await.unwrap();

    let entries = store.carts.get(&sess).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].line.quantity.value(), 5);
    assert_eq!(entries[0].product.as_ref().unwrap().id, product.id);
}

#[tokio::test]
async fn add_rejects_zero_quantity() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let sess = session("sess-zero");

    let result = store.carts.add(&sess, product.id, 0).await;
    assert!(matches!(result, Err(StoreError::InvalidInput(_))));
    assert!(store.carts.get(&sess).await.unwrap().is_empty());
}

#[tokio::test]
async fn add_rejects_merging_past_the_quantity_cap() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let sess = session("sess-cap");

    store.carts.add(&sess, product.id, 999).await.unwrap();
    let result = store.carts.add(&sess, product.id, 2).await;
    assert!(matches!(result, Err(StoreError::InvalidInput(_))));

    let entries = store.carts.get(&sess).await.unwrap();
    assert_eq!(entries[0].line.quantity.value(), 999);
}

#[tokio::test]
async fn setting_quantity_to_zero_removes_the_line() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let sess = session("sess-setqty");

    let line = store.carts.add(&sess, product.id, 2).await.unwrap();
    store.carts.set_quantity(&sess, line.id, 0).await.unwrap();
    assert!(store.carts.get(&sess).await.unwrap().is_empty());
}

#[tokio::test]
async fn set_quantity_replaces_positive_values() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let sess = session("sess-replace");

    let line = store.carts.add(&sess, product.id, 2).await.unwrap();
    store.carts.set_quantity(&sess, line.id, 7).await.unwrap();

    let entries = store.carts.get(&sess).await.unwrap();
    assert_eq!(entries[0].line.quantity.value(), 7);
}

#[tokio::test]
async fn set_quantity_checks_session_ownership() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let alice = session("sess-alice");
    let bob = session("sess-bob");

    let line = store.carts.add(&alice, product.id, 1).await.unwrap();
    let result = store.carts.set_quantity(&bob, line.id, 5).await;
    assert!(matches!(result, Err(StoreError::CartLineNotFound(_))));
}

#[tokio::test]
async fn deleted_product_resolves_to_placeholder_not_dropped() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let sess = session("sess-ghost");

    store.carts.add(&sess, product.id, 1).await.unwrap();
    store.catalog.delete(product.id).await.unwrap();

    let entries = store.carts.get(&sess).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].product.is_none());
}

#[tokio::test]
async fn create_order_on_empty_cart_fails_without_mutation() {
    let store = store();
    let sess = session("sess-empty");

    let result = store
        .orders
        .create_order(&sess, "Mia".to_string(), email("mia@x.com"), "1 Main St".to_string())
        .await;
    assert!(matches!(result, Err(StoreError::EmptyCart)));
    assert!(store.orders.list_all_for_admin().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_order_snapshots_prices_and_drains_cart() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let sess = session("abc");

    store.carts.add(&sess, product.id, 2).await.unwrap();
    let order = store
        .orders
        .create_order(&sess, "Mia".to_string(), email("mia@x.com"), "1 Main St".to_string())
        .await
        .unwrap();

    assert_eq!(order.total.to_cents(), 1700);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].product_id, product.id);
    assert_eq!(order.items[0].price.to_cents(), 850);
    assert_eq!(order.items[0].quantity.value(), 2);
    assert_eq!(order.created_at, order.updated_at);

    // Cart fully drained.
    assert!(store.carts.get(&sess).await.unwrap().is_empty());

    // One creation history entry with the canned welcome message.
    let tracked = store
        .orders
        .get_by_tracking_code(&order.tracking_code)
        .await
        .unwrap();
    assert_eq!(tracked.status_history.len(), 1);
    assert_eq!(tracked.status_history[0].status, OrderStatus::Pending);
    assert_eq!(tracked.status_history[0].message, WELCOME_MESSAGE);
}

#[tokio::test]
async fn later_price_edits_do_not_change_stored_totals() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let sess = session("sess-frozen");

    store.carts.add(&sess, product.id, 2).await.unwrap();
    let order = store
        .orders
        .create_order(&sess, "Mia".to_string(), email("mia@x.com"), "1 Main St".to_string())
        .await
        .unwrap();

    store
        .catalog
        .update(
            product.id,
            ProductPatch::empty().with_price(Money::from_cents(9999).unwrap()),
        )
        .await
        .unwrap();

    let reread = store.orders.get_by_id(order.id).await.unwrap();
    assert_eq!(reread.total.to_cents(), 1700);
    assert_eq!(reread.items[0].price.to_cents(), 850);
}

#[tokio::test]
async fn lines_for_deleted_products_are_silently_excluded() {
    let store = store();
    let dragon = add_product(&store, "Dragon", 850).await;
    let rocket = add_product(&store, "Rocket", 1200).await;
    let sess = session("sess-drop");

    store.carts.add(&sess, dragon.id, 1).await.unwrap();
    store.carts.add(&sess, rocket.id, 1).await.unwrap();
    store.catalog.delete(rocket.id).await.unwrap();

    let order = store
        .orders
        .create_order(&sess, "Mia".to_string(), email("mia@x.com"), "1 Main St".to_string())
        .await
        .unwrap();

    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].product_id, dragon.id);
    assert_eq!(order.total.to_cents(), 850);
}

#[tokio::test]
async fn order_with_only_deleted_products_fails_as_empty() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let sess = session("sess-alldrop");

    store.carts.add(&sess, product.id, 1).await.unwrap();
    store.catalog.delete(product.id).await.unwrap();

    let result = store
        .orders
        .create_order(&sess, "Mia".to_string(), email("mia@x.com"), "1 Main St".to_string())
        .await;
    assert!(matches!(result, Err(StoreError::EmptyCart)));
}

#[tokio::test]
async fn update_status_appends_exactly_one_entry_in_order() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let sess = session("sess-history");
    store.carts.add(&sess, product.id, 1).await.unwrap();
    let order = store
        .orders
        .create_order(&sess, "Mia".to_string(), email("mia@x.com"), "1 Main St".to_string())
        .await
        .unwrap();

    store
        .orders
        .update_status(order.id, OrderStatus::Printing, None)
        .await
        .unwrap();
    let updated = store
        .orders
        .update_status(
            order.id,
            OrderStatus::Delivered,
            Some("Dropped at your door".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Delivered);

    let tracked = store
        .orders
        .get_by_tracking_code(&order.tracking_code)
        .await
        .unwrap();
    // Newest first; prior entries untouched, in original relative order.
    assert_eq!(tracked.status_history.len(), 3);
    assert_eq!(tracked.status_history[0].status, OrderStatus::Delivered);
    assert_eq!(tracked.status_history[0].message, "Dropped at your door");
    assert_eq!(tracked.status_history[1].status, OrderStatus::Printing);
    assert_eq!(tracked.status_history[1].message, "Status updated to printing");
    assert_eq!(tracked.status_history[2].status, OrderStatus::Pending);
    assert_eq!(tracked.status_history[2].message, WELCOME_MESSAGE);
}

#[tokio::test]
async fn any_status_string_is_accepted() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let sess = session("sess-permissive");
    store.carts.add(&sess, product.id, 1).await.unwrap();
    let order = store
        .orders
        .create_order(&sess, "Mia".to_string(), email("mia@x.com"), "1 Main St".to_string())
        .await
        .unwrap();

    let updated = store
        .orders
        .update_status(order.id, OrderStatus::from("cancelled"), None)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Other("cancelled".to_string()));

    let tracked = store
        .orders
        .get_by_tracking_code(&order.tracking_code)
        .await
        .unwrap();
    assert_eq!(tracked.status_history[0].message, "Status updated to cancelled");
}

#[tokio::test]
async fn admin_listing_is_newest_first() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;

    for token in ["sess-1", "sess-2", "sess-3"] {
        let sess = session(token);
        store.carts.add(&sess, product.id, 1).await.unwrap();
        store
            .orders
            .create_order(&sess, "Mia".to_string(), email("mia@x.com"), "1 Main St".to_string())
            .await
            .unwrap();
    }

    let orders = store.orders.list_all_for_admin().await.unwrap();
    assert_eq!(orders.len(), 3);
    assert!(orders[0].id > orders[1].id);
    assert!(orders[1].id > orders[2].id);
    assert!(!orders[0].items.is_empty());
}

#[tokio::test]
async fn lookups_miss_with_not_found() {
    let store = store();

    let result = store
        .orders
        .get_by_id(printshop::types::OrderId::try_new(42).unwrap())
        .await;
    assert!(matches!(result, Err(StoreError::OrderNotFound(_))));

    let code = printshop::types::TrackingCode::try_new("3DK-99999-999").unwrap();
    let result = store.orders.get_by_tracking_code(&code).await;
    assert!(matches!(result, Err(StoreError::TrackingCodeNotFound(_))));
}

#[tokio::test]
async fn concurrent_creations_cannot_double_spend_one_cart() {
    let store = store();
    let product = add_product(&store, "Dragon", 850).await;
    let sess = session("sess-concurrent");
    store.carts.add(&sess, product.id, 2).await.unwrap();

    let orders_a = store.orders.clone();
    let orders_b = store.orders.clone();
    let sess_a = sess.clone();
    let sess_b = sess.clone();

    let (a, b) = tokio::join!(
        tokio::spawn(async move {
            orders_a
                .create_order(&sess_a, "Mia".to_string(), email("mia@x.com"), "1 Main St".to_string())
                .await
        }),
        tokio::spawn(async move {
            orders_b
                .create_order(&sess_b, "Mia".to_string(), email("mia@x.com"), "1 Main St".to_string())
                .await
        }),
    );

    let results = [a.unwrap(), b.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one creation may consume the cart");
    assert!(results
        .iter()
        .filter(|r| r.is_err())
        .all(|r| matches!(r, Err(StoreError::EmptyCart))));

    let orders = store.orders.list_all_for_admin().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total.to_cents(), 1700);
}
