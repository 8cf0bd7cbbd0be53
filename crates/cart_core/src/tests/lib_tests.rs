use super::*;
use shared::domain::Category;
use tokio::sync::broadcast::error::TryRecvError;

fn item(id: &str, category: Category, price_cents: i64) -> MenuItem {
    MenuItem {
        id: ItemId::from(id),
        category,
        name: format!("item {id}"),
        price: Money::from_cents(price_cents),
        badge: "Test".to_string(),
        description: String::new(),
        image: String::new(),
    }
}

fn test_catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::new(vec![
            item("c1", Category::Chicken, 599),
            item("c2", Category::Chicken, 1249),
            item("b1", Category::Burger, 799),
            item("s1", Category::Sides, 399),
            item("d1", Category::Drinks, 199),
        ])
        .expect("valid catalog"),
    )
}

fn engine() -> CartEngine {
    CartEngine::new(test_catalog())
}

#[test]
fn adjust_accumulates_quantity_and_total() {
    let mut cart = engine();
    assert_eq!(cart.total(), Money::ZERO);

    assert!(cart.adjust(&ItemId::from("c1"), 1));
    assert_eq!(cart.total(), Money::from_cents(599));

    assert!(cart.adjust(&ItemId::from("c1"), 2));
    assert_eq!(cart.quantity(&ItemId::from("c1")), 3);
    assert_eq!(cart.total(), Money::from_cents(1797));

    assert!(cart.adjust(&ItemId::from("c1"), -5));
    assert_eq!(cart.quantity(&ItemId::from("c1")), 0);
    assert_eq!(cart.total(), Money::ZERO);
    assert!(cart.is_empty());
}

#[test]
fn non_positive_quantities_are_never_stored() {
    let mut cart = engine();

    assert!(!cart.adjust(&ItemId::from("c1"), -3));
    assert!(cart.is_empty());

    cart.adjust(&ItemId::from("c1"), 2);
    cart.adjust(&ItemId::from("c1"), -2);
    assert!(cart.is_empty());
    assert!(cart.lines().is_empty());

    cart.adjust(&ItemId::from("b1"), 1);
    cart.adjust(&ItemId::from("b1"), -10);
    assert!(cart.is_empty());
}

#[test]
fn adding_then_removing_restores_the_prior_total() {
    let mut cart = engine();
    cart.adjust(&ItemId::from("b1"), 2);
    let before = cart.total();

    cart.adjust(&ItemId::from("c1"), 3);
    assert_ne!(cart.total(), before);

    cart.adjust(&ItemId::from("c1"), -3);
    assert_eq!(cart.total(), before);
}

#[test]
fn adjusting_an_unknown_id_is_a_silent_no_op() {
    let mut cart = engine();
    let mut events = cart.subscribe_events();

    assert!(!cart.adjust(&ItemId::from("zz"), 1));
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Money::ZERO);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn two_distinct_items_produce_two_lines_and_a_combined_total() {
    let mut cart = engine();
    cart.adjust(&ItemId::from("c1"), 1);
    cart.adjust(&ItemId::from("b1"), 1);

    assert_eq!(cart.total(), Money::from_cents(1398));
    assert_eq!(cart.lines().len(), 2);
}

#[test]
fn lines_are_ordered_by_category_then_catalog_position() {
    let mut cart = engine();
    for id in ["d1", "s1", "b1", "c2", "c1"] {
        cart.adjust(&ItemId::from(id), 1);
    }

    let lines = cart.lines();
    let ids: Vec<&str> = lines.iter().map(|line| line.item.id.as_str()).collect();
    assert_eq!(ids, ["c1", "c2", "b1", "s1", "d1"]);
}

#[test]
fn lines_carry_per_line_subtotals() {
    let mut cart = engine();
    cart.adjust(&ItemId::from("s1"), 3);

    let lines = cart.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 3);
    assert_eq!(lines[0].subtotal, Money::from_cents(1197));
}

#[test]
fn total_is_recomputed_on_every_call() {
    let mut cart = engine();
    cart.adjust(&ItemId::from("d1"), 1);
    assert_eq!(cart.total(), cart.total());

    cart.adjust(&ItemId::from("d1"), 1);
    assert_eq!(cart.total(), Money::from_cents(398));
}

#[test]
fn checkout_on_an_empty_cart_fails_and_changes_nothing() {
    let mut cart = engine();
    let mut events = cart.subscribe_events();

    assert_eq!(cart.checkout(), Err(CheckoutError::EmptyCart));
    assert!(cart.is_empty());
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn checkout_keeps_the_cart_by_default() {
    let mut cart = engine();
    cart.adjust(&ItemId::from("c1"), 2);

    let receipt = cart.checkout().expect("non-empty cart");
    assert_eq!(receipt.total, Money::from_cents(1198));
    assert_eq!(receipt.lines.len(), 1);
    assert_eq!(receipt.lines[0].quantity, 2);

    assert_eq!(cart.quantity(&ItemId::from("c1")), 2);
    assert_eq!(cart.total(), Money::from_cents(1198));
}

#[test]
fn checkout_can_be_configured_to_clear_the_cart() {
    let mut cart = CartEngine::with_behavior(test_catalog(), CheckoutBehavior::ClearCart);
    cart.adjust(&ItemId::from("b1"), 1);
    let mut events = cart.subscribe_events();

    let receipt = cart.checkout().expect("non-empty cart");
    assert_eq!(receipt.total, Money::from_cents(799));

    assert!(cart.is_empty());
    assert_eq!(cart.total(), Money::ZERO);

    let cleared = events.try_recv().expect("updated event after clearing");
    assert_eq!(
        cleared,
        CartEvent::Updated {
            lines: Vec::new(),
            total: Money::ZERO,
        }
    );
    assert!(matches!(
        events.try_recv(),
        Ok(CartEvent::CheckoutCompleted { .. })
    ));
}

#[test]
fn successive_checkouts_mint_distinct_order_ids() {
    let mut cart = engine();
    cart.adjust(&ItemId::from("d1"), 1);

    let first = cart.checkout().expect("first checkout");
    let second = cart.checkout().expect("second checkout");
    assert_ne!(first.order_id, second.order_id);
}

#[test]
fn every_mutation_emits_the_post_mutation_projection() {
    let mut cart = engine();
    let mut events = cart.subscribe_events();

    cart.adjust(&ItemId::from("c1"), 1);
    match events.try_recv().expect("updated event") {
        CartEvent::Updated { lines, total } => {
            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0].item.id, ItemId::from("c1"));
            assert_eq!(total, Money::from_cents(599));
        }
        other => panic!("expected updated event, got {other:?}"),
    }

    // A delta that leaves the map unchanged emits nothing.
    cart.adjust(&ItemId::from("c1"), 0);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    cart.adjust(&ItemId::from("c1"), -1);
    match events.try_recv().expect("updated event") {
        CartEvent::Updated { lines, total } => {
            assert!(lines.is_empty());
            assert_eq!(total, Money::ZERO);
        }
        other => panic!("expected updated event, got {other:?}"),
    }
}

#[test]
fn state_stays_correct_with_no_subscriber_attached() {
    let mut cart = engine();

    cart.adjust(&ItemId::from("c1"), 1);
    cart.adjust(&ItemId::from("b1"), 2);
    assert_eq!(cart.total(), Money::from_cents(2197));

    let receipt = cart.checkout().expect("non-empty cart");
    assert_eq!(receipt.lines.len(), 2);
}

#[test]
fn receipt_serializes_with_decimal_currency_values() {
    let mut cart = engine();
    cart.adjust(&ItemId::from("c1"), 1);
    let receipt = cart.checkout().expect("non-empty cart");

    let value = serde_json::to_value(&receipt).expect("receipt json");
    assert_eq!(value["total"], serde_json::json!(5.99));
    assert_eq!(value["lines"][0]["quantity"], serde_json::json!(1));
    assert_eq!(value["lines"][0]["item"]["id"], serde_json::json!("c1"));
    assert!(value["order_id"].is_string());
}
