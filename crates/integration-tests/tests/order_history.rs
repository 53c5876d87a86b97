//! Order history read path.

use bookmall_core::{OrderId, UserId};
use bookmall_integration_tests::TestContext;
use bookmall_orders::{OrderError, OrderService};

#[tokio::test]
async fn test_my_orders_lists_only_own_orders() {
    let ctx = TestContext::new().await;
    let alice = ctx.seed_user("alice").await;
    let bob = ctx.seed_user("bob").await;
    let book = ctx.seed_book("Dune", "Frank Herbert", "12.50", 10).await;

    let service = OrderService::new(&ctx.pool);
    let alice_order = service.place_order(alice, book, 1).await.expect("alice");
    service.place_order(bob, book, 2).await.expect("bob");

    let orders = service.my_orders(alice).await.expect("list");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, alice_order);
    assert_eq!(orders[0].user_id, alice);
}

#[tokio::test]
async fn test_my_orders_for_unknown_buyer_fails() {
    let ctx = TestContext::new().await;

    let service = OrderService::new(&ctx.pool);
    let err = service
        .my_orders(UserId::new(5))
        .await
        .expect_err("unknown buyer");
    assert!(matches!(err, OrderError::UserNotFound(_)));
}

/// The line keeps the title as purchased; a later catalog rename shows up
/// only in the joined catalog fields.
#[tokio::test]
async fn test_detail_preserves_title_snapshot() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("alice").await;
    let book = ctx.seed_book("Dune", "Frank Herbert", "12.50", 10).await;

    let service = OrderService::new(&ctx.pool);
    let order_id = service.place_order(user, book, 2).await.expect("order");

    sqlx::query("UPDATE book SET title = ?1, price = ?2 WHERE id = ?3")
        .bind("Dune (Anniversary Edition)")
        .bind("15.00")
        .bind(book)
        .execute(&ctx.pool)
        .await
        .expect("rename book");

    let detail = service.order_detail(order_id).await.expect("detail");
    assert_eq!(detail.len(), 1);
    assert_eq!(detail[0].book_title, "Dune");
    assert_eq!(detail[0].quantity, 2);
    assert_eq!(detail[0].author.as_deref(), Some("Frank Herbert"));
    assert_eq!(
        detail[0].current_price,
        Some("15.00".parse().expect("decimal"))
    );
}

#[tokio::test]
async fn test_detail_survives_book_removal() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("alice").await;
    let book = ctx.seed_book("Dune", "Frank Herbert", "12.50", 10).await;

    let service = OrderService::new(&ctx.pool);
    let order_id = service.place_order(user, book, 1).await.expect("order");

    sqlx::query("DELETE FROM book WHERE id = ?1")
        .bind(book)
        .execute(&ctx.pool)
        .await
        .expect("remove book");

    let detail = service.order_detail(order_id).await.expect("detail");
    assert_eq!(detail.len(), 1);
    assert_eq!(detail[0].book_title, "Dune");
    assert_eq!(detail[0].author, None);
    assert_eq!(detail[0].current_price, None);
}

#[tokio::test]
async fn test_detail_for_unknown_order_fails() {
    let ctx = TestContext::new().await;

    let service = OrderService::new(&ctx.pool);

    let err = service
        .order_detail(OrderId::new(12))
        .await
        .expect_err("unknown order");
    assert!(matches!(err, OrderError::OrderNotFound(id) if id == OrderId::new(12)));

    let err = service
        .order_detail(OrderId::new(0))
        .await
        .expect_err("non-positive order id");
    assert!(matches!(err, OrderError::Validation(_)));
}
