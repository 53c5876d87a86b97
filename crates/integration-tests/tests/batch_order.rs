//! Multi-book batch order placement.

use rust_decimal::Decimal;

use bookmall_core::BookId;
use bookmall_integration_tests::TestContext;
use bookmall_orders::db::{BookRepository, OrderRepository};
use bookmall_orders::models::OrderLineRequest;
use bookmall_orders::{OrderError, OrderService};

fn dec(raw: &str) -> Decimal {
    raw.parse().expect("decimal literal")
}

#[tokio::test]
async fn test_batch_order_success() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("alice").await;
    let dune = ctx.seed_book("Dune", "Frank Herbert", "19.99", 10).await;
    let leaves = ctx.seed_book("Leaves of Grass", "Walt Whitman", "0.01", 10).await;

    let service = OrderService::new(&ctx.pool);
    let order_id = service
        .place_batch_order(
            user,
            &[
                OrderLineRequest {
                    book_id: dune,
                    quantity: 3,
                },
                OrderLineRequest {
                    book_id: leaves,
                    quantity: 7,
                },
            ],
        )
        .await
        .expect("batch should succeed");

    assert_eq!(ctx.stock_of(dune).await, 7);
    assert_eq!(ctx.stock_of(leaves).await, 3);

    let orders = OrderRepository::new(&ctx.pool);
    let headers = orders.list_for_user(user).await.expect("list orders");
    assert_eq!(headers.len(), 1);
    // 19.99 * 3 + 0.01 * 7 = 60.04 exactly, no rounding drift.
    assert_eq!(headers[0].total_price, dec("60.04"));

    let lines = orders.lines_for_order(order_id).await.expect("list lines");
    assert_eq!(lines.len(), 2);
    // Lines come back in input order.
    assert_eq!(lines[0].book_id, dune);
    assert_eq!(lines[0].quantity, 3);
    assert_eq!(lines[1].book_id, leaves);
    assert_eq!(lines[1].quantity, 7);
}

#[tokio::test]
async fn test_duplicate_books_stay_separate_lines() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("alice").await;
    let dune = ctx.seed_book("Dune", "Frank Herbert", "10.00", 10).await;

    let service = OrderService::new(&ctx.pool);
    let order_id = service
        .place_batch_order(
            user,
            &[
                OrderLineRequest {
                    book_id: dune,
                    quantity: 2,
                },
                OrderLineRequest {
                    book_id: dune,
                    quantity: 1,
                },
            ],
        )
        .await
        .expect("duplicate pairs are independent lines");

    let orders = OrderRepository::new(&ctx.pool);
    let lines = orders.lines_for_order(order_id).await.expect("list lines");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[1].quantity, 1);
    assert_eq!(ctx.stock_of(dune).await, 7);

    let headers = orders.list_for_user(user).await.expect("list orders");
    assert_eq!(headers[0].total_price, dec("30.00"));
}

/// One out-of-stock member fails the whole batch: zero rows persisted and
/// the sufficient member's stock untouched.
#[tokio::test]
async fn test_batch_is_all_or_nothing() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("alice").await;
    let stocked = ctx.seed_book("Dune", "Frank Herbert", "19.99", 10).await;
    let empty = ctx.seed_book("Ulysses", "James Joyce", "24.00", 0).await;

    let service = OrderService::new(&ctx.pool);
    let err = service
        .place_batch_order(
            user,
            &[
                OrderLineRequest {
                    book_id: stocked,
                    quantity: 2,
                },
                OrderLineRequest {
                    book_id: empty,
                    quantity: 1,
                },
            ],
        )
        .await
        .expect_err("batch with out-of-stock member must fail");
    assert!(matches!(err, OrderError::InsufficientStock { book_id, .. } if book_id == empty));

    assert_eq!(ctx.order_count().await, 0);
    assert_eq!(ctx.line_count().await, 0);
    assert_eq!(ctx.stock_of(stocked).await, 10);
    assert_eq!(ctx.stock_of(empty).await, 0);
}

/// When a later decrement fails, the decrements that already succeeded
/// inside the same unit of work roll back too. Driven through the
/// repositories directly so the failure hits the authoritative check, not
/// the advisory pre-pass.
#[tokio::test]
async fn test_failed_decrement_rolls_back_earlier_decrements() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("alice").await;
    let first = ctx.seed_book("Dune", "Frank Herbert", "19.99", 10).await;
    let second = ctx.seed_book("Ulysses", "James Joyce", "24.00", 5).await;

    let mut tx = ctx.pool.begin().await.expect("begin");
    let order_id = OrderRepository::create_order(&mut tx, user, &dec("223.96"))
        .await
        .expect("header");
    OrderRepository::append_line(&mut tx, order_id, user, first, "Dune", 4)
        .await
        .expect("first line");
    OrderRepository::append_line(&mut tx, order_id, user, second, "Ulysses", 6)
        .await
        .expect("second line");

    let ok = BookRepository::decrement_stock(&mut tx, first, 4)
        .await
        .expect("first decrement");
    assert!(ok);
    let ok = BookRepository::decrement_stock(&mut tx, second, 6)
        .await
        .expect("second decrement");
    assert!(!ok, "6 of 5 must fail");

    // Abort: dropping the transaction discards the header, both lines,
    // and the first decrement.
    drop(tx);

    assert_eq!(ctx.order_count().await, 0);
    assert_eq!(ctx.line_count().await, 0);
    assert_eq!(ctx.stock_of(first).await, 10);
    assert_eq!(ctx.stock_of(second).await, 5);
}

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("alice").await;

    let service = OrderService::new(&ctx.pool);
    let err = service
        .place_batch_order(user, &[])
        .await
        .expect_err("empty batch must fail");
    assert!(matches!(err, OrderError::Validation(_)));
}

/// The pre-pass rejects the whole call before any write if any single
/// member fails its own check.
#[tokio::test]
async fn test_bad_member_fails_before_any_write() {
    let ctx = TestContext::new().await;
    let user = ctx.seed_user("alice").await;
    let dune = ctx.seed_book("Dune", "Frank Herbert", "19.99", 10).await;

    let service = OrderService::new(&ctx.pool);

    let err = service
        .place_batch_order(
            user,
            &[
                OrderLineRequest {
                    book_id: dune,
                    quantity: 1,
                },
                OrderLineRequest {
                    book_id: dune,
                    quantity: 0,
                },
            ],
        )
        .await
        .expect_err("zero quantity member must fail");
    assert!(matches!(err, OrderError::Validation(_)));

    let err = service
        .place_batch_order(
            user,
            &[
                OrderLineRequest {
                    book_id: dune,
                    quantity: 1,
                },
                OrderLineRequest {
                    book_id: BookId::new(404),
                    quantity: 1,
                },
            ],
        )
        .await
        .expect_err("unknown member must fail");
    assert!(matches!(err, OrderError::BookNotFound(id) if id == BookId::new(404)));

    assert_eq!(ctx.order_count().await, 0);
    assert_eq!(ctx.line_count().await, 0);
    assert_eq!(ctx.stock_of(dune).await, 10);
}
