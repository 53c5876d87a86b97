//! Engine setup through the configuration path.

use bookmall_core::{BookId, UserId};
use bookmall_orders::config::OrdersConfig;
use bookmall_orders::db::{MIGRATOR, create_pool};
use bookmall_orders::OrderService;

/// The engine works end to end on a pool built from an `OrdersConfig`,
/// the same way a production caller would wire it up.
#[tokio::test]
async fn test_place_order_on_configured_pool() {
    let config = OrdersConfig {
        database_url: String::from("sqlite::memory:").into(),
        max_db_connections: 1,
    };

    let pool = create_pool(&config).await.expect("open pool");
    MIGRATOR.run(&pool).await.expect("run migrations");

    let (user_id,): (i32,) =
        sqlx::query_as("INSERT INTO user (login_name) VALUES ('alice') RETURNING id")
            .fetch_one(&pool)
            .await
            .expect("seed user");
    let (book_id,): (i32,) = sqlx::query_as(
        "INSERT INTO book (title, author, price, stock) \
         VALUES ('Dune', 'Frank Herbert', '12.50', 10) RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .expect("seed book");

    let service = OrderService::new(&pool);
    service
        .place_order(UserId::new(user_id), BookId::new(book_id), 4)
        .await
        .expect("order on configured pool");

    let stock: i32 = sqlx::query_scalar("SELECT stock FROM book WHERE id = ?1")
        .bind(book_id)
        .fetch_one(&pool)
        .await
        .expect("read stock");
    assert_eq!(stock, 6);
}
