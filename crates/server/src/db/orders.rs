//! Order repository: the append-only record of verified orders.
//!
//! Nothing is written here until the checkout verifier has re-priced every
//! line; a single INSERT makes acceptance atomic, so there is no partial
//! order state to roll back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use shoplite_core::order::{Order, OrderCustomer, OrderLine};
use shoplite_core::types::{Email, OrderId, OrderStatus};

use super::RepositoryError;

/// Database row for a persisted order.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    customer_name: String,
    customer_email: String,
    customer_address: Option<String>,
    items: Json<Vec<OrderLine>>,
    total: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.customer_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::from_uuid(row.id),
            customer: OrderCustomer {
                name: row.customer_name,
                email,
                address: row.customer_address,
            },
            items: row.items.0,
            total: row.total,
            status: OrderStatus::from_db(&row.status),
            created_at: row.created_at,
        })
    }
}

/// Repository for order persistence and retrieval.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a verified order in a single atomic insert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails; no partial
    /// state is left behind.
    pub async fn insert(&self, order: &Order) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO orders
                (id, customer_name, customer_email, customer_address,
                 items, total, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(order.id.as_uuid())
        .bind(&order.customer.name)
        .bind(order.customer.email.as_str())
        .bind(order.customer.address.as_deref())
        .bind(Json(&order.items))
        .bind(order.total)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Fetch a persisted order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored row cannot be mapped
    /// back onto the order model.
    pub async fn fetch_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, customer_name, customer_email, customer_address,
                   items, total, status, created_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }
}
