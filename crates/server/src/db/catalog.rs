//! Catalog repository: the product source of truth.
//!
//! The checkout verifier trusts prices, names, and images from here and
//! nowhere else. The list query exists to populate add-time snapshots on
//! the buyer side; its filtering and sorting are presentation concerns.

use rust_decimal::Decimal;
use sqlx::PgPool;

use shoplite_core::{Product, ProductId};

use super::RepositoryError;

/// Catalog list query parameters.
#[derive(Debug, Default, Clone)]
pub struct CatalogFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Case-insensitive substring search over name and description.
    pub search: Option<String>,
    /// Sort order; see [`SortKey`].
    pub sort: SortKey,
}

/// Supported catalog sort orders.
///
/// Unknown client-supplied sort values fall back to `Default` rather than
/// erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Seed/insertion order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    Rating,
}

impl SortKey {
    /// Parse a query-string value; unknown values map to `Default`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            "rating" => Self::Rating,
            _ => Self::Default,
        }
    }

    const fn order_by(self) -> &'static str {
        match self {
            Self::Default => "position ASC",
            Self::PriceAsc => "price ASC, position ASC",
            Self::PriceDesc => "price DESC, position ASC",
            Self::Rating => "rating DESC, position ASC",
        }
    }
}

/// Database row for a catalog product.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: Decimal,
    image: String,
    category: String,
    description: String,
    rating: f64,
    review_count: i32,
    badge: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            image: row.image,
            category: row.category,
            description: row.description,
            rating: row.rating,
            review_count: row.review_count,
            badge: row.badge,
        }
    }
}

const PRODUCT_COLUMNS: &str =
    "id, name, price, image, category, description, rating, review_count, badge";

/// Repository for catalog queries.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally filtered by category and search term.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &CatalogFilter) -> Result<Vec<Product>, RepositoryError> {
        // ORDER BY cannot be bound as a parameter; the clause comes from the
        // closed SortKey enum, never from client input.
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE ($1::text IS NULL OR category = $1) \
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%' \
                    OR description ILIKE '%' || $2 || '%') \
             ORDER BY {}",
            filter.sort.order_by()
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(filter.category.as_deref())
            .bind(filter.search.as_deref())
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn fetch_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Fetch every product whose id appears in `ids`, in one batch.
    ///
    /// Missing ids are simply absent from the result; the checkout verifier
    /// detects and reports them. Duplicate ids return one row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn fetch_many(&self, ids: &[String]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(ids)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parses_known_values() {
        assert_eq!(SortKey::parse("price_asc"), SortKey::PriceAsc);
        assert_eq!(SortKey::parse("price_desc"), SortKey::PriceDesc);
        assert_eq!(SortKey::parse("rating"), SortKey::Rating);
    }

    #[test]
    fn test_unknown_sort_falls_back_to_default() {
        assert_eq!(SortKey::parse("name_desc"), SortKey::Default);
        assert_eq!(SortKey::parse(""), SortKey::Default);
    }
}
