//! Seed the catalog with demo products.
//!
//! Idempotent: existing product ids are left untouched, so re-running the
//! command after hand-edits will not clobber prices.

use shoplite_server::config::ServerConfig;
use shoplite_server::db;

/// Errors from the seed command.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("configuration error: {0}")]
    Config(#[from] shoplite_server::config::ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One demo catalog entry.
struct SeedProduct {
    id: &'static str,
    name: &'static str,
    price: &'static str,
    image: &'static str,
    category: &'static str,
    description: &'static str,
    rating: f64,
    review_count: i32,
    badge: Option<&'static str>,
}

const DEMO_CATALOG: &[SeedProduct] = &[
    SeedProduct {
        id: "walnut-desk-organizer",
        name: "Walnut Desk Organizer",
        price: "34.50",
        image: "/images/walnut-desk-organizer.jpg",
        category: "office",
        description: "Solid walnut organizer with five compartments and a felt base.",
        rating: 4.7,
        review_count: 214,
        badge: Some("Bestseller"),
    },
    SeedProduct {
        id: "ceramic-pour-over",
        name: "Ceramic Pour-Over Set",
        price: "42.00",
        image: "/images/ceramic-pour-over.jpg",
        category: "kitchen",
        description: "Two-piece stoneware dripper and carafe, 600 ml.",
        rating: 4.5,
        review_count: 98,
        badge: None,
    },
    SeedProduct {
        id: "linen-throw",
        name: "Stonewashed Linen Throw",
        price: "58.00",
        image: "/images/linen-throw.jpg",
        category: "home",
        description: "130 x 180 cm, pre-washed European flax.",
        rating: 4.8,
        review_count: 167,
        badge: Some("New"),
    },
    SeedProduct {
        id: "brass-pocket-knife",
        name: "Brass Pocket Knife",
        price: "19.99",
        image: "/images/brass-pocket-knife.jpg",
        category: "outdoor",
        description: "Friction folder with a 6 cm carbon steel blade.",
        rating: 4.2,
        review_count: 45,
        badge: None,
    },
    SeedProduct {
        id: "enamel-mug",
        name: "Campfire Enamel Mug",
        price: "12.50",
        image: "/images/enamel-mug.jpg",
        category: "outdoor",
        description: "350 ml, speckled enamel over rolled steel.",
        rating: 4.4,
        review_count: 301,
        badge: None,
    },
    SeedProduct {
        id: "beeswax-candles",
        name: "Beeswax Taper Candles (Pair)",
        price: "16.00",
        image: "/images/beeswax-candles.jpg",
        category: "home",
        description: "Hand-dipped, 25 cm, unscented.",
        rating: 4.9,
        review_count: 82,
        badge: Some("Sale"),
    },
    SeedProduct {
        id: "notebook-a5-dotted",
        name: "A5 Dotted Notebook",
        price: "9.75",
        image: "/images/notebook-a5-dotted.jpg",
        category: "office",
        description: "192 pages, 100 gsm paper, lay-flat binding.",
        rating: 4.3,
        review_count: 520,
        badge: None,
    },
    SeedProduct {
        id: "cast-iron-trivet",
        name: "Cast Iron Trivet",
        price: "21.25",
        image: "/images/cast-iron-trivet.jpg",
        category: "kitchen",
        description: "18 cm honeycomb pattern, rubber feet.",
        rating: 4.1,
        review_count: 37,
        badge: None,
    },
];

/// Insert the demo catalog, skipping ids that already exist.
///
/// # Errors
///
/// Returns `SeedError` if configuration loading, the database connection,
/// or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    let mut inserted = 0_u32;
    for product in DEMO_CATALOG {
        let result = sqlx::query(
            r"
            INSERT INTO products
                (id, name, price, image, category, description,
                 rating, review_count, badge)
            VALUES ($1, $2, $3::numeric, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(product.id)
        .bind(product.name)
        .bind(product.price)
        .bind(product.image)
        .bind(product.category)
        .bind(product.description)
        .bind(product.rating)
        .bind(product.review_count)
        .bind(product.badge)
        .execute(&pool)
        .await?;

        inserted += u32::try_from(result.rows_affected()).unwrap_or(0);
    }

    tracing::info!(
        inserted,
        total = DEMO_CATALOG.len(),
        "Catalog seeding complete"
    );
    Ok(())
}
