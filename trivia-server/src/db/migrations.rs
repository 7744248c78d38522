//! Schema bootstrap and reference data

use sqlx::PgPool;

use crate::models::DEFAULT_CATEGORIES;

/// Create the trivia tables if they don't exist
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running trivia migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            type TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // `category` is a plain integer: no foreign key to categories.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id SERIAL PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            category INTEGER NOT NULL,
            difficulty INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category)")
        .execute(pool)
        .await?;

    tracing::info!("Trivia migrations complete");
    Ok(())
}

/// Insert the reference categories, skipping ids that already exist.
///
/// Returns how many rows were inserted.
pub async fn seed_categories(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for (id, kind) in DEFAULT_CATEGORIES {
        let result = sqlx::query(
            "INSERT INTO categories (id, type) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(kind)
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected();
    }

    // Explicit ids bypass the SERIAL sequence; move it past them.
    sqlx::query(
        "SELECT setval(pg_get_serial_sequence('categories', 'id'), (SELECT MAX(id) FROM categories))",
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!(inserted, "Seeded categories");
    Ok(inserted)
}
