//! Repository for the `products` table.

use sqlx::PgPool;

use crate::models::product::{NewProduct, Product, ProductChanges};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, barcode_id, image, title, price, description, created_at, updated_at, deleted_at";

/// CRUD, search, and soft-delete operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Count rows that are not soft-deleted.
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await
    }

    /// One listing page of active products, in insertion order.
    pub async fn list_active(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE deleted_at IS NULL
             ORDER BY id
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find an active product by barcode.
    pub async fn find_active_by_barcode(
        pool: &PgPool,
        barcode_id: &str,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE barcode_id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(barcode_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a soft-deleted product by barcode. Used by create to decide
    /// between inserting and restoring.
    pub async fn find_deleted_by_barcode(
        pool: &PgPool,
        barcode_id: &str,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE barcode_id = $1 AND deleted_at IS NOT NULL"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(barcode_id)
            .fetch_optional(pool)
            .await
    }

    /// Search active products: case-insensitive substring match on title,
    /// exact match on barcode, AND-combined when both are given. Unpaginated.
    pub async fn search_active(
        pool: &PgPool,
        title: Option<&str>,
        barcode_id: Option<&str>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE deleted_at IS NULL
               AND ($1::text IS NULL OR title ILIKE '%' || $1 || '%')
               AND ($2::text IS NULL OR barcode_id = $2)
             ORDER BY id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(title)
            .bind(barcode_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new product, returning the created row.
    ///
    /// A duplicate barcode violates `uq_products_barcode_id`; the caller
    /// checks first, and the constraint covers the concurrent-create race.
    pub async fn insert(pool: &PgPool, input: &NewProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (barcode_id, image, title, price, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.barcode_id)
            .bind(&input.image)
            .bind(&input.title)
            .bind(input.price)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Apply the non-`None` fields of `changes` to an active product and
    /// refresh `updated_at`. Returns `true` if a row was updated.
    pub async fn update_fields(
        pool: &PgPool,
        barcode_id: &str,
        changes: &ProductChanges,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET
                image = COALESCE($2, image),
                title = COALESCE($3, title),
                price = COALESCE($4, price),
                description = COALESCE($5, description),
                updated_at = NOW()
             WHERE barcode_id = $1 AND deleted_at IS NULL",
        )
        .bind(barcode_id)
        .bind(&changes.image)
        .bind(&changes.title)
        .bind(changes.price)
        .bind(&changes.description)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete an active product. Returns `true` if a row was marked.
    pub async fn soft_delete(pool: &PgPool, barcode_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET deleted_at = NOW(), updated_at = NOW()
             WHERE barcode_id = $1 AND deleted_at IS NULL",
        )
        .bind(barcode_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted product. Returns `true` if a row was restored.
    pub async fn restore(pool: &PgPool, barcode_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET deleted_at = NULL, updated_at = NOW()
             WHERE barcode_id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(barcode_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
