//! Repository for the `design` table.
//!
//! Every query is scoped by owner and ignores soft-deleted rows, except
//! [`DesignRepo::exists_including_deleted`].

use pdfgen_core::pagination::{ListQuery, Pagination};
use pdfgen_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::design::{CreateDesign, Design, UpdateDesign};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, template, fields, created_at, updated_at, deleted_at";

/// Row filter for listings. `$2` is an optional `ILIKE` pattern.
const LIST_FILTER: &str =
    "user_id = $1 AND deleted_at IS NULL AND ($2::text IS NULL OR name ILIKE $2)";

/// Provides CRUD operations for designs.
pub struct DesignRepo;

impl DesignRepo {
    /// Insert a new design, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDesign) -> Result<Design, sqlx::Error> {
        let query = format!(
            "INSERT INTO design (id, user_id, name, template, fields)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Design>(&query)
            .bind(input.id)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.template)
            .bind(input.fields.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }

    /// Find a non-deleted design owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Design>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM design
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `user_id` owns a design with this id, deleted or not.
    pub async fn exists_including_deleted(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM design WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Replace a design's name, template and fields.
    ///
    /// Returns `None` if no non-deleted row with the given `id` belongs to
    /// `user_id`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateDesign,
    ) -> Result<Option<Design>, sqlx::Error> {
        let query = format!(
            "UPDATE design SET
                name = $3,
                template = $4,
                fields = $5,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Design>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.template)
            .bind(input.fields.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a design. Returns `true` if the row was marked deleted.
    ///
    /// An already-deleted row is left untouched, so its original
    /// `deleted_at` survives repeated calls.
    pub async fn soft_delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE design SET deleted_at = NOW()
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of an owner's designs, oldest first. `query.search` is ignored.
    pub async fn list_by_user_id(
        pool: &PgPool,
        query: &ListQuery,
    ) -> Result<(Vec<Design>, Pagination), sqlx::Error> {
        Self::fetch_page(pool, query, None).await
    }

    /// Like [`DesignRepo::list_by_user_id`], restricted to designs whose name
    /// contains `query.search`, ignoring case.
    pub async fn search(
        pool: &PgPool,
        query: &ListQuery,
    ) -> Result<(Vec<Design>, Pagination), sqlx::Error> {
        Self::fetch_page(pool, query, query.search.as_deref()).await
    }

    async fn fetch_page(
        pool: &PgPool,
        query: &ListQuery,
        search: Option<&str>,
    ) -> Result<(Vec<Design>, Pagination), sqlx::Error> {
        let pattern = search.map(|s| format!("%{}%", escape_like(s)));

        let count_query = format!("SELECT COUNT(*) FROM design WHERE {LIST_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(query.user_id)
            .bind(pattern.as_deref())
            .fetch_one(pool)
            .await?;

        let page_query = format!(
            "SELECT {COLUMNS} FROM design
             WHERE {LIST_FILTER}
             ORDER BY created_at, id
             LIMIT $3 OFFSET $4"
        );
        let designs = sqlx::query_as::<_, Design>(&page_query)
            .bind(query.user_id)
            .bind(pattern.as_deref())
            .bind(query.limit)
            .bind(query.offset())
            .fetch_all(pool)
            .await?;

        Ok((
            designs,
            Pagination {
                page: query.page,
                total,
            },
        ))
    }
}

/// Escape `LIKE` metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
