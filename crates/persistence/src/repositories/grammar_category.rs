//! Grammar category repository for database operations.

use domain::models::{CreateGrammarCategoryRequest, UpdateGrammarCategoryRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::GrammarCategoryEntity;
use crate::metrics::QueryTimer;

const CATEGORY_COLUMNS: &str =
    "id, name, slug, icon, color, order_index, is_active, created_at, updated_at";

/// Repository for grammar category database operations.
#[derive(Clone)]
pub struct GrammarCategoryRepository {
    pool: PgPool,
}

impl GrammarCategoryRepository {
    /// Creates a new GrammarCategoryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All categories, for the admin list.
    pub async fn list_all(&self) -> Result<Vec<GrammarCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_grammar_categories");
        let result = sqlx::query_as::<_, GrammarCategoryEntity>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM grammar_categories ORDER BY order_index, name",
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Active categories only, for the learner-facing catalogue.
    pub async fn list_active(&self) -> Result<Vec<GrammarCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_grammar_categories");
        let result = sqlx::query_as::<_, GrammarCategoryEntity>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM grammar_categories WHERE is_active = true \
             ORDER BY order_index, name",
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a category by id.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<GrammarCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_grammar_category_by_id");
        let result = sqlx::query_as::<_, GrammarCategoryEntity>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM grammar_categories WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a category.
    pub async fn create(
        &self,
        request: &CreateGrammarCategoryRequest,
    ) -> Result<GrammarCategoryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_grammar_category");
        let result = sqlx::query_as::<_, GrammarCategoryEntity>(&format!(
            r#"
            INSERT INTO grammar_categories (name, slug, icon, color, order_index, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CATEGORY_COLUMNS}
            "#,
        ))
        .bind(&request.name)
        .bind(&request.slug)
        .bind(&request.icon)
        .bind(&request.color)
        .bind(request.order_index)
        .bind(request.is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partial update; unset fields keep their value.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateGrammarCategoryRequest,
    ) -> Result<Option<GrammarCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_grammar_category");
        let result = sqlx::query_as::<_, GrammarCategoryEntity>(&format!(
            r#"
            UPDATE grammar_categories
            SET name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                icon = COALESCE($4, icon),
                color = COALESCE($5, color),
                order_index = COALESCE($6, order_index),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CATEGORY_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(request.name.as_deref())
        .bind(request.slug.as_deref())
        .bind(request.icon.as_deref())
        .bind(request.color.as_deref())
        .bind(request.order_index)
        .bind(request.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Flip the active flag, returning the updated row.
    pub async fn toggle_active(
        &self,
        id: Uuid,
    ) -> Result<Option<GrammarCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("toggle_grammar_category");
        let result = sqlx::query_as::<_, GrammarCategoryEntity>(&format!(
            r#"
            UPDATE grammar_categories
            SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
            RETURNING {CATEGORY_COLUMNS}
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a category. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_grammar_category");
        let result = sqlx::query("DELETE FROM grammar_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
