//! Grammar topic repository for database operations.

use domain::models::{CreateGrammarTopicRequest, UpdateGrammarTopicRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::GrammarTopicEntity;
use crate::metrics::QueryTimer;

const TOPIC_COLUMNS: &str = "id, category_id, title, explanation, examples, mini_text, \
     is_premium, order_index, quiz_id, created_at, updated_at";

/// Repository for grammar topic database operations.
#[derive(Clone)]
pub struct GrammarTopicRepository {
    pool: PgPool,
}

impl GrammarTopicRepository {
    /// Creates a new GrammarTopicRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All topics, for the admin list.
    pub async fn list_all(&self) -> Result<Vec<GrammarTopicEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_grammar_topics");
        let result = sqlx::query_as::<_, GrammarTopicEntity>(&format!(
            "SELECT {TOPIC_COLUMNS} FROM grammar_topics ORDER BY order_index, title",
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Topics of one category, for the learner-facing catalogue.
    pub async fn list_by_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<GrammarTopicEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_grammar_topics_by_category");
        let result = sqlx::query_as::<_, GrammarTopicEntity>(&format!(
            "SELECT {TOPIC_COLUMNS} FROM grammar_topics WHERE category_id = $1 \
             ORDER BY order_index, title",
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a topic by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GrammarTopicEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_grammar_topic_by_id");
        let result = sqlx::query_as::<_, GrammarTopicEntity>(&format!(
            "SELECT {TOPIC_COLUMNS} FROM grammar_topics WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a topic.
    pub async fn create(
        &self,
        request: &CreateGrammarTopicRequest,
    ) -> Result<GrammarTopicEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_grammar_topic");
        let result = sqlx::query_as::<_, GrammarTopicEntity>(&format!(
            r#"
            INSERT INTO grammar_topics
                (category_id, title, explanation, examples, mini_text, is_premium,
                 order_index, quiz_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {TOPIC_COLUMNS}
            "#,
        ))
        .bind(request.category_id)
        .bind(&request.title)
        .bind(&request.explanation)
        .bind(&request.examples)
        .bind(request.mini_text.as_deref())
        .bind(request.is_premium)
        .bind(request.order_index)
        .bind(request.quiz_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partial update; unset fields keep their value.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateGrammarTopicRequest,
    ) -> Result<Option<GrammarTopicEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_grammar_topic");
        let result = sqlx::query_as::<_, GrammarTopicEntity>(&format!(
            r#"
            UPDATE grammar_topics
            SET category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                explanation = COALESCE($4, explanation),
                examples = COALESCE($5, examples),
                mini_text = COALESCE($6, mini_text),
                is_premium = COALESCE($7, is_premium),
                order_index = COALESCE($8, order_index),
                quiz_id = COALESCE($9, quiz_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TOPIC_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(request.category_id)
        .bind(request.title.as_deref())
        .bind(request.explanation.as_deref())
        .bind(request.examples.clone())
        .bind(request.mini_text.as_deref())
        .bind(request.is_premium)
        .bind(request.order_index)
        .bind(request.quiz_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a topic. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_grammar_topic");
        let result = sqlx::query("DELETE FROM grammar_topics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
