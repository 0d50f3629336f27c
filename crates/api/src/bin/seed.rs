//! Sample content loader.
//!
//! Seeds an admin account, a grammar catalogue with a practice quiz, and a
//! few reading and listening items. Run with:
//!
//! ```text
//! SEED_ADMIN_EMAIL=admin@lingora.app SEED_ADMIN_PASSWORD=change-me-1 cargo run --bin seed
//! ```

use anyhow::{bail, Result};
use domain::models::{
    AnswerOption, CreateGrammarCategoryRequest, CreateGrammarTopicRequest,
    CreateQuestionRequest, CreateReadingTextRequest, LanguageLevel, QuestionType,
};
use persistence::repositories::{
    GrammarCategoryRepository, GrammarTopicRepository, ProfileRepository, QuizRepository,
    ReadingTextRepository,
};
use shared::password::hash_password;
use tracing::info;

use lingora_api::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = Config::load()?;
    let pool = persistence::db::create_pool(&config.database.pool_config()).await?;

    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;

    let categories = GrammarCategoryRepository::new(pool.clone());
    if !categories.list_all().await?.is_empty() {
        bail!("Database already contains content; refusing to seed twice");
    }

    // Admin account
    let admin_email =
        std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@lingora.app".to_string());
    let admin_password =
        std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "change-me-1".to_string());

    let profiles = ProfileRepository::new(pool.clone());
    let password_hash = hash_password(&admin_password)?;
    let admin = profiles
        .create(&admin_email, Some(&password_hash), Some("Administrator"))
        .await?;
    profiles.update_user(admin.id, None, Some(true)).await?;
    info!(email = %admin_email, "Created admin account");

    // Grammar catalogue
    let tenses = categories
        .create(&CreateGrammarCategoryRequest {
            name: "Tenses".to_string(),
            slug: "tenses".to_string(),
            icon: "clock".to_string(),
            color: "#4f46e5".to_string(),
            order_index: 0,
            is_active: true,
        })
        .await?;

    // Practice quiz for the first topic
    let quizzes = QuizRepository::new(pool.clone());
    let quiz = quizzes.create_quiz("Present Simple practice").await?;

    quizzes
        .create_question(
            quiz.id,
            &CreateQuestionRequest {
                text: "She ___ to school every day.".to_string(),
                question_type: QuestionType::MultipleChoice,
                options: vec![
                    AnswerOption {
                        text: "go".to_string(),
                        is_correct: false,
                    },
                    AnswerOption {
                        text: "goes".to_string(),
                        is_correct: true,
                    },
                    AnswerOption {
                        text: "going".to_string(),
                        is_correct: false,
                    },
                    AnswerOption {
                        text: "gone".to_string(),
                        is_correct: false,
                    },
                ],
                correct_answer: None,
                points: 1,
                order_index: 0,
            },
        )
        .await?;

    quizzes
        .create_question(
            quiz.id,
            &CreateQuestionRequest {
                text: "Complete: 'He ___ (work) in a bank.'".to_string(),
                question_type: QuestionType::FillBlank,
                options: vec![],
                correct_answer: Some("works".to_string()),
                points: 1,
                order_index: 1,
            },
        )
        .await?;

    let topics = GrammarTopicRepository::new(pool.clone());
    topics
        .create(&CreateGrammarTopicRequest {
            category_id: tenses.id,
            title: "Present Simple".to_string(),
            explanation: "The present simple describes habits, facts, and routines."
                .to_string(),
            examples: vec![
                "I drink coffee every morning.".to_string(),
                "The museum opens at nine.".to_string(),
            ],
            mini_text: Some(
                "Maria works in a library. Every morning she opens the doors at eight."
                    .to_string(),
            ),
            is_premium: false,
            order_index: 0,
            quiz_id: Some(quiz.id),
        })
        .await?;

    topics
        .create(&CreateGrammarTopicRequest {
            category_id: tenses.id,
            title: "Present Perfect".to_string(),
            explanation: "The present perfect links past events to the present.".to_string(),
            examples: vec!["I have lived here for three years.".to_string()],
            mini_text: None,
            is_premium: true,
            order_index: 1,
            quiz_id: None,
        })
        .await?;

    // Reading texts
    let reading = ReadingTextRepository::new(pool.clone());
    reading
        .create(&CreateReadingTextRequest {
            title: "A Day at the Market".to_string(),
            level: LanguageLevel::A2,
            content: "Maria goes to the market every Saturday. She buys fresh vegetables \
                      and talks to the sellers she has known for years."
                .to_string(),
            is_premium: false,
            order_index: 0,
            quiz_id: None,
        })
        .await?;

    reading
        .create(&CreateReadingTextRequest {
            title: "The Night Train".to_string(),
            level: LanguageLevel::B2,
            content: "The night train to the coast was almost empty. Jonas chose a seat by \
                      the window and watched the city lights thin out into darkness."
                .to_string(),
            is_premium: true,
            order_index: 1,
            quiz_id: None,
        })
        .await?;

    info!("Seeding complete");
    Ok(())
}
