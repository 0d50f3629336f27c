//! Repository implementations.

pub mod app_settings;
pub mod audio_asset;
pub mod auth;
pub mod grammar_category;
pub mod grammar_topic;
pub mod listening_exercise;
pub mod profile;
pub mod quiz;
pub mod quiz_attempt;
pub mod reading_text;
pub mod word_entry;

pub use app_settings::AppSettingsRepository;
pub use audio_asset::AudioAssetRepository;
pub use auth::AuthRepository;
pub use grammar_category::GrammarCategoryRepository;
pub use grammar_topic::GrammarTopicRepository;
pub use listening_exercise::ListeningExerciseRepository;
pub use profile::ProfileRepository;
pub use quiz::QuizRepository;
pub use quiz_attempt::QuizAttemptRepository;
pub use reading_text::ReadingTextRepository;
pub use word_entry::WordEntryRepository;
