//! Database entity definitions (row mappings).

pub mod audio_asset;
pub mod grammar;
pub mod listening;
pub mod profile;
pub mod quiz;
pub mod reading;
pub mod settings;
pub mod vocabulary;

pub use audio_asset::AudioAssetEntity;
pub use grammar::{GrammarCategoryEntity, GrammarTopicEntity};
pub use listening::ListeningExerciseEntity;
pub use profile::{
    OAuthAccountEntity, PasswordResetTokenEntity, ProfileEntity, UserSessionEntity,
};
pub use quiz::{CategoryAttemptRow, QuestionEntity, QuizAttemptEntity, QuizEntity};
pub use reading::ReadingTextEntity;
pub use settings::AppSettingsEntity;
pub use vocabulary::WordEntryEntity;
