//! Domain models and request/response types.

pub mod grammar;
pub mod level;
pub mod listening;
pub mod profile;
pub mod quiz;
pub mod reading;
pub mod settings;
pub mod vocabulary;

pub use grammar::{
    CategoryListQuery, CreateGrammarCategoryRequest, CreateGrammarTopicRequest, GrammarCategory,
    GrammarTopic, TopicListQuery, UpdateGrammarCategoryRequest, UpdateGrammarTopicRequest,
};
pub use level::LanguageLevel;
pub use listening::{
    CreateListeningExerciseRequest, ListeningExercise, ListeningListQuery,
    UpdateListeningExerciseRequest,
};
pub use profile::{
    AdminUpdateUserRequest, GrantPremiumRequest, Profile, UpdateProfileRequest, UserListQuery,
};
pub use quiz::{
    AnswerOption, CreateQuestionRequest, CreateQuizRequest, Question, QuestionType, QuestionView,
    Quiz, QuizResult, QuizSubmission, QuizView, SubmittedAnswer, UpdateQuestionRequest,
};
pub use reading::{
    CreateReadingTextRequest, ReadingListQuery, ReadingText, UpdateReadingTextRequest,
};
pub use settings::{AppSettings, UpdateAppSettingsRequest};
pub use vocabulary::{
    CreateWordEntryRequest, UpdateWordEntryRequest, VocabularyListQuery, WordEntry,
};
