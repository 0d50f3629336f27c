//! Pure business logic services.

pub mod entitlement;
pub mod progress;
pub mod question_builder;
pub mod subscription;

pub use entitlement::{quiz_allowance, QuizAllowance};
pub use progress::{category_progress, CategoryProgress, TopicAttempt};
pub use question_builder::{
    grade_answer, grade_submission, mark_option_correct, set_question_type, QuestionEditError,
};
pub use subscription::{PremiumState, SubscriptionStatus};
