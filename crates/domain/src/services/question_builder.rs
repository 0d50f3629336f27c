//! Question authoring operations and grading.
//!
//! Choice questions (`multiple_choice`, `true_false`) carry exactly one
//! correct option; `mark_option_correct` maintains that invariant by
//! clearing all siblings whenever one option is marked. Switching a
//! question's type reshapes its option set to what the new type requires.

use thiserror::Error;

use crate::models::quiz::{AnswerOption, Question, QuestionType, QuizResult, SubmittedAnswer};

/// Minimum option count for a multiple-choice question.
const MIN_CHOICE_OPTIONS: usize = 4;

/// Errors from authoring operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionEditError {
    #[error("Option index {0} is out of range")]
    OptionOutOfRange(usize),

    #[error("Fill-in-the-blank questions have no options")]
    NotAChoiceQuestion,
}

/// Marks one option as the correct answer and clears all of its siblings.
pub fn mark_option_correct(
    question: &mut Question,
    index: usize,
) -> Result<(), QuestionEditError> {
    if !question.question_type.has_options() {
        return Err(QuestionEditError::NotAChoiceQuestion);
    }
    if index >= question.options.len() {
        return Err(QuestionEditError::OptionOutOfRange(index));
    }

    for (i, option) in question.options.iter_mut().enumerate() {
        option.is_correct = i == index;
    }

    Ok(())
}

/// Switches the question's type, reshaping its answers:
///
/// - `true_false`: exactly two fixed-label options, none marked correct yet
/// - `multiple_choice`: existing options are kept (flags cleared) and padded
///   with blanks up to four
/// - `fill_blank`: options are dropped in favor of a freeform answer
pub fn set_question_type(question: &mut Question, new_type: QuestionType) {
    if question.question_type == new_type {
        return;
    }

    question.question_type = new_type;

    match new_type {
        QuestionType::TrueFalse => {
            question.options = vec![AnswerOption::labeled("True"), AnswerOption::labeled("False")];
            question.correct_answer = None;
        }
        QuestionType::MultipleChoice => {
            for option in &mut question.options {
                option.is_correct = false;
            }
            while question.options.len() < MIN_CHOICE_OPTIONS {
                question.options.push(AnswerOption::blank());
            }
            question.correct_answer = None;
        }
        QuestionType::FillBlank => {
            question.options.clear();
            question.correct_answer = Some(String::new());
        }
    }
}

/// Grades a single answer, returning the points earned (0 or the question's
/// point value).
///
/// Fill-in-the-blank answers are compared trimmed and case-insensitively.
pub fn grade_answer(question: &Question, answer: &SubmittedAnswer) -> i32 {
    let correct = match question.question_type {
        QuestionType::FillBlank => match (&question.correct_answer, &answer.answer_text) {
            (Some(expected), Some(given)) => {
                !expected.trim().is_empty()
                    && expected.trim().to_lowercase() == given.trim().to_lowercase()
            }
            _ => false,
        },
        QuestionType::MultipleChoice | QuestionType::TrueFalse => answer
            .selected_option
            .and_then(|i| question.options.get(i))
            .map(|o| o.is_correct)
            .unwrap_or(false),
    };

    if correct {
        question.points
    } else {
        0
    }
}

/// Grades a full submission against a quiz's questions.
///
/// Answers are matched to questions by id; unanswered questions score zero
/// but still count toward the maximum.
pub fn grade_submission(questions: &[Question], answers: &[SubmittedAnswer]) -> QuizResult {
    let mut score = 0;
    let mut correct_count = 0;

    for question in questions {
        let earned = answers
            .iter()
            .find(|a| a.question_id == question.id)
            .map(|a| grade_answer(question, a))
            .unwrap_or(0);

        if earned > 0 {
            correct_count += 1;
        }
        score += earned;
    }

    QuizResult {
        score,
        max_score: questions.iter().map(|q| q.points).sum(),
        correct_count,
        question_count: questions.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn choice_question(options: &[(&str, bool)]) -> Question {
        Question {
            id: Uuid::new_v4(),
            quiz_id: Uuid::new_v4(),
            text: "She ___ to school.".to_string(),
            question_type: QuestionType::MultipleChoice,
            options: options
                .iter()
                .map(|(text, is_correct)| AnswerOption {
                    text: text.to_string(),
                    is_correct: *is_correct,
                })
                .collect(),
            correct_answer: None,
            points: 1,
            order_index: 0,
        }
    }

    fn fill_blank_question(expected: &str) -> Question {
        Question {
            id: Uuid::new_v4(),
            quiz_id: Uuid::new_v4(),
            text: "The capital of France is ___.".to_string(),
            question_type: QuestionType::FillBlank,
            options: vec![],
            correct_answer: Some(expected.to_string()),
            points: 2,
            order_index: 0,
        }
    }

    fn answer_option(question: &Question, index: usize) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id: question.id,
            selected_option: Some(index),
            answer_text: None,
        }
    }

    #[test]
    fn test_marking_option_clears_siblings() {
        // A was correct; after marking B, exactly B is correct.
        let mut q = choice_question(&[("A", true), ("B", false), ("C", false), ("D", false)]);

        mark_option_correct(&mut q, 1).unwrap();

        let flags: Vec<bool> = q.options.iter().map(|o| o.is_correct).collect();
        assert_eq!(flags, vec![false, true, false, false]);
        assert_eq!(q.options.iter().filter(|o| o.is_correct).count(), 1);
    }

    #[test]
    fn test_marking_same_option_is_idempotent() {
        let mut q = choice_question(&[("A", true), ("B", false)]);
        mark_option_correct(&mut q, 0).unwrap();
        assert!(q.options[0].is_correct);
        assert_eq!(q.options.iter().filter(|o| o.is_correct).count(), 1);
    }

    #[test]
    fn test_marking_out_of_range_fails() {
        let mut q = choice_question(&[("A", false), ("B", false)]);
        assert_eq!(
            mark_option_correct(&mut q, 5),
            Err(QuestionEditError::OptionOutOfRange(5))
        );
    }

    #[test]
    fn test_marking_fill_blank_fails() {
        let mut q = fill_blank_question("Paris");
        assert_eq!(
            mark_option_correct(&mut q, 0),
            Err(QuestionEditError::NotAChoiceQuestion)
        );
    }

    #[test]
    fn test_switch_to_true_false_resets_to_two_options() {
        let mut q = choice_question(&[("A", true), ("B", false), ("C", false), ("D", false)]);

        set_question_type(&mut q, QuestionType::TrueFalse);

        assert_eq!(q.question_type, QuestionType::TrueFalse);
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.options[0].text, "True");
        assert_eq!(q.options[1].text, "False");
        assert!(q.options.iter().all(|o| !o.is_correct));
        assert_eq!(q.correct_answer, None);
    }

    #[test]
    fn test_switch_to_multiple_choice_pads_to_four() {
        let mut q = choice_question(&[("True", true), ("False", false)]);
        q.question_type = QuestionType::TrueFalse;

        set_question_type(&mut q, QuestionType::MultipleChoice);

        assert_eq!(q.options.len(), 4);
        // Kept options lose their correct flag; padding is blank.
        assert!(q.options.iter().all(|o| !o.is_correct));
        assert_eq!(q.options[2].text, "");
    }

    #[test]
    fn test_switch_to_fill_blank_clears_options() {
        let mut q = choice_question(&[("A", true), ("B", false)]);

        set_question_type(&mut q, QuestionType::FillBlank);

        assert!(q.options.is_empty());
        assert_eq!(q.correct_answer, Some(String::new()));
    }

    #[test]
    fn test_switch_to_same_type_is_a_no_op() {
        let mut q = choice_question(&[("A", true), ("B", false)]);
        let before = q.options.clone();

        set_question_type(&mut q, QuestionType::MultipleChoice);

        assert_eq!(q.options, before);
    }

    #[test]
    fn test_grade_choice_answer() {
        let q = choice_question(&[("go", false), ("goes", true)]);

        assert_eq!(grade_answer(&q, &answer_option(&q, 1)), 1);
        assert_eq!(grade_answer(&q, &answer_option(&q, 0)), 0);
        assert_eq!(grade_answer(&q, &answer_option(&q, 9)), 0);
    }

    #[test]
    fn test_grade_fill_blank_case_insensitive() {
        let q = fill_blank_question("Paris");
        let answer = |text: &str| SubmittedAnswer {
            question_id: q.id,
            selected_option: None,
            answer_text: Some(text.to_string()),
        };

        assert_eq!(grade_answer(&q, &answer("Paris")), 2);
        assert_eq!(grade_answer(&q, &answer("paris")), 2);
        assert_eq!(grade_answer(&q, &answer("  PARIS  ")), 2);
        assert_eq!(grade_answer(&q, &answer("Lyon")), 0);
        assert_eq!(grade_answer(&q, &answer("")), 0);
    }

    #[test]
    fn test_grade_fill_blank_with_blank_expected_answer_never_matches() {
        let q = fill_blank_question("  ");
        let answer = SubmittedAnswer {
            question_id: q.id,
            selected_option: None,
            answer_text: Some("".to_string()),
        };
        assert_eq!(grade_answer(&q, &answer), 0);
    }

    #[test]
    fn test_grade_submission_totals() {
        let q1 = choice_question(&[("go", false), ("goes", true)]);
        let q2 = fill_blank_question("Paris");
        let q3 = choice_question(&[("a", true), ("b", false)]);

        let answers = vec![
            answer_option(&q1, 1),
            SubmittedAnswer {
                question_id: q2.id,
                selected_option: None,
                answer_text: Some("paris".to_string()),
            },
            // q3 left unanswered
        ];

        let result = grade_submission(&[q1, q2, q3], &answers);
        assert_eq!(result.score, 3);
        assert_eq!(result.max_score, 4);
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.question_count, 3);
    }
}
