//! # Quiz State
//!
//! Local interaction state for one topic's "Quick Check" question.
//!
//! ```text
//!            choose(i)                    choose(i)
//!           ┌────────┐                   ┌────────┐
//!           ▼        │      submit()     ▼        │
//!      Unanswered ───┴──────────────▶ Answered ───┘
//!           ▲  submit() w/o choice          │
//!           └── (NeedSelection) ◀── reset() ┘
//! ```
//!
//! The `QuizSpec` it is graded against is passed in as a prop on `submit`, so the
//! state never holds a copy of the content.

use crate::core::content::QuizSpec;

/// Options are chosen with the digit keys `1`-`9`, so a quiz offers at most nine.
pub const MAX_OPTIONS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Unanswered,
    Answered,
}

/// Feedback shown under the options after a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    NeedSelection,
    Correct,
    Incorrect { answer: String },
}

impl Feedback {
    pub fn message(&self) -> String {
        match self {
            Feedback::NeedSelection => "Please select an option.".to_string(),
            Feedback::Correct => "Correct! 🎉".to_string(),
            Feedback::Incorrect { answer } => {
                format!("Incorrect. The correct answer is: {answer}")
            }
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizState {
    selected: Option<usize>,
    feedback: Option<Feedback>,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn phase(&self) -> QuizPhase {
        match self.feedback {
            Some(Feedback::Correct | Feedback::Incorrect { .. }) => QuizPhase::Answered,
            Some(Feedback::NeedSelection) | None => QuizPhase::Unanswered,
        }
    }

    /// Select an option by index. Out-of-range indices are ignored.
    pub fn choose(&mut self, spec: &QuizSpec, index: usize) {
        if index < spec.options.len() {
            self.selected = Some(index);
        }
    }

    /// Grade the current selection against `spec.answer` (exact string match).
    pub fn submit(&mut self, spec: &QuizSpec) -> &Feedback {
        let feedback = match self.selected.and_then(|i| spec.options.get(i)) {
            None => Feedback::NeedSelection,
            Some(option) if *option == spec.answer => Feedback::Correct,
            Some(_) => Feedback::Incorrect {
                answer: spec.answer.clone(),
            },
        };
        self.feedback.insert(feedback)
    }

    pub fn reset(&mut self) {
        self.selected = None;
        self.feedback = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> QuizSpec {
        QuizSpec {
            prompt: "Which keyword is used to implement inheritance in Java?".to_string(),
            options: vec![
                "implements".to_string(),
                "inherits".to_string(),
                "extends".to_string(),
                "uses".to_string(),
            ],
            answer: "extends".to_string(),
        }
    }

    #[test]
    fn submit_without_choice_asks_for_selection() {
        let mut quiz = QuizState::new();
        let feedback = quiz.submit(&spec()).clone();
        assert_eq!(feedback, Feedback::NeedSelection);
        assert_eq!(feedback.message(), "Please select an option.");
        assert_eq!(quiz.selected(), None);
        assert_eq!(quiz.phase(), QuizPhase::Unanswered);
    }

    #[test]
    fn correct_choice_succeeds() {
        let mut quiz = QuizState::new();
        quiz.choose(&spec(), 2);
        assert_eq!(quiz.submit(&spec()), &Feedback::Correct);
        assert!(quiz.feedback().unwrap().message().starts_with("Correct!"));
        assert_eq!(quiz.phase(), QuizPhase::Answered);
    }

    #[test]
    fn wrong_choice_reveals_answer() {
        let mut quiz = QuizState::new();
        quiz.choose(&spec(), 0);
        let message = quiz.submit(&spec()).message();
        assert!(message.contains("extends"), "got {message:?}");
        assert_eq!(quiz.phase(), QuizPhase::Answered);
    }

    #[test]
    fn choose_keeps_feedback() {
        let mut quiz = QuizState::new();
        quiz.choose(&spec(), 0);
        quiz.submit(&spec());
        quiz.choose(&spec(), 2);
        assert_eq!(quiz.selected(), Some(2));
        assert!(matches!(quiz.feedback(), Some(Feedback::Incorrect { .. })));
    }

    #[test]
    fn choose_out_of_range_is_ignored() {
        let mut quiz = QuizState::new();
        quiz.choose(&spec(), 9);
        assert_eq!(quiz.selected(), None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut quiz = QuizState::new();
        quiz.choose(&spec(), 1);
        quiz.submit(&spec());
        quiz.reset();
        assert_eq!(quiz.selected(), None);
        assert_eq!(quiz.feedback(), None);
        assert_eq!(quiz.phase(), QuizPhase::Unanswered);
    }

    #[test]
    fn duplicate_options_compare_by_text() {
        let spec = QuizSpec {
            prompt: "Pick".to_string(),
            options: vec!["same".to_string(), "same".to_string()],
            answer: "same".to_string(),
        };
        let mut quiz = QuizState::new();
        quiz.choose(&spec, 1);
        assert!(quiz.submit(&spec).is_correct());
    }
}
