use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::model::ModuleId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("expected {expected} answers, got {got}")]
    AnswerCount { expected: usize, got: usize },

    #[error("question {question} expects a {expected} answer")]
    WrongAnswerKind {
        question: usize,
        expected: &'static str,
    },

    #[error("question {question} has no option {option}")]
    OptionOutOfRange { question: usize, option: usize },

    #[error("no quiz for module {0}")]
    UnknownQuiz(ModuleId),
}

//
// ─── QUESTIONS ─────────────────────────────────────────────────────────────────
//

/// How a question turns a selection into points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QuestionKind {
    /// One option is right; worth one point.
    SingleChoice { correct: usize },
    /// Worth one point when exactly the correct options are picked.
    ExactSet { correct: BTreeSet<usize> },
    /// One point per correct option picked. Picked traps are flagged, not penalised.
    EachCorrect {
        correct: BTreeSet<usize>,
        traps: BTreeSet<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub kind: QuestionKind,
}

impl Question {
    #[must_use]
    pub fn single(prompt: &str, options: &[&str], correct: usize) -> Self {
        Self::build(prompt, options, QuestionKind::SingleChoice { correct })
    }

    #[must_use]
    pub fn exact_set(prompt: &str, options: &[&str], correct: &[usize]) -> Self {
        Self::build(
            prompt,
            options,
            QuestionKind::ExactSet {
                correct: correct.iter().copied().collect(),
            },
        )
    }

    #[must_use]
    pub fn each_correct(prompt: &str, options: &[&str], correct: &[usize], traps: &[usize]) -> Self {
        Self::build(
            prompt,
            options,
            QuestionKind::EachCorrect {
                correct: correct.iter().copied().collect(),
                traps: traps.iter().copied().collect(),
            },
        )
    }

    fn build(prompt: &str, options: &[&str], kind: QuestionKind) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            kind,
        }
    }

    #[must_use]
    pub fn max_points(&self) -> u32 {
        match &self.kind {
            QuestionKind::SingleChoice { .. } | QuestionKind::ExactSet { .. } => 1,
            QuestionKind::EachCorrect { correct, .. } => {
                u32::try_from(correct.len()).unwrap_or(u32::MAX)
            }
        }
    }

    fn score(&self, index: usize, answer: &Answer) -> Result<QuestionFeedback, QuizError> {
        answer.check_range(index, self.options.len())?;

        let (points, traps_selected) = match (&self.kind, answer) {
            (QuestionKind::SingleChoice { correct }, Answer::Single(choice)) => {
                (u32::from(choice == correct), Vec::new())
            }
            (QuestionKind::ExactSet { correct }, Answer::Multi(picked)) => {
                (u32::from(picked == correct), Vec::new())
            }
            (QuestionKind::EachCorrect { correct, traps }, Answer::Multi(picked)) => {
                let hits = picked.intersection(correct).count();
                let flagged = picked.intersection(traps).copied().collect();
                (u32::try_from(hits).unwrap_or(u32::MAX), flagged)
            }
            (QuestionKind::SingleChoice { .. }, Answer::Multi(_)) => {
                return Err(QuizError::WrongAnswerKind {
                    question: index,
                    expected: "single-choice",
                });
            }
            (_, Answer::Single(_)) => {
                return Err(QuizError::WrongAnswerKind {
                    question: index,
                    expected: "multi-select",
                });
            }
        };

        Ok(QuestionFeedback {
            question: index,
            points,
            max_points: self.max_points(),
            traps_selected,
        })
    }
}

/// A learner's response to one question, by option index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Single(usize),
    Multi(BTreeSet<usize>),
}

impl Answer {
    #[must_use]
    pub fn multi(options: &[usize]) -> Self {
        Self::Multi(options.iter().copied().collect())
    }

    fn check_range(&self, question: usize, len: usize) -> Result<(), QuizError> {
        let out_of_range = match self {
            Answer::Single(choice) => (*choice >= len).then_some(*choice),
            Answer::Multi(picked) => picked.iter().copied().find(|&o| o >= len),
        };
        match out_of_range {
            Some(option) => Err(QuizError::OptionOutOfRange { question, option }),
            None => Ok(()),
        }
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// Knowledge check attached to a module. Passing it completes the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quiz {
    pub module: ModuleId,
    pub title: String,
    pub questions: Vec<Question>,
    pub pass_mark: u32,
    /// Score from which a failed attempt still counts as close.
    pub encourage_mark: Option<u32>,
}

impl Quiz {
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(Question::max_points).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Passed,
    Close,
    KeepLearning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionFeedback {
    pub question: usize,
    pub points: u32,
    pub max_points: u32,
    pub traps_selected: Vec<usize>,
}

impl QuestionFeedback {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.points == self.max_points && self.traps_selected.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
    pub score: u32,
    pub max_score: u32,
    pub verdict: Verdict,
    pub feedback: Vec<QuestionFeedback>,
}

impl QuizOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Passed
    }
}

/// Scores `answers` (one per question, in order) against `quiz`.
///
/// # Errors
///
/// Returns `QuizError` if the answer count, an answer's kind, or an option index
/// does not fit the quiz.
pub fn grade(quiz: &Quiz, answers: &[Answer]) -> Result<QuizOutcome, QuizError> {
    if answers.len() != quiz.questions.len() {
        return Err(QuizError::AnswerCount {
            expected: quiz.questions.len(),
            got: answers.len(),
        });
    }

    let feedback = quiz
        .questions
        .iter()
        .zip(answers)
        .enumerate()
        .map(|(i, (question, answer))| question.score(i, answer))
        .collect::<Result<Vec<_>, _>>()?;

    let score = feedback.iter().map(|f| f.points).sum();
    let verdict = if score >= quiz.pass_mark {
        Verdict::Passed
    } else if quiz.encourage_mark.is_some_and(|mark| score >= mark) {
        Verdict::Close
    } else {
        Verdict::KeepLearning
    };

    Ok(QuizOutcome {
        score,
        max_score: quiz.max_score(),
        verdict,
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange_quiz() -> Quiz {
        Quiz {
            module: ModuleId::new("stock-exchanges").unwrap(),
            title: "Exchange Knowledge Check".into(),
            questions: vec![
                Question::single(
                    "In the mall analogy, what do the individual shops represent?",
                    &["Stock exchanges", "Companies listed on the exchange", "Investors", "Brokers"],
                    1,
                ),
                Question::exact_set(
                    "Which of these are major stock exchanges?",
                    &["NYSE", "NASDAQ", "BSE", "NSE", "McDonald's", "Apple Store"],
                    &[0, 1, 2, 3],
                ),
            ],
            pass_mark: 2,
            encourage_mark: Some(1),
        }
    }

    fn going_public_quiz() -> Quiz {
        Quiz {
            module: ModuleId::new("why-companies-go-public").unwrap(),
            title: "Test Your Understanding".into(),
            questions: vec![Question::each_correct(
                "Select all correct reasons:",
                &["expand", "debt", "acquire", "avoid taxes", "exit", "visibility"],
                &[0, 1, 2, 4, 5],
                &[3],
            )],
            pass_mark: 4,
            encourage_mark: Some(2),
        }
    }

    #[test]
    fn all_correct_passes() {
        let outcome = grade(
            &exchange_quiz(),
            &[Answer::Single(1), Answer::multi(&[0, 1, 2, 3])],
        )
        .unwrap();

        assert_eq!(outcome.score, 2);
        assert_eq!(outcome.max_score, 2);
        assert!(outcome.passed());
        assert!(outcome.feedback.iter().all(QuestionFeedback::is_correct));
    }

    #[test]
    fn exact_set_fails_with_a_distractor() {
        let outcome = grade(
            &exchange_quiz(),
            &[Answer::Single(1), Answer::multi(&[0, 1, 2, 3, 4])],
        )
        .unwrap();

        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.verdict, Verdict::Close);
        assert!(!outcome.feedback[1].is_correct());
    }

    #[test]
    fn zero_score_means_keep_learning() {
        let outcome = grade(&exchange_quiz(), &[Answer::Single(0), Answer::multi(&[])]).unwrap();
        assert_eq!(outcome.verdict, Verdict::KeepLearning);
    }

    #[test]
    fn each_correct_counts_hits_and_flags_traps() {
        let outcome = grade(&going_public_quiz(), &[Answer::multi(&[0, 1, 3, 4, 5])]).unwrap();

        assert_eq!(outcome.max_score, 5);
        assert_eq!(outcome.score, 4);
        assert!(outcome.passed());
        assert_eq!(outcome.feedback[0].traps_selected, vec![3]);
        assert!(!outcome.feedback[0].is_correct());
    }

    #[test]
    fn answer_count_must_match() {
        assert_eq!(
            grade(&exchange_quiz(), &[Answer::Single(1)]),
            Err(QuizError::AnswerCount { expected: 2, got: 1 })
        );
    }

    #[test]
    fn answer_kind_must_match() {
        assert_eq!(
            grade(&exchange_quiz(), &[Answer::multi(&[1]), Answer::multi(&[0])]),
            Err(QuizError::WrongAnswerKind {
                question: 0,
                expected: "single-choice"
            })
        );
        assert_eq!(
            grade(&exchange_quiz(), &[Answer::Single(1), Answer::Single(0)]),
            Err(QuizError::WrongAnswerKind {
                question: 1,
                expected: "multi-select"
            })
        );
    }

    #[test]
    fn options_must_exist() {
        assert_eq!(
            grade(&exchange_quiz(), &[Answer::Single(4), Answer::multi(&[0])]),
            Err(QuizError::OptionOutOfRange { question: 0, option: 4 })
        );
        assert_eq!(
            grade(&exchange_quiz(), &[Answer::Single(1), Answer::multi(&[0, 6])]),
            Err(QuizError::OptionOutOfRange { question: 1, option: 6 })
        );
    }
}
