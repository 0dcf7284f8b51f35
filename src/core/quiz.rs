//! Quiz session - question generation, answer scoring, and phase transitions
//!
//! A session moves `Idle -> InProgress -> Finished` and back to `Idle` on
//! `reset`. All questions are generated up front when the quiz starts, so a
//! running session never touches the catalog again.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::distractors::build_options;
use super::scoring::QuizResult;
use crate::models::{Item, ItemId};

/// Session handle for hosts that drive a quiz from several threads
pub type SharedQuizSession = Arc<Mutex<QuizSession>>;

fn default_question_count() -> usize {
    5
}

fn default_options_per_question() -> usize {
    3
}

/// Caller-supplied quiz shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizConfig {
    /// Number of questions per session
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Options shown per question, correct answer included
    #[serde(default = "default_options_per_question")]
    pub options_per_question: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            options_per_question: default_options_per_question(),
        }
    }
}

impl QuizConfig {
    pub fn new(question_count: usize, options_per_question: usize) -> Self {
        Self {
            question_count,
            options_per_question,
        }
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        if self.question_count == 0 {
            return Err(QuizError::InvalidConfig(
                "questionCount must be at least 1".to_string(),
            ));
        }
        if self.options_per_question == 0 {
            return Err(QuizError::InvalidConfig(
                "optionsPerQuestion must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Smallest catalog that can back a session with this config
    pub fn required_catalog_size(&self) -> usize {
        self.question_count.max(self.options_per_question)
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Idle,
    InProgress,
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::InProgress => "in progress",
            Phase::Finished => "finished",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Quiz errors
///
/// `CatalogTooSmall` and `InvalidConfig` are runtime conditions a caller can
/// report to the user. The remaining variants mean the caller broke the
/// session contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("catalog too small: need at least {required} items, have {available}")]
    CatalogTooSmall { required: usize, available: usize },

    #[error("invalid quiz config: {0}")]
    InvalidConfig(String),

    #[error("{operation} is not allowed while the quiz is {phase}")]
    InvalidTransition {
        operation: &'static str,
        phase: Phase,
    },

    #[error("question {index} has not been answered yet")]
    QuestionNotAnswered { index: usize },
}

impl QuizError {
    /// True for errors caused by calling the session out of order
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            QuizError::InvalidTransition { .. } | QuizError::QuestionNotAnswered { .. }
        )
    }
}

/// One generated question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub correct_item: Item,
    /// Shuffled options, `correct_item` included exactly once
    pub options: Vec<Item>,
    pub user_answer_id: Option<ItemId>,
    pub is_correct: Option<bool>,
}

impl QuizQuestion {
    fn new(correct_item: Item, options: Vec<Item>) -> Self {
        Self {
            correct_item,
            options,
            user_answer_id: None,
            is_correct: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.user_answer_id.is_some()
    }

    /// Find an option by id
    pub fn option(&self, id: ItemId) -> Option<&Item> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Feedback for an answered question, `None` before an answer is given
    pub fn feedback(&self) -> Option<AnswerFeedback<'_>> {
        let answer = self.user_answer_id?;

        Some(AnswerFeedback {
            is_correct: self.is_correct.unwrap_or(false),
            correct_item: &self.correct_item,
            chosen_item: self.option(answer),
        })
    }
}

/// What the presentation shows after an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback<'a> {
    pub is_correct: bool,
    pub correct_item: &'a Item,
    /// `None` when the submitted id was not one of the options
    pub chosen_item: Option<&'a Item>,
}

/// A single quiz run
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    phase: Phase,
    questions: Vec<QuizQuestion>,
    current_index: usize,
    score: usize,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh session for shared use
    pub fn shared() -> SharedQuizSession {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Start a new quiz using the thread-local RNG
    pub fn start(&mut self, catalog: &[Item], config: QuizConfig) -> Result<(), QuizError> {
        self.start_with_rng(catalog, config, &mut rand::thread_rng())
    }

    /// Start a new quiz. Valid from `Idle` or `Finished`.
    ///
    /// On error the session is left exactly as it was.
    pub fn start_with_rng<R>(
        &mut self,
        catalog: &[Item],
        config: QuizConfig,
        rng: &mut R,
    ) -> Result<(), QuizError>
    where
        R: Rng + ?Sized,
    {
        if self.phase == Phase::InProgress {
            return Err(self.invalid_transition("start"));
        }

        config.validate()?;

        let required = config.required_catalog_size();
        if catalog.len() < required {
            tracing::debug!(
                "cannot start quiz: catalog has {} items, {} required",
                catalog.len(),
                required
            );
            return Err(QuizError::CatalogTooSmall {
                required,
                available: catalog.len(),
            });
        }

        let mut pool: Vec<&Item> = catalog.iter().collect();
        let (answers, _) = pool.partial_shuffle(rng, config.question_count);

        let questions: Vec<QuizQuestion> = answers
            .iter()
            .map(|correct| {
                let options = build_options(catalog, correct, config.options_per_question, rng);
                QuizQuestion::new((*correct).clone(), options)
            })
            .collect();

        self.questions = questions;
        self.current_index = 0;
        self.score = 0;
        self.phase = Phase::InProgress;

        tracing::debug!(
            "quiz started: {} questions, {} options each",
            config.question_count,
            config.options_per_question
        );

        Ok(())
    }

    /// Record an answer for the current question.
    ///
    /// A second call for the same question changes nothing and returns the
    /// recorded result. Ids that are not among the options count as wrong.
    pub fn submit_answer(&mut self, selected_id: ItemId) -> Result<&QuizQuestion, QuizError> {
        if self.phase != Phase::InProgress {
            return Err(self.invalid_transition("submit_answer"));
        }

        let index = self.current_index;
        if self.questions[index].is_answered() {
            tracing::debug!("question {} already answered, ignoring resubmission", index);
            return Ok(&self.questions[index]);
        }

        let question = &mut self.questions[index];
        let is_correct = selected_id == question.correct_item.id;
        question.user_answer_id = Some(selected_id);
        question.is_correct = Some(is_correct);

        if is_correct {
            self.score += 1;
        }

        tracing::debug!(
            "question {} answered with {}: {}",
            index,
            selected_id,
            if is_correct { "correct" } else { "wrong" }
        );

        Ok(&self.questions[index])
    }

    /// Move past the answered current question, finishing after the last one
    pub fn advance(&mut self) -> Result<Phase, QuizError> {
        if self.phase != Phase::InProgress {
            return Err(self.invalid_transition("advance"));
        }

        if !self.questions[self.current_index].is_answered() {
            tracing::warn!(
                "advance called before question {} was answered",
                self.current_index
            );
            return Err(QuizError::QuestionNotAnswered {
                index: self.current_index,
            });
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
        } else {
            self.phase = Phase::Finished;
            tracing::debug!("quiz finished with {}/{}", self.score, self.questions.len());
        }

        Ok(self.phase)
    }

    /// The question being asked, only while in progress
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.phase != Phase::InProgress {
            return None;
        }
        self.questions.get(self.current_index)
    }

    /// Score so far. `None` while idle.
    pub fn result(&self) -> Option<QuizResult> {
        match self.phase {
            Phase::Idle => None,
            Phase::InProgress | Phase::Finished => Some(QuizResult {
                score: self.score,
                question_count: self.questions.len(),
            }),
        }
    }

    /// `(current question number, total)` with a 1-based current number
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.current_question()
            .map(|_| (self.current_index + 1, self.questions.len()))
    }

    /// Whether advancing from here ends the quiz
    pub fn is_last_question(&self) -> bool {
        self.phase == Phase::InProgress && self.current_index + 1 >= self.questions.len()
    }

    /// Drop the session state and return to `Idle`
    pub fn reset(&mut self) {
        *self = Self::default();
        tracing::debug!("quiz reset");
    }

    fn invalid_transition(&self, operation: &'static str) -> QuizError {
        tracing::warn!("{} called while quiz is {}", operation, self.phase);
        QuizError::InvalidTransition {
            operation,
            phase: self.phase,
        }
    }
}
