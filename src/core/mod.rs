//! Core quiz engine and notification plumbing

pub mod bus;
pub mod distractors;
pub mod quiz;
pub mod scoring;

pub use bus::{Notification, NotificationBus, Subscription, Topic};
pub use distractors::build_options;
pub use quiz::{
    AnswerFeedback, Phase, QuizConfig, QuizError, QuizQuestion, QuizSession, SharedQuizSession,
};
pub use scoring::{QuizResult, ScoreTier, MID_TIER_THRESHOLD, TOP_TIER_THRESHOLD};
