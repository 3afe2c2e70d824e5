//! End-of-session reporting
//!
//! The session hands its summary to a `ResultsSink` once per finished game.
//! Sinks persist or transmit opportunistically; whatever goes wrong is
//! logged by the session and never touches game state.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::sim::SessionSummary;

/// Why a result could not be delivered
#[derive(Debug)]
pub enum ResultsError {
    /// No player identity was available, nothing was sent.
    MissingUser,
    /// The payload could not be encoded.
    Encode(String),
    /// Local persistence failed.
    Storage(String),
    /// The remote endpoint rejected or never received the payload.
    Transport(String),
}

impl fmt::Display for ResultsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultsError::MissingUser => write!(f, "No user_id available, result not submitted"),
            ResultsError::Encode(msg) => write!(f, "Failed to encode result: {msg}"),
            ResultsError::Storage(msg) => write!(f, "Failed to store result locally: {msg}"),
            ResultsError::Transport(msg) => write!(f, "Failed to submit result: {msg}"),
        }
    }
}

impl std::error::Error for ResultsError {}

impl From<serde_json::Error> for ResultsError {
    fn from(err: serde_json::Error) -> Self {
        ResultsError::Encode(err.to_string())
    }
}

/// Receiver of finished sessions
pub trait ResultsSink {
    fn submit(&mut self, summary: &SessionSummary) -> Result<(), ResultsError>;
}

/// Attempt payload sent to the results endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub user_id: u32,
    pub game_id: u32,
    /// Points earned, negative totals reported as zero
    pub correct_challenges: i64,
    /// Points a perfect session would have earned
    pub total_challenges: i64,
    /// Seconds played
    pub time_spent: u32,
}

impl AttemptRecord {
    pub fn new(user_id: u32, game_id: u32, summary: &SessionSummary) -> Self {
        Self {
            user_id,
            game_id,
            correct_challenges: summary.score.max(0),
            total_challenges: summary.max_obtainable,
            time_spent: summary.total_time_secs,
        }
    }

    pub fn to_json(&self) -> Result<String, ResultsError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Extract `user_id` from a URL query string (`?user_id=42&x=y`)
pub fn user_id_from_query(query: &str) -> Option<u32> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "user_id")
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// Sink that only writes the summary to the log
#[derive(Debug, Default)]
pub struct LogSink;

impl ResultsSink for LogSink {
    fn submit(&mut self, summary: &SessionSummary) -> Result<(), ResultsError> {
        log::info!(
            "Session result: score {} / {} in {}s ({:?})",
            summary.score,
            summary.max_obtainable,
            summary.total_time_secs,
            summary.outcome
        );
        Ok(())
    }
}

/// Sink keeping every summary in memory; clones share the same list
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    submitted: Rc<RefCell<Vec<SessionSummary>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> Vec<SessionSummary> {
        self.submitted.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.submitted.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.submitted.borrow().is_empty()
    }
}

impl ResultsSink for MemorySink {
    fn submit(&mut self, summary: &SessionSummary) -> Result<(), ResultsError> {
        self.submitted.borrow_mut().push(summary.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EndReason, Outcome};

    fn summary(score: i64) -> SessionSummary {
        SessionSummary {
            score,
            outcome: Outcome::Defeat,
            reason: EndReason::Exhausted,
            total_time_secs: 42,
            max_obtainable: 120,
            victory_threshold: 60,
            words_total: 12,
            correct_count: 0,
            incorrect_count: 12,
        }
    }

    #[test]
    fn test_attempt_record_payload() {
        let record = AttemptRecord::new(5, 7, &summary(30));
        let json = record.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"user_id":5,"game_id":7,"correct_challenges":30,"total_challenges":120,"time_spent":42}"#
        );
    }

    #[test]
    fn test_negative_score_reported_as_zero() {
        let record = AttemptRecord::new(5, 7, &summary(-20));
        assert_eq!(record.correct_challenges, 0);
    }

    #[test]
    fn test_user_id_from_query() {
        assert_eq!(user_id_from_query("?user_id=42"), Some(42));
        assert_eq!(user_id_from_query("lang=es&user_id=7"), Some(7));
        assert_eq!(user_id_from_query("?user_id=abc"), None);
        assert_eq!(user_id_from_query("?uid=3"), None);
        assert_eq!(user_id_from_query(""), None);
    }

    #[test]
    fn test_memory_sink_clones_share_storage() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();
        writer.submit(&summary(10)).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.submitted()[0].score, 10);
    }
}
