//! HUD text
//!
//! Strings the presentation layer drops into the score/timer displays,
//! feedback pop-ups and the end screen.

use serde::Serialize;

use crate::highscores::HighScoreEntry;
use crate::sim::{Outcome, SessionSummary};

pub fn score_label(score: i64) -> String {
    format!("Points: {score}")
}

pub fn timer_label(remaining: u32) -> String {
    format!("Time: {remaining}s")
}

pub fn final_score_label(score: i64) -> String {
    format!("Final score: {score}")
}

/// Pop-up shown where a word was placed: "+10", "0", "-5"
pub fn feedback_label(points: i32) -> String {
    if points > 0 {
        format!("+{points}")
    } else {
        points.to_string()
    }
}

/// Start screen duration line
pub fn duration_label(duration_seconds: u32) -> String {
    format!("{duration_seconds} Seconds")
}

/// Start screen record line
pub fn record_label(best: Option<&HighScoreEntry>) -> String {
    match best {
        Some(entry) => format!("{} Points", entry.score),
        None => "No record yet".to_string(),
    }
}

/// End screen headline, icon and style class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndScreen {
    pub title: &'static str,
    pub icon: &'static str,
    pub class: &'static str,
}

pub fn end_screen(outcome: Outcome) -> EndScreen {
    match outcome {
        Outcome::Victory => EndScreen {
            title: "Flawless Victory!",
            icon: "🏅",
            class: "text-green-400",
        },
        Outcome::Timeout => EndScreen {
            title: "Time's Up!",
            icon: "⌛",
            class: "text-red-400",
        },
        Outcome::Defeat => EndScreen {
            title: "Nice try, keep practicing!",
            icon: "📚",
            class: "text-yellow-400",
        },
    }
}

/// Everything the results screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndView {
    #[serde(flatten)]
    pub screen: EndScreen,
    pub final_score: String,
    pub time_spent: String,
}

pub fn end_view(summary: &SessionSummary) -> EndView {
    EndView {
        screen: end_screen(summary.outcome),
        final_score: final_score_label(summary.score),
        time_spent: timer_label(summary.total_time_secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_label_signs() {
        assert_eq!(feedback_label(10), "+10");
        assert_eq!(feedback_label(0), "0");
        assert_eq!(feedback_label(-5), "-5");
    }

    #[test]
    fn test_end_screens_are_distinct() {
        let titles: Vec<_> = [Outcome::Victory, Outcome::Timeout, Outcome::Defeat]
            .into_iter()
            .map(|o| end_screen(o).title)
            .collect();
        assert_eq!(titles.len(), 3);
        assert_ne!(titles[0], titles[1]);
        assert_ne!(titles[1], titles[2]);
    }

    #[test]
    fn test_running_labels() {
        assert_eq!(score_label(40), "Points: 40");
        assert_eq!(timer_label(9), "Time: 9s");
    }

    #[test]
    fn test_end_view_json() {
        let summary = SessionSummary {
            score: 70,
            outcome: Outcome::Victory,
            reason: crate::sim::EndReason::Exhausted,
            total_time_secs: 25,
            max_obtainable: 120,
            victory_threshold: 60,
            words_total: 12,
            correct_count: 7,
            incorrect_count: 5,
        };
        let view = end_view(&summary);
        assert_eq!(view.screen, end_screen(Outcome::Victory));
        assert_eq!(view.final_score, "Final score: 70");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["title"], "Flawless Victory!");
        assert_eq!(json["class"], "text-green-400");
        assert_eq!(json["time_spent"], "Time: 25s");
    }

    #[test]
    fn test_record_label() {
        assert_eq!(record_label(None), "No record yet");
        let entry = HighScoreEntry {
            score: 90,
            outcome: Outcome::Victory,
            time_spent: 40,
            timestamp: 0.0,
        };
        assert_eq!(record_label(Some(&entry)), "90 Points");
    }
}
