//! Progress summary and the printable report

use std::fmt::Write;

use serde::Serialize;

use crate::sim::{GameState, Subject};

/// Rounded percentage, 0 when nothing was answered
fn percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as u32
    }
}

fn subject_icon(subject: Subject) -> &'static str {
    match subject {
        Subject::Mathematics => "🔢",
        Subject::LanguageArts => "📝",
        Subject::ProblemSolving => "🧩",
        Subject::GeneralKnowledge => "📚",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectLine {
    pub subject: Subject,
    pub icon: &'static str,
    pub level: u32,
    pub progress: u32,
    pub accuracy: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub name: String,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub stars: u32,
    pub coins: u32,
    pub badges: u32,
    pub games_played: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub accuracy: u32,
    pub subjects: Vec<SubjectLine>,
    /// (emoji, name, earned day)
    pub badge_list: Vec<(String, String, Option<String>)>,
}

impl ProgressReport {
    pub fn new(state: &GameState) -> Self {
        let user = &state.user;
        let (correct, total) = user.overall_counts();
        Self {
            name: user.name.clone(),
            level: user.level,
            xp: user.xp,
            xp_to_next_level: crate::xp_for_next_level(user.xp) - user.xp,
            stars: user.stars,
            coins: user.coins,
            badges: state.badge_count(),
            games_played: user.total_games_played,
            correct_answers: correct,
            total_questions: total,
            accuracy: percent(correct, total),
            subjects: user
                .progress
                .iter()
                .map(|p| SubjectLine {
                    subject: p.subject,
                    icon: subject_icon(p.subject),
                    level: p.level,
                    progress: p.progress,
                    accuracy: percent(p.correct_answers, p.total_questions),
                })
                .collect(),
            badge_list: user
                .badges
                .iter()
                .map(|b| {
                    let day = b.earned_date.map(|d| d.format("%Y-%m-%d").to_string());
                    (b.emoji.clone(), b.name.clone(), day)
                })
                .collect(),
        }
    }

    /// Plain-text report for printing
    pub fn printable(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "LearnQuest Progress Report");
        let _ = writeln!(out, "{} - Level {}", self.name, self.level);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "XP: {} ({} to next level)",
            self.xp, self.xp_to_next_level
        );
        let _ = writeln!(out, "Stars: {}", self.stars);
        let _ = writeln!(out, "Badges: {}", self.badges);
        let _ = writeln!(out, "Games played: {}", self.games_played);
        let _ = writeln!(
            out,
            "Accuracy: {}% ({} correct out of {} questions)",
            self.accuracy, self.correct_answers, self.total_questions
        );

        let _ = writeln!(out);
        let _ = writeln!(out, "Badges earned:");
        if self.badge_list.is_empty() {
            let _ = writeln!(out, "  none yet - keep playing!");
        }
        for (emoji, name, day) in &self.badge_list {
            match day {
                Some(day) => {
                    let _ = writeln!(out, "  {} {} ({})", emoji, name, day);
                }
                None => {
                    let _ = writeln!(out, "  {} {}", emoji, name);
                }
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Subjects:");
        for s in &self.subjects {
            let _ = writeln!(
                out,
                "  {} {}: Level {} - {}% accuracy",
                s.icon,
                s.subject.as_str(),
                s.level,
                s.accuracy
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_report() {
        let report = ProgressReport::new(&GameState::default());
        assert_eq!(report.accuracy, 0);
        assert_eq!(report.xp_to_next_level, 1500);
        assert_eq!(report.subjects.len(), 3);
        assert!(report.printable().contains("none yet"));
    }

    #[test]
    fn test_accuracy_rounds() {
        let mut state = GameState::default();
        let math = state.user.progress_entry(Subject::Mathematics);
        math.correct_answers = 2;
        math.total_questions = 3;
        math.recompute();
        state.user.xp = 1600;

        let report = ProgressReport::new(&state);
        assert_eq!(report.accuracy, 67);
        assert_eq!(report.subjects[0].accuracy, 67);
        assert_eq!(report.xp_to_next_level, 1400);
        let text = report.printable();
        assert!(text.contains("Mathematics: Level 1 - 67% accuracy"), "{}", text);
        assert!(text.contains("2 correct out of 3 questions"));
    }
}
