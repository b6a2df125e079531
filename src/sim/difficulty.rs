//! Accuracy-driven difficulty

use crate::consts::MIN_QUESTIONS_FOR_ADJUST;
use crate::settings::Difficulty;
use crate::sim::state::{Subject, User};

/// Tier for a player with `correct` right out of `total` answered
pub fn adjust_difficulty(correct: u32, total: u32) -> Difficulty {
    if total < MIN_QUESTIONS_FOR_ADJUST {
        return Difficulty::Easy;
    }

    // Integer comparison keeps the 0.8 / 0.6 boundaries exact
    let scaled = correct as u64 * 10;
    let total = total as u64;
    if scaled >= total * 8 {
        Difficulty::Hard
    } else if scaled >= total * 6 {
        Difficulty::Medium
    } else {
        Difficulty::Easy
    }
}

/// Tier across every subject (quiz)
pub fn overall_difficulty(user: &User) -> Difficulty {
    let (correct, total) = user.overall_counts();
    adjust_difficulty(correct, total)
}

/// Tier for one subject (keypad uses Mathematics)
pub fn subject_difficulty(user: &User, subject: Subject) -> Difficulty {
    user.progress_for(subject)
        .map(|p| adjust_difficulty(p.correct_answers, p.total_questions))
        .unwrap_or(Difficulty::Easy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::any;
    use proptest::{prop_assert_eq, proptest};

    #[test]
    fn test_thresholds() {
        assert_eq!(adjust_difficulty(8, 10), Difficulty::Hard);
        assert_eq!(adjust_difficulty(6, 10), Difficulty::Medium);
        assert_eq!(adjust_difficulty(3, 10), Difficulty::Easy);
        assert_eq!(adjust_difficulty(7, 10), Difficulty::Medium);
        assert_eq!(adjust_difficulty(5, 5), Difficulty::Hard);
        assert_eq!(adjust_difficulty(0, 0), Difficulty::Easy);
    }

    #[test]
    fn test_subject_and_overall() {
        let mut user = User::default();
        for _ in 0..10 {
            user.progress_entry(Subject::Mathematics).record(true);
        }
        for _ in 0..10 {
            user.progress_entry(Subject::LanguageArts).record(false);
        }
        assert_eq!(subject_difficulty(&user, Subject::Mathematics), Difficulty::Hard);
        assert_eq!(subject_difficulty(&user, Subject::GeneralKnowledge), Difficulty::Easy);
        assert_eq!(overall_difficulty(&user), Difficulty::Easy);
    }

    proptest! {
        #[test]
        fn prop_few_answers_is_easy(correct in any::<u32>(), total in 0u32..5) {
            prop_assert_eq!(adjust_difficulty(correct, total), Difficulty::Easy);
        }

        #[test]
        fn prop_idempotent(correct in 0u32..1000, total in 0u32..1000) {
            prop_assert_eq!(adjust_difficulty(correct, total), adjust_difficulty(correct, total));
        }
    }
}
