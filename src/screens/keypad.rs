//! Equation keypad: type the value of `x`

use rand::Rng;

use super::{Effects, Feedback, TimerEvent};
use crate::content::{KeypadEquation, generate_keypad_equation};
use crate::sim::{Action, GameState, Subject, subject_difficulty};
use crate::tuning::Tuning;

/// Longest accepted answer, in digits
const MAX_DIGITS: usize = 6;

#[derive(Debug, Clone)]
pub struct KeypadSession {
    rounds: u32,
    feedback_ms: u64,
    equation: KeypadEquation,
    input: String,
    answered: u32,
    correct: u32,
    feedback: Option<Feedback>,
    complete: bool,
}

fn draw<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> KeypadEquation {
    generate_keypad_equation(subject_difficulty(&state.user, Subject::Mathematics), rng)
}

impl KeypadSession {
    pub fn new<R: Rng + ?Sized>(state: &GameState, tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            rounds: tuning.keypad_rounds.max(1),
            feedback_ms: tuning.keypad_feedback_ms,
            equation: draw(state, rng),
            input: String::new(),
            answered: 0,
            correct: 0,
            feedback: None,
            complete: false,
        }
    }

    pub fn equation(&self) -> &KeypadEquation {
        &self.equation
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// (correct, answered)
    pub fn score(&self) -> (u32, u32) {
        (self.correct, self.answered)
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn accepting(&self) -> bool {
        !self.complete && self.feedback.is_none()
    }

    pub fn press_digit(&mut self, digit: u8) {
        let digits = self.input.trim_start_matches('-').len();
        if self.accepting() && digit <= 9 && digits < MAX_DIGITS {
            self.input.push(char::from(b'0' + digit));
        }
    }

    /// Toggle the sign; only valid before the first digit
    pub fn press_minus(&mut self) {
        if !self.accepting() {
            return;
        }
        if self.input == "-" {
            self.input.clear();
        } else if self.input.is_empty() {
            self.input.push('-');
        }
    }

    pub fn backspace(&mut self) {
        if self.accepting() {
            self.input.pop();
        }
    }

    pub fn clear_input(&mut self) {
        if self.accepting() {
            self.input.clear();
        }
    }

    /// Replace the buffer with typed text, keeping only what the keypad allows
    pub fn set_input(&mut self, text: &str) {
        if !self.accepting() {
            return;
        }
        self.input.clear();
        let text = text.trim();
        if text.starts_with('-') {
            self.input.push('-');
        }
        for d in text.chars().filter_map(|c| c.to_digit(10)).take(MAX_DIGITS) {
            self.input.push(char::from(b'0' + d as u8));
        }
    }

    /// Check the buffer; an empty buffer does nothing
    pub fn submit(&mut self) -> Effects {
        if !self.accepting() {
            return Effects::none();
        }
        let Ok(guess) = self.input.parse::<i64>() else {
            return Effects::none();
        };

        let eq = &self.equation;
        let correct = eq.is_correct(guess);
        self.answered += 1;
        let message = if correct {
            self.correct += 1;
            format!(
                "Excellent! You earned {} coins and {} XP!",
                eq.coin_reward, eq.xp_reward
            )
        } else {
            format!(
                "Not quite! The correct answer was {}. Keep trying!",
                eq.answer
            )
        };
        let action = Action::RecordAnswer {
            subject: Subject::Mathematics,
            correct,
            xp: eq.xp_reward,
            coins: eq.coin_reward,
        };
        self.feedback = Some(Feedback { correct, message });

        Effects::none()
            .dispatch(action)
            .after(self.feedback_ms, TimerEvent::NextEquation)
    }

    /// Feedback window over: next equation, or finish
    pub fn advance<R: Rng + ?Sized>(&mut self, state: &GameState, rng: &mut R) -> Effects {
        if self.complete || self.feedback.is_none() {
            return Effects::none();
        }
        self.feedback = None;
        self.input.clear();

        if self.answered >= self.rounds {
            self.complete = true;
            log::info!("Keypad complete: {}", self.summary());
            return Effects::none().dispatch(Action::FinishGame);
        }
        self.equation = draw(state, rng);
        Effects::none()
    }

    pub fn summary(&self) -> String {
        format!(
            "You answered {} out of {} correctly.",
            self.correct, self.rounds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session() -> (KeypadSession, GameState, Pcg32) {
        let state = GameState::default();
        let mut rng = Pcg32::seed_from_u64(21);
        let keypad = KeypadSession::new(&state, &Tuning::default(), &mut rng);
        (keypad, state, rng)
    }

    fn type_number(keypad: &mut KeypadSession, n: i64) {
        if n < 0 {
            keypad.press_minus();
        }
        for c in n.unsigned_abs().to_string().bytes() {
            keypad.press_digit(c - b'0');
        }
    }

    #[test]
    fn test_empty_buffer_ignored() {
        let (mut keypad, _, _) = session();
        assert!(keypad.submit().is_empty());
        keypad.press_minus();
        assert!(keypad.submit().is_empty());
        assert_eq!(keypad.score(), (0, 0));
    }

    #[test]
    fn test_correct_answer_scores_math() {
        let (mut keypad, _, _) = session();
        let answer = keypad.equation().answer;
        type_number(&mut keypad, answer);
        let fx = keypad.submit();
        assert_eq!(
            fx.actions,
            vec![Action::RecordAnswer {
                subject: Subject::Mathematics,
                correct: true,
                xp: 75,
                coins: 15
            }]
        );
        assert_eq!(fx.deferred.map(|d| d.event), Some(TimerEvent::NextEquation));
        assert_eq!(keypad.score(), (1, 1));
    }

    #[test]
    fn test_input_editing() {
        let (mut keypad, _, _) = session();
        keypad.press_minus();
        keypad.press_digit(4);
        keypad.press_minus();
        keypad.press_digit(2);
        assert_eq!(keypad.input(), "-42");
        keypad.backspace();
        assert_eq!(keypad.input(), "-4");
        keypad.set_input(" 1a2b3 ");
        assert_eq!(keypad.input(), "123");
        keypad.press_digit(10);
        assert_eq!(keypad.input(), "123");
        keypad.clear_input();
        assert_eq!(keypad.input(), "");
    }

    #[test]
    fn test_input_frozen_during_feedback() {
        let (mut keypad, state, mut rng) = session();
        keypad.press_digit(0);
        keypad.submit();
        keypad.press_digit(7);
        assert_eq!(keypad.input(), "0");
        keypad.advance(&state, &mut rng);
        assert_eq!(keypad.input(), "");
    }

    #[test]
    fn test_finishes_after_rounds() {
        let (mut keypad, state, mut rng) = session();
        let mut finished = 0;
        for _ in 0..10 {
            let answer = keypad.equation().answer;
            type_number(&mut keypad, answer);
            keypad.submit();
            finished += keypad
                .advance(&state, &mut rng)
                .actions
                .iter()
                .filter(|a| matches!(a, Action::FinishGame))
                .count();
        }
        assert_eq!(finished, 1);
        assert!(keypad.is_complete());
        assert_eq!(keypad.summary(), "You answered 10 out of 10 correctly.");
    }
}
