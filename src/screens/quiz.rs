//! Multiple-choice quiz: a fixed number of questions per game

use rand::Rng;
use rand::seq::IndexedRandom;

use super::{Effects, Feedback, TimerEvent};
use crate::content::{QuizQuestion, generate_quiz_question};
use crate::sim::{Action, GameState, Subject, overall_difficulty};
use crate::tuning::Tuning;

/// Subjects the quiz draws from
pub const QUIZ_SUBJECTS: [Subject; 3] = [
    Subject::Mathematics,
    Subject::LanguageArts,
    Subject::GeneralKnowledge,
];

#[derive(Debug, Clone)]
pub struct QuizSession {
    rounds: u32,
    feedback_ms: u64,
    /// 1-based number of the question on screen
    number: u32,
    score: u32,
    question: QuizQuestion,
    selected: Option<usize>,
    feedback: Option<Feedback>,
    complete: bool,
}

fn draw<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> QuizQuestion {
    let subject = *QUIZ_SUBJECTS.choose(rng).unwrap_or(&Subject::Mathematics);
    generate_quiz_question(subject, overall_difficulty(&state.user), rng)
}

impl QuizSession {
    pub fn new<R: Rng + ?Sized>(state: &GameState, tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            rounds: tuning.quiz_rounds.max(1),
            feedback_ms: tuning.quiz_feedback_ms,
            number: 1,
            score: 0,
            question: draw(state, rng),
            selected: None,
            feedback: None,
            complete: false,
        }
    }

    pub fn question(&self) -> &QuizQuestion {
        &self.question
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Answer the current question; ignored while feedback is showing
    pub fn answer(&mut self, choice: usize) -> Effects {
        if self.complete || self.feedback.is_some() || choice >= self.question.answers.len() {
            return Effects::none();
        }

        let q = &self.question;
        let correct = q.is_correct(choice);
        let message = if correct {
            self.score += 1;
            format!(
                "Correct! You earned {} coins and {} XP!",
                q.coin_reward, q.xp_reward
            )
        } else {
            format!(
                "Oops! The correct answer was \"{}\". Try again!",
                q.correct_text()
            )
        };

        let action = Action::RecordAnswer {
            subject: q.subject,
            correct,
            xp: q.xp_reward,
            coins: q.coin_reward,
        };
        self.selected = Some(choice);
        self.feedback = Some(Feedback { correct, message });

        Effects::none()
            .dispatch(action)
            .after(self.feedback_ms, TimerEvent::NextQuestion)
    }

    /// Feedback window over: next question, or finish after the last one
    pub fn advance<R: Rng + ?Sized>(&mut self, state: &GameState, rng: &mut R) -> Effects {
        if self.complete || self.feedback.is_none() {
            return Effects::none();
        }
        self.feedback = None;
        self.selected = None;

        if self.number >= self.rounds {
            self.complete = true;
            log::info!("Quiz complete: {}/{}", self.score, self.rounds);
            return Effects::none().dispatch(Action::FinishGame);
        }

        self.number += 1;
        self.question = draw(state, rng);
        Effects::none()
    }

    /// Play again from question one
    pub fn restart<R: Rng + ?Sized>(&mut self, state: &GameState, rng: &mut R) {
        self.number = 1;
        self.score = 0;
        self.selected = None;
        self.feedback = None;
        self.complete = false;
        self.question = draw(state, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::Deferred;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session() -> (QuizSession, GameState, Pcg32) {
        let state = GameState::default();
        let mut rng = Pcg32::seed_from_u64(8);
        let quiz = QuizSession::new(&state, &Tuning::default(), &mut rng);
        (quiz, state, rng)
    }

    #[test]
    fn test_answer_dispatches_and_defers() {
        let (mut quiz, _, _) = session();
        let right = quiz.question().correct_answer;
        let fx = quiz.answer(right);
        assert!(matches!(
            fx.actions.as_slice(),
            [Action::RecordAnswer { correct: true, xp: 50, coins: 10, .. }]
        ));
        assert_eq!(
            fx.deferred,
            Some(Deferred {
                delay_ms: 3000,
                event: TimerEvent::NextQuestion
            })
        );
        assert_eq!(quiz.score(), 1);
        assert!(quiz.feedback().is_some_and(|f| f.correct));
    }

    #[test]
    fn test_one_answer_per_question() {
        let (mut quiz, _, _) = session();
        let wrong = (quiz.question().correct_answer + 1) % 4;
        assert!(!quiz.answer(wrong).is_empty());
        assert!(quiz.answer(quiz.question().correct_answer).is_empty());
        assert_eq!(quiz.score(), 0);
        let fb = quiz.feedback().unwrap();
        assert!(fb.message.contains(quiz.question().correct_text()));
    }

    #[test]
    fn test_out_of_range_choice_ignored() {
        let (mut quiz, _, _) = session();
        assert!(quiz.answer(4).is_empty());
        assert!(quiz.feedback().is_none());
    }

    #[test]
    fn test_game_finishes_after_last_question() {
        let (mut quiz, state, mut rng) = session();
        let mut finished = 0;
        for n in 1..=10 {
            assert_eq!(quiz.number(), n);
            quiz.answer(0);
            let fx = quiz.advance(&state, &mut rng);
            finished += fx
                .actions
                .iter()
                .filter(|a| matches!(a, Action::FinishGame))
                .count();
        }
        assert_eq!(finished, 1);
        assert!(quiz.is_complete());
        assert!(quiz.answer(0).is_empty());

        quiz.restart(&state, &mut rng);
        assert_eq!(quiz.number(), 1);
        assert!(!quiz.is_complete());
    }

    #[test]
    fn test_subjects_come_from_quiz_set() {
        let (mut quiz, state, mut rng) = session();
        for _ in 0..30 {
            assert!(QUIZ_SUBJECTS.contains(&quiz.question().subject));
            quiz.restart(&state, &mut rng);
        }
    }
}
