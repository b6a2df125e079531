//! Keypad equations: solve for `x`, always an integer

use rand::Rng;
use serde::Serialize;

use crate::settings::Difficulty;

/// Shape of a generated equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "camelCase")]
pub enum EquationForm {
    /// `a + x = b`
    AddLeft { a: i64, b: i64 },
    /// `x + a = b`
    AddRight { a: i64, b: i64 },
    /// `a - x = b`
    Subtract { a: i64, b: i64 },
    /// `a * x = b`
    Multiply { a: i64, b: i64 },
    /// `a + m * x = b`
    TwoStep { a: i64, m: i64, b: i64 },
    /// `a / x = b`
    Divide { a: i64, b: i64 },
}

impl EquationForm {
    pub fn render(&self) -> String {
        match *self {
            EquationForm::AddLeft { a, b } => format!("{} + x = {}", a, b),
            EquationForm::AddRight { a, b } => format!("x + {} = {}", a, b),
            EquationForm::Subtract { a, b } => format!("{} - x = {}", a, b),
            EquationForm::Multiply { a, b } => format!("{} * x = {}", a, b),
            EquationForm::TwoStep { a, m, b } => format!("{} + {} * x = {}", a, m, b),
            EquationForm::Divide { a, b } => format!("{} / x = {}", a, b),
        }
    }

    /// Does `x` make both sides equal (exact integer arithmetic)
    pub fn satisfied_by(&self, x: i64) -> bool {
        match *self {
            EquationForm::AddLeft { a, b } | EquationForm::AddRight { a, b } => a + x == b,
            EquationForm::Subtract { a, b } => a - x == b,
            EquationForm::Multiply { a, b } => a * x == b,
            EquationForm::TwoStep { a, m, b } => a + m * x == b,
            EquationForm::Divide { a, b } => x != 0 && a % x == 0 && a / x == b,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeypadEquation {
    pub equation: String,
    pub answer: i64,
    pub difficulty: Difficulty,
    pub xp_reward: u32,
    pub coin_reward: u32,
    #[serde(skip)]
    pub form: EquationForm,
}

impl KeypadEquation {
    fn new(form: EquationForm, answer: i64, difficulty: Difficulty) -> Self {
        let (xp_reward, coin_reward) = difficulty.equation_reward();
        Self {
            equation: form.render(),
            answer,
            difficulty,
            xp_reward,
            coin_reward,
            form,
        }
    }

    pub fn is_correct(&self, guess: i64) -> bool {
        guess == self.answer
    }
}

/// The equation served when the requested tier is not recognised
pub fn default_equation() -> KeypadEquation {
    KeypadEquation::new(EquationForm::AddLeft { a: 2, b: 7 }, 5, Difficulty::Easy)
}

pub fn generate_keypad_equation<R: Rng + ?Sized>(
    difficulty: Difficulty,
    rng: &mut R,
) -> KeypadEquation {
    let (form, answer) = match difficulty {
        Difficulty::Easy => {
            let a = rng.random_range(1..=10);
            let x = rng.random_range(1..=10);
            let form = if rng.random_bool(0.5) {
                EquationForm::AddLeft { a, b: a + x }
            } else {
                EquationForm::AddRight { a, b: a + x }
            };
            (form, x)
        }
        Difficulty::Medium => {
            let c = rng.random_range(10..=29);
            match rng.random_range(0..3) {
                0 => {
                    let x = rng.random_range(5..=24);
                    (EquationForm::AddLeft { a: c, b: c + x }, x)
                }
                1 => {
                    let x = rng.random_range(5..=24);
                    (EquationForm::Subtract { a: c + x, b: c }, x)
                }
                _ => {
                    let x = rng.random_range(2..=6);
                    (EquationForm::Multiply { a: c, b: c * x }, x)
                }
            }
        }
        Difficulty::Hard => {
            if rng.random_bool(0.5) {
                let a = rng.random_range(20..=69);
                let m = rng.random_range(2..=11);
                let x = rng.random_range(5..=24);
                (EquationForm::TwoStep { a, m, b: a + m * x }, x)
            } else {
                let quotient = rng.random_range(2..=11);
                let x = rng.random_range(2..=10);
                (EquationForm::Divide { a: quotient * x, b: quotient }, x)
            }
        }
    };

    KeypadEquation::new(form, answer, difficulty)
}

/// Generate from a tier name, serving the fixed default for unknown names
pub fn generate_keypad_equation_named<R: Rng + ?Sized>(tier: &str, rng: &mut R) -> KeypadEquation {
    match Difficulty::from_str(tier) {
        Some(difficulty) => generate_keypad_equation(difficulty, rng),
        None => {
            log::warn!("Unknown difficulty '{}', serving default equation", tier);
            default_equation()
        }
    }
}
