//! Word puzzles: matching pairs, spelling, fill in the blank

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Effects, TimerEvent};
use crate::audio::SoundCue;
use crate::content::puzzles::{FILL_BLANKS, MATCHING_PAIRS, SPELLING_WORDS, shuffled};
use crate::content::{FillBlank, MatchingPair, PuzzleKind, SpellingWord};
use crate::sim::Action;
use crate::tuning::Tuning;

/// A card on the matching board, by index into the pair table
///
/// JSON form is `{"word": 2}` or `{"icon": 2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tile {
    Word(usize),
    Icon(usize),
}

impl Tile {
    pub fn pair(&self) -> usize {
        match *self {
            Tile::Word(i) | Tile::Icon(i) => i,
        }
    }
}

#[derive(Debug, Clone)]
struct MatchingBoard {
    matched: Vec<bool>,
    words: Vec<usize>,
    icons: Vec<usize>,
    selected: Vec<Tile>,
}

impl MatchingBoard {
    fn deal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let order: Vec<usize> = (0..MATCHING_PAIRS.len()).collect();
        Self {
            matched: vec![false; MATCHING_PAIRS.len()],
            words: shuffled(&order, rng),
            icons: shuffled(&order, rng),
            selected: Vec::new(),
        }
    }

    fn done(&self) -> bool {
        self.matched.iter().all(|m| *m)
    }
}

/// Shuffled bank walked front to back, reshuffled at the end
#[derive(Debug, Clone)]
struct Deck<T: Copy + 'static> {
    bank: &'static [T],
    cards: Vec<T>,
    index: usize,
}

impl<T: Copy + 'static> Deck<T> {
    fn new<R: Rng + ?Sized>(bank: &'static [T], rng: &mut R) -> Self {
        Self {
            bank,
            cards: shuffled(bank, rng),
            index: 0,
        }
    }

    fn current(&self) -> T {
        self.cards[self.index]
    }

    fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.index += 1;
        if self.index >= self.cards.len() {
            self.cards = shuffled(self.bank, rng);
            self.index = 0;
        }
    }
}

#[derive(Debug, Clone)]
pub struct PuzzleSession {
    kind: PuzzleKind,
    score: u32,
    boards_completed: u32,
    reset_ms: u64,
    board: MatchingBoard,
    spelling: Deck<SpellingWord>,
    blanks: Deck<FillBlank>,
}

impl PuzzleSession {
    pub fn new<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            kind: PuzzleKind::Matching,
            score: 0,
            boards_completed: 0,
            reset_ms: tuning.matching_reset_ms,
            board: MatchingBoard::deal(rng),
            spelling: Deck::new(SPELLING_WORDS, rng),
            blanks: Deck::new(FILL_BLANKS, rng),
        }
    }

    pub fn kind(&self) -> PuzzleKind {
        self.kind
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn boards_completed(&self) -> u32 {
        self.boards_completed
    }

    pub fn switch(&mut self, kind: PuzzleKind) -> Effects {
        self.kind = kind;
        Effects::none().cue(SoundCue::Click)
    }

    fn award(&mut self, kind: PuzzleKind) -> Effects {
        let reward = kind.reward();
        self.score += reward.points;
        Effects::none().dispatch(Action::AwardPuzzle {
            xp: reward.xp,
            coins: reward.coins,
        })
    }

    // Matching

    /// Unmatched words in display order
    pub fn words(&self) -> Vec<&'static MatchingPair> {
        self.board
            .words
            .iter()
            .filter(|&&i| !self.board.matched[i])
            .map(|&i| &MATCHING_PAIRS[i])
            .collect()
    }

    /// Unmatched icons in display order
    pub fn icons(&self) -> Vec<&'static MatchingPair> {
        self.board
            .icons
            .iter()
            .filter(|&&i| !self.board.matched[i])
            .map(|&i| &MATCHING_PAIRS[i])
            .collect()
    }

    pub fn selected(&self) -> &[Tile] {
        &self.board.selected
    }

    pub fn is_matched(&self, pair: usize) -> bool {
        self.board.matched.get(pair).copied().unwrap_or(false)
    }

    /// Pick a card; the second pick is checked and the selection cleared later
    pub fn select<R: Rng + ?Sized>(&mut self, tile: Tile, rng: &mut R) -> Effects {
        let pair = tile.pair();
        if pair >= MATCHING_PAIRS.len() || self.board.matched[pair] || self.board.selected.len() >= 2
        {
            return Effects::none();
        }
        if let Some(pos) = self.board.selected.iter().position(|t| *t == tile) {
            self.board.selected.remove(pos);
            return Effects::none();
        }

        self.board.selected.push(tile);
        if self.board.selected.len() < 2 {
            return Effects::none();
        }

        let (a, b) = (self.board.selected[0], self.board.selected[1]);
        let is_pair = a.pair() == b.pair()
            && matches!((a, b), (Tile::Word(_), Tile::Icon(_)) | (Tile::Icon(_), Tile::Word(_)));

        let mut fx = if is_pair {
            self.board.matched[pair] = true;
            self.award(PuzzleKind::Matching)
        } else {
            Effects::none().cue(SoundCue::Incorrect)
        };

        if self.board.done() {
            self.boards_completed += 1;
            log::info!("Matching board {} complete", self.boards_completed);
            fx = fx.dispatch(Action::FinishGame);
            self.board = MatchingBoard::deal(rng);
            return fx;
        }
        fx.after(self.reset_ms, TimerEvent::ClearSelection)
    }

    pub fn clear_selection(&mut self) {
        self.board.selected.clear();
    }

    // Spelling

    pub fn spelling_word(&self) -> SpellingWord {
        self.spelling.current()
    }

    pub fn submit_spelling<R: Rng + ?Sized>(&mut self, guess: &str, rng: &mut R) -> Effects {
        if !self.spelling.current().check(guess) {
            return Effects::none().cue(SoundCue::Incorrect);
        }
        self.spelling.next(rng);
        self.award(PuzzleKind::Spelling)
    }

    // Fill in the blank

    pub fn fill_blank(&self) -> FillBlank {
        self.blanks.current()
    }

    pub fn submit_fill_blank<R: Rng + ?Sized>(&mut self, guess: &str, rng: &mut R) -> Effects {
        if !self.blanks.current().check(guess) {
            return Effects::none().cue(SoundCue::Incorrect);
        }
        self.blanks.next(rng);
        self.award(PuzzleKind::FillBlanks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session() -> (PuzzleSession, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(4);
        let puzzles = PuzzleSession::new(&Tuning::default(), &mut rng);
        (puzzles, rng)
    }

    #[test]
    fn test_matching_pair_awards() {
        let (mut p, mut rng) = session();
        assert!(p.select(Tile::Word(2), &mut rng).is_empty());
        let fx = p.select(Tile::Icon(2), &mut rng);
        assert_eq!(fx.actions, vec![Action::AwardPuzzle { xp: 25, coins: 5 }]);
        assert_eq!(fx.deferred.map(|d| d.delay_ms), Some(1000));
        assert_eq!(p.score(), 10);
        assert!(p.is_matched(2));
        assert_eq!(p.words().len(), 4);

        // Selection stays locked until the timer clears it
        assert!(p.select(Tile::Word(0), &mut rng).is_empty());
        p.clear_selection();
        assert!(p.selected().is_empty());
    }

    #[test]
    fn test_matching_miss() {
        let (mut p, mut rng) = session();
        p.select(Tile::Word(0), &mut rng);
        let fx = p.select(Tile::Icon(1), &mut rng);
        assert!(fx.actions.is_empty());
        assert_eq!(fx.cues, vec![SoundCue::Incorrect]);
        assert_eq!(p.score(), 0);

        p.clear_selection();
        p.select(Tile::Word(0), &mut rng);
        let fx = p.select(Tile::Word(0), &mut rng);
        assert!(fx.is_empty());
        assert!(p.selected().is_empty());
    }

    #[test]
    fn test_full_board_finishes_and_redeals() {
        let (mut p, mut rng) = session();
        let mut last = Effects::none();
        for i in 0..MATCHING_PAIRS.len() {
            p.select(Tile::Icon(i), &mut rng);
            last = p.select(Tile::Word(i), &mut rng);
            p.clear_selection();
        }
        assert!(last.actions.contains(&Action::FinishGame));
        assert_eq!(p.boards_completed(), 1);
        assert_eq!(p.words().len(), MATCHING_PAIRS.len());
        assert_eq!(p.score(), 50);
    }

    #[test]
    fn test_spelling() {
        let (mut p, mut rng) = session();
        let first = p.spelling_word();
        let fx = p.submit_spelling("nope", &mut rng);
        assert_eq!(fx.cues, vec![SoundCue::Incorrect]);
        assert_eq!(p.spelling_word(), first);

        let fx = p.submit_spelling(&first.word.to_lowercase(), &mut rng);
        assert_eq!(fx.actions, vec![Action::AwardPuzzle { xp: 50, coins: 10 }]);
        assert_eq!(p.score(), 20);
        assert_ne!(p.spelling_word(), first);
    }

    #[test]
    fn test_spelling_deck_reshuffles() {
        let (mut p, mut rng) = session();
        for _ in 0..SPELLING_WORDS.len() + 3 {
            let word = p.spelling_word().word;
            p.submit_spelling(word, &mut rng);
        }
        assert_eq!(p.score(), 20 * (SPELLING_WORDS.len() as u32 + 3));
    }

    #[test]
    fn test_fill_blank() {
        let (mut p, mut rng) = session();
        assert_eq!(p.switch(PuzzleKind::FillBlanks).cues, vec![SoundCue::Click]);
        let answer = p.fill_blank().answer;
        let fx = p.submit_fill_blank(&answer.to_uppercase(), &mut rng);
        assert_eq!(fx.actions, vec![Action::AwardPuzzle { xp: 35, coins: 7 }]);
        assert_eq!(p.score(), 15);
        assert_eq!(p.kind(), PuzzleKind::FillBlanks);
    }
}
