use quickcheck::{Arbitrary, Gen};

use crate::{
    default_catalog, remaining_tiles, Answer, GameState, Hand, QuestionType, Tile, HAND_SIZE,
    TILE_UNIVERSE,
};

impl Arbitrary for Tile {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&TILE_UNIVERSE).unwrap()
    }
}

// Draws five distinct physical tiles from `pool`.
fn draw_hand(g: &mut Gen, mut pool: Vec<Tile>) -> Hand {
    let tiles: [Tile; HAND_SIZE] = std::array::from_fn(|_| {
        let idx = usize::arbitrary(g) % pool.len();
        pool.remove(idx)
    });
    Hand::new(tiles).unwrap()
}

impl Arbitrary for Hand {
    fn arbitrary(g: &mut Gen) -> Self {
        draw_hand(g, TILE_UNIVERSE.to_vec())
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Step {
    Add(usize),
    Delete(usize),
    Ask(usize),
    Opponent(usize),
}

impl Arbitrary for Step {
    fn arbitrary(g: &mut Gen) -> Self {
        let idx = usize::arbitrary(g);
        match u8::arbitrary(g) % 4 {
            0 => Step::Add(idx),
            1 => Step::Delete(idx),
            2 => Step::Ask(idx),
            _ => Step::Opponent(idx),
        }
    }
}

/// A game between the player holding `hand` and an opponent holding `secret`.
///
/// The steps are turned into legal transitions by taking indices modulo the length
/// of the deck, field or question list, and by answering truthfully for `secret`.
/// Steps that cannot be applied (e.g. deleting from an empty field) are skipped.
#[derive(Clone, Debug)]
pub struct PlayScript {
    pub hand: Hand,
    pub secret: Hand,
    pub steps: Vec<Step>,
}

impl Arbitrary for PlayScript {
    fn arbitrary(g: &mut Gen) -> Self {
        let hand = Hand::arbitrary(g);
        let secret = draw_hand(g, remaining_tiles(&hand));
        PlayScript {
            hand,
            secret,
            steps: Vec::arbitrary(g),
        }
    }
}

impl PlayScript {
    /// Every state of the game, starting with the initial one.
    pub fn play(&self) -> Vec<GameState> {
        let mut states = vec![GameState::new(self.hand, default_catalog().unwrap())];
        for &step in &self.steps {
            let state = states.last().unwrap();
            let questions = state.possible_questions();
            let next = match step {
                Step::Add(idx) if !state.deck().is_empty() => {
                    state.add_question_card(idx % state.deck().len())
                }
                Step::Delete(idx) if !state.field().is_empty() => {
                    state.delete_question_card(idx % state.field().len())
                }
                Step::Ask(idx) if !questions.is_empty() => {
                    let question = &questions[idx % questions.len()];
                    state.narrow_by_answer(question, &Answer::of(question, &self.secret))
                }
                Step::Opponent(idx) if !questions.is_empty() => {
                    let question = &questions[idx % questions.len()];
                    let answer = (question.question_type() == QuestionType::Shared)
                        .then(|| Answer::of(question, &self.secret));
                    state.opponent_ask(question, answer.as_ref())
                }
                _ => continue,
            };
            states.push(next.unwrap());
        }
        states
    }
}
