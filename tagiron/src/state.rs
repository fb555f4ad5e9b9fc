use std::rc::Rc;

use tracing::debug;

use crate::{
    enumerate_candidates, Answer, Hand, IllegalTransition, Question, QuestionCard, QuestionCardId,
    QuestionType,
};

/// A snapshot of everything the player knows.
///
/// # Note on immutability
///
/// A `GameState` is never modified. Every transition returns a new state, which shares
/// the collections the transition didn't touch with the old one, so cloning and keeping
/// old states around is cheap.
#[derive(Clone, Debug)]
pub struct GameState {
    hand: Hand,
    /// Never empty.
    candidates: Rc<[Hand]>,
    /// Cards not yet in play.
    deck: Rc<[QuestionCard]>,
    /// Cards that can currently be asked.
    field: Rc<[QuestionCard]>,
    /// Cards that have been asked or discarded.
    trash: Rc<[QuestionCard]>,
    last_action: String,
}

impl GameState {
    /// The state at the start of a game: every card is in the deck, and every hand
    /// that can be drawn from the other tiles is a candidate.
    pub fn new(hand: Hand, catalog: Vec<QuestionCard>) -> Self {
        let candidates = enumerate_candidates(&hand);
        Self {
            hand,
            candidates: candidates.into(),
            deck: catalog.into(),
            field: Rc::from(Vec::new()),
            trash: Rc::from(Vec::new()),
            last_action: format!("started with hand {}", hand),
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn candidates(&self) -> &[Hand] {
        &self.candidates
    }

    pub fn deck(&self) -> &[QuestionCard] {
        &self.deck
    }

    pub fn field(&self) -> &[QuestionCard] {
        &self.field
    }

    pub fn trash(&self) -> &[QuestionCard] {
        &self.trash
    }

    /// A short description of the transition that produced this state.
    pub fn last_action(&self) -> &str {
        &self.last_action
    }

    /// The player asked `question` and the opponent gave `answer`.
    ///
    /// Keeps only the candidates that give the same answer, and moves the card to the
    /// trash if it is in the field.
    pub fn narrow_by_answer(
        &self,
        question: &Question,
        answer: &Answer,
    ) -> Result<Self, IllegalTransition> {
        let candidates = self.narrowed_candidates(question, answer)?;
        let (field, trash) = self.consume_card(question.card().id);
        let next = Self {
            hand: self.hand,
            candidates,
            deck: Rc::clone(&self.deck),
            field,
            trash,
            last_action: format!("narrowed by question {} and answer {}", question, answer),
        };
        debug!(
            question = %question,
            answer = %answer,
            before = self.candidates.len(),
            after = next.candidates.len(),
            "Narrowed candidates"
        );
        Ok(next)
    }

    /// The opponent asked `question`.
    ///
    /// Only a shared question narrows the candidates, since everyone answers it. For
    /// any other question `answer` must be `None`.
    pub fn opponent_ask(
        &self,
        question: &Question,
        answer: Option<&Answer>,
    ) -> Result<Self, IllegalTransition> {
        let card = question.card().id;
        let candidates = match (question.question_type(), answer) {
            (QuestionType::Shared, Some(answer)) => self.narrowed_candidates(question, answer)?,
            (QuestionType::Shared, None) => {
                return Err(IllegalTransition::AnswerRequired { card });
            }
            (_, Some(_)) => return Err(IllegalTransition::UnexpectedAnswer { card }),
            (_, None) => Rc::clone(&self.candidates),
        };
        let (field, trash) = self.consume_card(card);
        let last_action = match answer {
            Some(answer) => format!(
                "opponent asked question {} and answer {} narrows",
                question, answer
            ),
            None => format!("opponent asked question {}", question),
        };
        debug!(question = %question, candidates = candidates.len(), "Opponent asked");
        Ok(Self {
            hand: self.hand,
            candidates,
            deck: Rc::clone(&self.deck),
            field,
            trash,
            last_action,
        })
    }

    /// Moves the card at `index` in the deck to the end of the field.
    pub fn add_question_card(&self, index: usize) -> Result<Self, IllegalTransition> {
        if index >= self.deck.len() {
            return Err(IllegalTransition::DeckIndexOutOfRange {
                index,
                len: self.deck.len(),
            });
        }
        let mut deck = self.deck.to_vec();
        let card = deck.remove(index);
        let mut field = self.field.to_vec();
        let last_action = format!("added question card `{}`", card.id);
        debug!(card = %card.id, "Added question card");
        field.push(card);
        Ok(Self {
            hand: self.hand,
            candidates: Rc::clone(&self.candidates),
            deck: deck.into(),
            field: field.into(),
            trash: Rc::clone(&self.trash),
            last_action,
        })
    }

    /// Moves the card at `index` in the field to the trash without asking it.
    pub fn delete_question_card(&self, index: usize) -> Result<Self, IllegalTransition> {
        if index >= self.field.len() {
            return Err(IllegalTransition::FieldIndexOutOfRange {
                index,
                len: self.field.len(),
            });
        }
        let mut field = self.field.to_vec();
        let card = field.remove(index);
        let mut trash = self.trash.to_vec();
        let last_action = format!("deleted question card `{}`", card.id);
        debug!(card = %card.id, "Deleted question card");
        trash.push(card);
        Ok(Self {
            hand: self.hand,
            candidates: Rc::clone(&self.candidates),
            deck: Rc::clone(&self.deck),
            field: field.into(),
            trash: trash.into(),
            last_action,
        })
    }

    // The candidates that answer `answer` to `question`. Fails if there are none.
    fn narrowed_candidates(
        &self,
        question: &Question,
        answer: &Answer,
    ) -> Result<Rc<[Hand]>, IllegalTransition> {
        if answer.question_type() != question.question_type() {
            return Err(IllegalTransition::AnswerTypeMismatch {
                expected: question.question_type(),
                found: answer.question_type(),
            });
        }
        let value = answer.value();
        let group: Vec<Hand> = self
            .candidates
            .iter()
            .filter(|candidate| question.evaluate(candidate) == value)
            .copied()
            .collect();
        if group.is_empty() {
            return Err(IllegalTransition::UnknownAnswer {
                card: question.card().id,
                value,
            });
        }
        Ok(group.into())
    }

    // Moves the card with this id from the field to the trash, if it is in the field.
    fn consume_card(&self, id: QuestionCardId) -> (Rc<[QuestionCard]>, Rc<[QuestionCard]>) {
        match self.field.iter().position(|card| card.id == id) {
            Some(idx) => {
                let mut field = self.field.to_vec();
                let card = field.remove(idx);
                let mut trash = self.trash.to_vec();
                trash.push(card);
                (field.into(), trash.into())
            }
            None => (Rc::clone(&self.field), Rc::clone(&self.trash)),
        }
    }
}

#[cfg(test)]
impl GameState {
    /// A state without cards whose candidates are exactly `candidates`.
    pub(crate) fn with_candidates(hand: Hand, candidates: Vec<Hand>) -> Self {
        Self {
            candidates: candidates.into(),
            ..Self::new(hand, Vec::new())
        }
    }
}
