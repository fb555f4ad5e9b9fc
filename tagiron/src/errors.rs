use crate::{AnswerValue, QuestionCardId, QuestionType};

/// The error type for the transitions of a [`GameState`](crate::GameState).
///
/// All of these are contract violations by the caller: the state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalTransition {
    DeckIndexOutOfRange {
        index: usize,
        len: usize,
    },
    FieldIndexOutOfRange {
        index: usize,
        len: usize,
    },
    /// No remaining candidate gives this answer.
    UnknownAnswer {
        card: QuestionCardId,
        value: AnswerValue,
    },
    AnswerTypeMismatch {
        expected: QuestionType,
        found: QuestionType,
    },
    /// Shared questions are answered by everyone, so the answer must be given.
    AnswerRequired {
        card: QuestionCardId,
    },
    /// Only shared questions reveal anything to the player when the opponent asks.
    UnexpectedAnswer {
        card: QuestionCardId,
    },
}

impl std::error::Error for IllegalTransition {}

impl std::fmt::Display for IllegalTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalTransition::DeckIndexOutOfRange { index, len } => write!(
                f,
                "Tried to add card {} from the deck, but the deck has {} cards",
                index, len
            ),
            IllegalTransition::FieldIndexOutOfRange { index, len } => write!(
                f,
                "Tried to remove card {} from the field, but the field has {} cards",
                index, len
            ),
            IllegalTransition::UnknownAnswer { card, value } => write!(
                f,
                "No remaining candidate answers {} to `{}`",
                value, card
            ),
            IllegalTransition::AnswerTypeMismatch { expected, found } => write!(
                f,
                "Expected an answer to a {} question, but got one to a {} question",
                expected, found
            ),
            IllegalTransition::AnswerRequired { card } => {
                write!(f, "`{}` is a shared question and needs an answer", card)
            }
            IllegalTransition::UnexpectedAnswer { card } => write!(
                f,
                "`{}` is not a shared question, the opponent's answer is not revealed",
                card
            ),
        }
    }
}

/// The error type for [`Timeline::travel_to()`](crate::Timeline::travel_to).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineIndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

impl std::error::Error for TimelineIndexOutOfRange {}

impl std::fmt::Display for TimelineIndexOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cannot travel to state {}, the history has {} states",
            self.index, self.len
        )
    }
}
