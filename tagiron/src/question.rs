use serde::{Deserialize, Serialize};

use crate::{Color, Hand, HAND_SIZE};

/// The identity of a question card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QuestionCardId {
    #[serde(rename = "where_0")]
    Where0,
    #[serde(rename = "where_12")]
    Where12,
    #[serde(rename = "where_34")]
    Where34,
    #[serde(rename = "where_5")]
    Where5,
    #[serde(rename = "where_67")]
    Where67,
    #[serde(rename = "where_89")]
    Where89,
    #[serde(rename = "where_sequential")]
    WhereSequential,
    #[serde(rename = "where_neighboring_same_color")]
    WhereNeighboringSameColor,
    #[serde(rename = "count_even")]
    CountEven,
    #[serde(rename = "count_odd")]
    CountOdd,
    #[serde(rename = "count_red")]
    CountRed,
    #[serde(rename = "count_blue")]
    CountBlue,
    #[serde(rename = "count_pairs")]
    CountPairs,
    #[serde(rename = "sum_3_left")]
    Sum3Left,
    #[serde(rename = "sum_3_middle")]
    Sum3Middle,
    #[serde(rename = "sum_3_right")]
    Sum3Right,
    #[serde(rename = "sum_red")]
    SumRed,
    #[serde(rename = "sum_blue")]
    SumBlue,
    #[serde(rename = "shared_sum_all")]
    SharedSumAll,
    #[serde(rename = "shared_center_45")]
    SharedCenter45,
    #[serde(rename = "shared_diff_min_max")]
    SharedDiffMinMax,
}

/// What kind of answer a question card gets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum QuestionType {
    /// Answered with the positions of some tiles in the sorted hand.
    Where,
    /// Answered with a number of tiles.
    Count,
    /// Answered with a sum of tile numbers.
    Sum,
    /// Answered with a number by every player, so the asker learns something too.
    Shared,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            QuestionType::Where => "where",
            QuestionType::Count => "count",
            QuestionType::Sum => "sum",
            QuestionType::Shared => "shared",
        };
        write!(f, "{}", name)
    }
}

impl QuestionCardId {
    pub const ALL: [QuestionCardId; 21] = [
        QuestionCardId::Where0,
        QuestionCardId::Where12,
        QuestionCardId::Where34,
        QuestionCardId::Where5,
        QuestionCardId::Where67,
        QuestionCardId::Where89,
        QuestionCardId::WhereSequential,
        QuestionCardId::WhereNeighboringSameColor,
        QuestionCardId::CountEven,
        QuestionCardId::CountOdd,
        QuestionCardId::CountRed,
        QuestionCardId::CountBlue,
        QuestionCardId::CountPairs,
        QuestionCardId::Sum3Left,
        QuestionCardId::Sum3Middle,
        QuestionCardId::Sum3Right,
        QuestionCardId::SumRed,
        QuestionCardId::SumBlue,
        QuestionCardId::SharedSumAll,
        QuestionCardId::SharedCenter45,
        QuestionCardId::SharedDiffMinMax,
    ];

    /// The key used for this card in catalog files.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionCardId::Where0 => "where_0",
            QuestionCardId::Where12 => "where_12",
            QuestionCardId::Where34 => "where_34",
            QuestionCardId::Where5 => "where_5",
            QuestionCardId::Where67 => "where_67",
            QuestionCardId::Where89 => "where_89",
            QuestionCardId::WhereSequential => "where_sequential",
            QuestionCardId::WhereNeighboringSameColor => "where_neighboring_same_color",
            QuestionCardId::CountEven => "count_even",
            QuestionCardId::CountOdd => "count_odd",
            QuestionCardId::CountRed => "count_red",
            QuestionCardId::CountBlue => "count_blue",
            QuestionCardId::CountPairs => "count_pairs",
            QuestionCardId::Sum3Left => "sum_3_left",
            QuestionCardId::Sum3Middle => "sum_3_middle",
            QuestionCardId::Sum3Right => "sum_3_right",
            QuestionCardId::SumRed => "sum_red",
            QuestionCardId::SumBlue => "sum_blue",
            QuestionCardId::SharedSumAll => "shared_sum_all",
            QuestionCardId::SharedCenter45 => "shared_center_45",
            QuestionCardId::SharedDiffMinMax => "shared_diff_min_max",
        }
    }

    pub fn question_type(self) -> QuestionType {
        match self {
            QuestionCardId::Where0
            | QuestionCardId::Where12
            | QuestionCardId::Where34
            | QuestionCardId::Where5
            | QuestionCardId::Where67
            | QuestionCardId::Where89
            | QuestionCardId::WhereSequential
            | QuestionCardId::WhereNeighboringSameColor => QuestionType::Where,
            QuestionCardId::CountEven
            | QuestionCardId::CountOdd
            | QuestionCardId::CountRed
            | QuestionCardId::CountBlue
            | QuestionCardId::CountPairs => QuestionType::Count,
            QuestionCardId::Sum3Left
            | QuestionCardId::Sum3Middle
            | QuestionCardId::Sum3Right
            | QuestionCardId::SumRed
            | QuestionCardId::SumBlue => QuestionType::Sum,
            QuestionCardId::SharedSumAll
            | QuestionCardId::SharedCenter45
            | QuestionCardId::SharedDiffMinMax => QuestionType::Shared,
        }
    }

    /// The numbers the asker chooses between, for cards that ask about one of two numbers.
    ///
    /// Empty for every other card.
    pub fn options(self) -> &'static [u8] {
        match self {
            QuestionCardId::Where12 => &[1, 2],
            QuestionCardId::Where34 => &[3, 4],
            QuestionCardId::Where67 => &[6, 7],
            QuestionCardId::Where89 => &[8, 9],
            _ => &[],
        }
    }

    /// Resolves the evaluation rule, given the asker's choice of option.
    pub fn evaluation(self, option: Option<u8>) -> Result<Evaluation, IllegalOption> {
        let legal = match option {
            None => self.options().is_empty(),
            Some(number) => self.options().contains(&number),
        };
        if !legal {
            return Err(IllegalOption { card: self, option });
        }
        let evaluation = match (self, option) {
            (QuestionCardId::Where0, _) => Evaluation::Where(Where::Number(0)),
            (QuestionCardId::Where5, _) => Evaluation::Where(Where::Number(5)),
            (
                QuestionCardId::Where12
                | QuestionCardId::Where34
                | QuestionCardId::Where67
                | QuestionCardId::Where89,
                Some(number),
            ) => Evaluation::Where(Where::Number(number)),
            (QuestionCardId::WhereSequential, _) => Evaluation::Where(Where::Sequential),
            (QuestionCardId::WhereNeighboringSameColor, _) => {
                Evaluation::Where(Where::NeighboringSameColor)
            }
            (QuestionCardId::CountEven, _) => Evaluation::Count(Count::Parity(Parity::Even)),
            (QuestionCardId::CountOdd, _) => Evaluation::Count(Count::Parity(Parity::Odd)),
            (QuestionCardId::CountRed, _) => Evaluation::Count(Count::Color(Color::Red)),
            (QuestionCardId::CountBlue, _) => Evaluation::Count(Count::Color(Color::Blue)),
            (QuestionCardId::CountPairs, _) => Evaluation::Count(Count::Pairs),
            (QuestionCardId::Sum3Left, _) => Evaluation::Sum(Sum::Window(Window::Left)),
            (QuestionCardId::Sum3Middle, _) => Evaluation::Sum(Sum::Window(Window::Middle)),
            (QuestionCardId::Sum3Right, _) => Evaluation::Sum(Sum::Window(Window::Right)),
            (QuestionCardId::SumRed, _) => Evaluation::Sum(Sum::Color(Color::Red)),
            (QuestionCardId::SumBlue, _) => Evaluation::Sum(Sum::Color(Color::Blue)),
            (QuestionCardId::SharedSumAll, _) => Evaluation::Shared(Shared::SumAll),
            (QuestionCardId::SharedCenter45, _) => Evaluation::Shared(Shared::Center45),
            (QuestionCardId::SharedDiffMinMax, _) => Evaluation::Shared(Shared::DiffMinMax),
            // Legality was checked above
            (_, None) => return Err(IllegalOption { card: self, option }),
        };
        Ok(evaluation)
    }
}

impl std::fmt::Display for QuestionCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error type for [`Question::new()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IllegalOption {
    pub card: QuestionCardId,
    pub option: Option<u8>,
}

impl std::error::Error for IllegalOption {}

impl std::fmt::Display for IllegalOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.option, self.card.options()) {
            (None, options) => write!(
                f,
                "Question card `{}` needs one of the options {:?}",
                self.card, options
            ),
            (Some(option), []) => write!(
                f,
                "Question card `{}` takes no option, but {} was given",
                self.card, option
            ),
            (Some(option), options) => write!(
                f,
                "Option {} is not one of {:?} for question card `{}`",
                option, options, self.card
            ),
        }
    }
}

/// A question card, as loaded from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCard {
    pub id: QuestionCardId,
    /// Japanese card text.
    pub ja: String,
    /// English card text.
    pub en: String,
}

impl QuestionCard {
    pub fn question_type(&self) -> QuestionType {
        self.id.question_type()
    }

    /// The questions that can be asked with this card: one per option, or a single one
    /// if the card has no options.
    pub fn to_questions(&self) -> Vec<Question> {
        let options = self.id.options();
        let choices: Vec<Option<u8>> = if options.is_empty() {
            vec![None]
        } else {
            options.iter().map(|&number| Some(number)).collect()
        };
        choices
            .into_iter()
            .filter_map(|option| {
                let question = Question::new(self.clone(), option);
                debug_assert!(
                    question.is_ok(),
                    "{} lists the illegal option {:?}",
                    self.id,
                    option
                );
                question.ok()
            })
            .collect()
    }
}

impl std::fmt::Display for QuestionCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A question card together with the asker's choice of option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    card: QuestionCard,
    option: Option<u8>,
    evaluation: Evaluation,
}

impl Question {
    pub fn new(card: QuestionCard, option: Option<u8>) -> Result<Self, IllegalOption> {
        let evaluation = card.id.evaluation(option)?;
        Ok(Self {
            card,
            option,
            evaluation,
        })
    }

    pub fn card(&self) -> &QuestionCard {
        &self.card
    }

    pub fn option(&self) -> Option<u8> {
        self.option
    }

    pub fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    pub fn question_type(&self) -> QuestionType {
        self.evaluation.question_type()
    }

    /// The answer the holder of `hand` has to give.
    pub fn evaluate(&self, hand: &Hand) -> AnswerValue {
        self.evaluation.evaluate(hand)
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.option {
            Some(option) => write!(f, "{} ({})", self.card.id, option),
            None => write!(f, "{}", self.card.id),
        }
    }
}

/// The rule a question applies to a hand.
///
/// The outer variant determines the [`QuestionType`], so an evaluation can never
/// produce an answer of the wrong shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    Where(Where),
    Count(Count),
    Sum(Sum),
    Shared(Shared),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Where {
    /// Tiles with this number.
    Number(u8),
    /// Tiles followed by a tile whose number is one higher.
    Sequential,
    /// Tiles followed by a tile of the same color.
    NeighboringSameColor,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Count {
    Parity(Parity),
    Color(Color),
    /// Numbers that appear exactly twice.
    Pairs,
}

/// Three adjacent tiles of the sorted hand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Window {
    Left,
    Middle,
    Right,
}

impl Window {
    fn start(self) -> usize {
        match self {
            Window::Left => 0,
            Window::Middle => 1,
            Window::Right => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sum {
    Window(Window),
    Color(Color),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shared {
    SumAll,
    /// 5 if the center tile is at least 5, 4 otherwise.
    Center45,
    /// Largest minus smallest number.
    DiffMinMax,
}

impl Evaluation {
    pub fn question_type(self) -> QuestionType {
        match self {
            Evaluation::Where(_) => QuestionType::Where,
            Evaluation::Count(_) => QuestionType::Count,
            Evaluation::Sum(_) => QuestionType::Sum,
            Evaluation::Shared(_) => QuestionType::Shared,
        }
    }

    pub fn evaluate(self, hand: &Hand) -> AnswerValue {
        let tiles = hand.tiles();
        let numbers = hand.numbers();
        match self {
            Evaluation::Where(rule) => {
                let positions = match rule {
                    Where::Number(number) => (0..HAND_SIZE)
                        .filter(|&idx| numbers[idx] == number)
                        .collect(),
                    Where::Sequential => (0..HAND_SIZE - 1)
                        .filter(|&idx| numbers[idx] + 1 == numbers[idx + 1])
                        .collect(),
                    Where::NeighboringSameColor => (0..HAND_SIZE - 1)
                        .filter(|&idx| tiles[idx].color() == tiles[idx + 1].color())
                        .collect(),
                };
                AnswerValue::Positions(positions)
            }
            Evaluation::Count(rule) => {
                let count = match rule {
                    Count::Parity(parity) => {
                        let rest = match parity {
                            Parity::Even => 0,
                            Parity::Odd => 1,
                        };
                        numbers.iter().filter(|&&n| n % 2 == rest).count()
                    }
                    Count::Color(color) => tiles.iter().filter(|t| t.color() == color).count(),
                    Count::Pairs => (0..=9u8)
                        .filter(|&n| numbers.iter().filter(|&&m| m == n).count() == 2)
                        .count(),
                };
                AnswerValue::Number(count as u8)
            }
            Evaluation::Sum(rule) => {
                let sum: u8 = match rule {
                    Sum::Window(window) => numbers[window.start()..window.start() + 3].iter().sum(),
                    Sum::Color(color) => tiles
                        .iter()
                        .filter(|t| t.color() == color)
                        .map(|t| t.number())
                        .sum(),
                };
                AnswerValue::Number(sum)
            }
            Evaluation::Shared(rule) => {
                let value = match rule {
                    Shared::SumAll => numbers.iter().sum(),
                    Shared::Center45 => {
                        if numbers[2] >= 5 {
                            5
                        } else {
                            4
                        }
                    }
                    Shared::DiffMinMax => numbers[HAND_SIZE - 1] - numbers[0],
                };
                AnswerValue::Number(value)
            }
        }
    }
}

/// A set of positions (0 to 4) in a sorted hand.
///
/// Iterates in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Positions {
    // Only the low 5 bits are used.
    bits: u8,
}

/// The error type for [`Positions::from_slots()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidSlot {
    pub slot: usize,
}

impl std::error::Error for InvalidSlot {}

impl std::fmt::Display for InvalidSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Position {} is outside of a hand of {} tiles",
            self.slot, HAND_SIZE
        )
    }
}

impl Positions {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn from_slots<I: IntoIterator<Item = usize>>(slots: I) -> Result<Self, InvalidSlot> {
        let mut positions = Self::new();
        for slot in slots {
            if slot >= HAND_SIZE {
                return Err(InvalidSlot { slot });
            }
            positions = positions.insert(slot);
        }
        Ok(positions)
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, slot: usize) -> bool {
        slot < HAND_SIZE && (self.bits & (1u8 << slot)) != 0
    }

    #[must_use]
    fn insert(self, slot: usize) -> Self {
        debug_assert!(slot < HAND_SIZE);
        Self {
            bits: self.bits | (1u8 << slot),
        }
    }

    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..HAND_SIZE).filter(move |&slot| self.contains(slot))
    }
}

impl FromIterator<usize> for Positions {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Positions::new(), |positions, slot| positions.insert(slot))
    }
}

impl std::fmt::Display for Positions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (idx, slot) in self.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", slot)?;
        }
        write!(f, ")")
    }
}

/// The value of an answer, without its question type.
///
/// This is the key by which candidates are grouped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnswerValue {
    Positions(Positions),
    Number(u8),
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerValue::Positions(positions) => write!(f, "{}", positions),
            AnswerValue::Number(number) => write!(f, "{}", number),
        }
    }
}

/// An answer to a question of the given type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Answer {
    question_type: QuestionType,
    value: AnswerValue,
}

/// The error type for [`Answer::new()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerShapeMismatch {
    pub question_type: QuestionType,
    pub value: AnswerValue,
}

impl std::error::Error for AnswerShapeMismatch {}

impl std::fmt::Display for AnswerShapeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "`{}` is not a valid answer to a {} question",
            self.value, self.question_type
        )
    }
}

impl Answer {
    /// Where-questions take positions, all others take a number.
    pub fn new(question_type: QuestionType, value: AnswerValue) -> Result<Self, AnswerShapeMismatch> {
        let shape_matches = matches!(
            (question_type, value),
            (QuestionType::Where, AnswerValue::Positions(_))
                | (
                    QuestionType::Count | QuestionType::Sum | QuestionType::Shared,
                    AnswerValue::Number(_)
                )
        );
        if shape_matches {
            Ok(Self {
                question_type,
                value,
            })
        } else {
            Err(AnswerShapeMismatch {
                question_type,
                value,
            })
        }
    }

    /// The answer the holder of `hand` gives to `question`.
    pub fn of(question: &Question, hand: &Hand) -> Self {
        Self {
            question_type: question.question_type(),
            value: question.evaluate(hand),
        }
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn value(&self) -> AnswerValue {
        self.value
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand;

    fn card(id: QuestionCardId) -> QuestionCard {
        QuestionCard {
            id,
            ja: String::new(),
            en: String::new(),
        }
    }

    fn ask(id: QuestionCardId, option: Option<u8>, hand: &Hand) -> AnswerValue {
        Question::new(card(id), option).unwrap().evaluate(hand)
    }

    fn positions(slots: &[usize]) -> AnswerValue {
        AnswerValue::Positions(Positions::from_slots(slots.iter().copied()).unwrap())
    }

    #[test]
    fn where_questions() {
        let hand = hand!("0r 1b 2r 2b 5");
        assert_eq!(ask(QuestionCardId::Where0, None, &hand), positions(&[0]));
        assert_eq!(ask(QuestionCardId::Where12, Some(2), &hand), positions(&[2, 3]));
        assert_eq!(ask(QuestionCardId::Where12, Some(1), &hand), positions(&[1]));
        assert_eq!(ask(QuestionCardId::Where5, None, &hand), positions(&[4]));
        assert_eq!(ask(QuestionCardId::Where89, Some(9), &hand), positions(&[]));
        assert_eq!(
            ask(QuestionCardId::WhereSequential, None, &hand),
            positions(&[0, 1])
        );
        assert_eq!(
            ask(QuestionCardId::WhereNeighboringSameColor, None, &hand),
            positions(&[])
        );
        let hand = hand!("1r 3r 4b 6b 8b");
        assert_eq!(
            ask(QuestionCardId::WhereNeighboringSameColor, None, &hand),
            positions(&[0, 2, 3])
        );
    }

    #[test]
    fn count_questions() {
        let hand = hand!("0r 1b 2r 2b 5");
        assert_eq!(ask(QuestionCardId::CountEven, None, &hand), AnswerValue::Number(3));
        assert_eq!(ask(QuestionCardId::CountOdd, None, &hand), AnswerValue::Number(2));
        assert_eq!(ask(QuestionCardId::CountRed, None, &hand), AnswerValue::Number(2));
        assert_eq!(ask(QuestionCardId::CountBlue, None, &hand), AnswerValue::Number(2));
        assert_eq!(ask(QuestionCardId::CountPairs, None, &hand), AnswerValue::Number(1));
        let hand = hand!("5 5 7r 7b 9r");
        assert_eq!(ask(QuestionCardId::CountPairs, None, &hand), AnswerValue::Number(2));
    }

    #[test]
    fn sum_questions() {
        let hand = hand!("1r 3b 5 7r 9b");
        assert_eq!(ask(QuestionCardId::Sum3Left, None, &hand), AnswerValue::Number(9));
        assert_eq!(ask(QuestionCardId::Sum3Middle, None, &hand), AnswerValue::Number(15));
        assert_eq!(ask(QuestionCardId::Sum3Right, None, &hand), AnswerValue::Number(21));
        assert_eq!(ask(QuestionCardId::SumRed, None, &hand), AnswerValue::Number(8));
        assert_eq!(ask(QuestionCardId::SumBlue, None, &hand), AnswerValue::Number(12));
    }

    #[test]
    fn shared_questions() {
        let hand = hand!("1r 3b 5 7r 9b");
        assert_eq!(ask(QuestionCardId::SharedSumAll, None, &hand), AnswerValue::Number(25));
        assert_eq!(ask(QuestionCardId::SharedCenter45, None, &hand), AnswerValue::Number(5));
        assert_eq!(ask(QuestionCardId::SharedDiffMinMax, None, &hand), AnswerValue::Number(8));
        let hand = hand!("0r 1r 4b 8r 9r");
        assert_eq!(ask(QuestionCardId::SharedCenter45, None, &hand), AnswerValue::Number(4));
    }

    #[test]
    fn options_are_checked() {
        assert_eq!(
            Question::new(card(QuestionCardId::Where12), Some(3)),
            Err(IllegalOption {
                card: QuestionCardId::Where12,
                option: Some(3)
            })
        );
        assert!(Question::new(card(QuestionCardId::Where12), None).is_err());
        assert!(Question::new(card(QuestionCardId::CountRed), Some(1)).is_err());
    }

    #[test]
    fn cards_expand_to_questions() {
        for id in QuestionCardId::ALL {
            let questions = card(id).to_questions();
            let expected = id.options().len().max(1);
            assert_eq!(questions.len(), expected, "{}", id);
            let options: Vec<Option<u8>> = questions.iter().map(Question::option).collect();
            if id.options().is_empty() {
                assert_eq!(options, vec![None]);
            } else {
                let listed: Vec<Option<u8>> = id.options().iter().map(|&o| Some(o)).collect();
                assert_eq!(options, listed);
            }
            for question in questions {
                assert_eq!(question.question_type(), id.question_type());
            }
        }
    }

    #[test]
    fn answer_shape() {
        assert!(Answer::new(QuestionType::Where, positions(&[1])).is_ok());
        assert!(Answer::new(QuestionType::Shared, AnswerValue::Number(4)).is_ok());
        assert!(Answer::new(QuestionType::Where, AnswerValue::Number(1)).is_err());
        assert!(Answer::new(QuestionType::Sum, positions(&[])).is_err());
    }

    #[test]
    fn positions_out_of_range() {
        assert_eq!(
            Positions::from_slots([0, 5]),
            Err(InvalidSlot { slot: 5 })
        );
        assert_eq!(positions(&[3, 1]).to_string(), "(1, 3)");
    }
}
