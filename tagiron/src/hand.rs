use std::ops::Deref;
use std::str::FromStr;

use crate::{Tile, TileFromStrErr};

pub const HAND_SIZE: usize = 5;

/// Five tiles, kept sorted.
///
/// Two hands are equal when their sorted tiles are equal, which also means the two
/// green fives are interchangeable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hand {
    tiles: [Tile; HAND_SIZE],
}

/// The error type for [`Hand::new()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidHand {
    /// Only the five exists twice.
    DuplicateTile(Tile),
    TooManyFives { count: usize },
}

impl std::error::Error for InvalidHand {}

impl std::fmt::Display for InvalidHand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidHand::DuplicateTile(tile) => {
                write!(f, "Tile {} appears more than once in the hand", tile)
            }
            InvalidHand::TooManyFives { count } => {
                write!(f, "Only two `5` tiles exist, but the hand has {}", count)
            }
        }
    }
}

impl Hand {
    /// Sorts the tiles and checks that they could all be dealt at once.
    pub fn new(mut tiles: [Tile; HAND_SIZE]) -> Result<Self, InvalidHand> {
        tiles.sort();
        let count = tiles.iter().filter(|tile| tile.is_five()).count();
        if count > 2 {
            return Err(InvalidHand::TooManyFives { count });
        }
        for pair in tiles.windows(2) {
            if pair[0] == pair[1] && !pair[0].is_five() {
                return Err(InvalidHand::DuplicateTile(pair[0]));
            }
        }
        Ok(Self { tiles })
    }

    // For tiles drawn from the universe, which are valid by construction.
    pub(crate) fn from_drawn(mut tiles: [Tile; HAND_SIZE]) -> Self {
        tiles.sort();
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile; HAND_SIZE] {
        &self.tiles
    }

    pub fn numbers(&self) -> [u8; HAND_SIZE] {
        self.tiles.map(Tile::number)
    }

    pub fn count_fives(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_five()).count()
    }
}

impl Deref for Hand {
    type Target = [Tile; HAND_SIZE];

    fn deref(&self) -> &Self::Target {
        &self.tiles
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, tile) in self.tiles.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", tile)?;
        }
        Ok(())
    }
}

/// The error type for the [`FromStr`] instance of [`Hand`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandFromStrErr {
    InvalidTile { text: String, err: TileFromStrErr },
    WrongTileCount { count: usize },
    InvalidHand(InvalidHand),
}

impl std::error::Error for HandFromStrErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HandFromStrErr::InvalidTile { err, .. } => Some(err),
            HandFromStrErr::InvalidHand(err) => Some(err),
            HandFromStrErr::WrongTileCount { .. } => None,
        }
    }
}

impl std::fmt::Display for HandFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandFromStrErr::InvalidTile { text, err } => {
                write!(f, "Could not read tile `{}`: {}", text, err)
            }
            HandFromStrErr::WrongTileCount { count } => {
                write!(f, "A hand has {} tiles, but {} were given", HAND_SIZE, count)
            }
            HandFromStrErr::InvalidHand(err) => write!(f, "{}", err),
        }
    }
}

/// Parses whitespace-separated tiles, e.g. `"1r 3b 5 7r 9b"`.
impl FromStr for Hand {
    type Err = HandFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles = s
            .split_whitespace()
            .map(|text| {
                text.parse::<Tile>().map_err(|err| HandFromStrErr::InvalidTile {
                    text: String::from(text),
                    err,
                })
            })
            .collect::<Result<Vec<Tile>, HandFromStrErr>>()?;
        let tiles: [Tile; HAND_SIZE] = tiles
            .try_into()
            .map_err(|tiles: Vec<Tile>| HandFromStrErr::WrongTileCount { count: tiles.len() })?;
        Hand::new(tiles).map_err(HandFromStrErr::InvalidHand)
    }
}

/// Shorthand for creating a hand from whitespace-separated tiles.
///
/// ```
/// # use tagiron::{hand, tile};
/// assert_eq!(hand!("9b 5 1r 7r 3b").tiles()[0], tile!("1r"));
/// ```
#[macro_export]
macro_rules! hand {
    ($s:literal) => {
        <$crate::Hand as std::str::FromStr>::from_str($s)
            .expect("Invalid hand given to hand! macro")
    };
}
#[allow(unused_imports)]
pub(crate) use hand;

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::tile;

    quickcheck! {
        fn tiles_are_sorted(hand: Hand) -> bool {
            hand.windows(2).all(|pair| pair[0] <= pair[1])
        }
    }

    quickcheck! {
        fn display_parses_back(hand: Hand) -> bool {
            hand.to_string().parse::<Hand>() == Ok(hand)
        }
    }

    #[test]
    fn sorted_on_construction() {
        let hand = hand!("9b 5 1r 7r 3b");
        assert_eq!(hand.to_string(), "1r 3b 5 7r 9b");
        assert_eq!(hand.numbers(), [1, 3, 5, 7, 9]);
        assert_eq!(hand, hand!("1r 3b 5 7r 9b"));
    }

    #[test]
    fn two_fives_are_fine() {
        let hand = hand!("5 5 0r 0b 9r");
        assert_eq!(hand.count_fives(), 2);
    }

    #[test]
    fn invalid_hands() {
        assert_eq!(
            "5 5 5 1r 2r".parse::<Hand>(),
            Err(HandFromStrErr::InvalidHand(InvalidHand::TooManyFives {
                count: 3
            }))
        );
        assert_eq!(
            "1r 1r 2b 3b 4b".parse::<Hand>(),
            Err(HandFromStrErr::InvalidHand(InvalidHand::DuplicateTile(
                tile!("1r")
            )))
        );
        assert_eq!(
            "1r 2b".parse::<Hand>(),
            Err(HandFromStrErr::WrongTileCount { count: 2 })
        );
        assert!(matches!(
            "1r 2b 3x 4b 6r".parse::<Hand>(),
            Err(HandFromStrErr::InvalidTile { .. })
        ));
    }
}
