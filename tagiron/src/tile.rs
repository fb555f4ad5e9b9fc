use std::str::FromStr;

/// The color of a [tile](Tile).
///
/// The declaration order is the order used to break ties between tiles of
/// the same number.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
}

/// A numbered tile.
///
/// Every number except 5 exists once in [red](Color::Red) and once in
/// [blue](Color::Blue). The 5 is always [green](Color::Green), and there are
/// two of them.
///
/// Tiles are ordered by number first, then by color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile {
    number: u8,
    color: Color,
}

/// The error type for [`Tile::new()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidTile {
    pub number: u8,
    pub color: Color,
}

impl std::error::Error for InvalidTile {}

impl std::fmt::Display for InvalidTile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "There is no tile with number {} and color {:?}",
            self.number, self.color
        )
    }
}

impl Tile {
    pub fn new(number: u8, color: Color) -> Result<Self, InvalidTile> {
        let exists = match (number, color) {
            (5, Color::Green) => true,
            (5, _) | (_, Color::Green) => false,
            (n, _) => n <= 9,
        };
        if exists {
            Ok(Self { number, color })
        } else {
            Err(InvalidTile { number, color })
        }
    }

    const fn raw(number: u8, color: Color) -> Self {
        Self { number, color }
    }

    pub fn number(self) -> u8 {
        self.number
    }

    pub fn color(self) -> Color {
        self.color
    }

    pub fn is_five(self) -> bool {
        self.number == 5
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.color {
            Color::Red => write!(f, "{}r", self.number),
            Color::Blue => write!(f, "{}b", self.number),
            Color::Green => write!(f, "{}", self.number),
        }
    }
}

/// The error type for the [`FromStr`] instance of [`Tile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileFromStrErr {
    Empty,
    InvalidNumber,
    MissingColor,
    InvalidColor,
    TrailingChars,
    NoSuchTile(InvalidTile),
}

impl std::error::Error for TileFromStrErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TileFromStrErr::NoSuchTile(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for TileFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileFromStrErr::Empty => write!(f, "Tile must not be empty"),
            TileFromStrErr::InvalidNumber => {
                write!(f, "First character must be between `0` and `9`")
            }
            TileFromStrErr::MissingColor => {
                write!(f, "Tile needs a color, `r` or `b` (only `5` may omit it)")
            }
            TileFromStrErr::InvalidColor => write!(f, "Second character must be `r` or `b`"),
            TileFromStrErr::TrailingChars => write!(f, "Tile must be at most two characters"),
            TileFromStrErr::NoSuchTile(err) => write!(f, "{}", err),
        }
    }
}

/// Parses `<digit><color>`, where the color is `r` or `b` (case-insensitive).
/// The green five is written `5` or `5g`.
impl FromStr for Tile {
    type Err = TileFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let number = chars
            .next()
            .ok_or(TileFromStrErr::Empty)?
            .to_digit(10)
            .ok_or(TileFromStrErr::InvalidNumber)? as u8;
        let color_char = chars.next();
        if chars.next().is_some() {
            return Err(TileFromStrErr::TrailingChars);
        }
        let color = match (number, color_char.map(|c| c.to_ascii_lowercase())) {
            (5, None) => Color::Green,
            (_, None) => return Err(TileFromStrErr::MissingColor),
            (_, Some('r')) => Color::Red,
            (_, Some('b')) => Color::Blue,
            (_, Some('g')) => Color::Green,
            (_, Some(_)) => return Err(TileFromStrErr::InvalidColor),
        };
        Tile::new(number, color).map_err(TileFromStrErr::NoSuchTile)
    }
}

/// Shorthand for creating tiles from a short string such as `"7r"`, `"2b"` or `"5"`.
///
/// This macro is just calling the [`FromStr`] instance of [`Tile`].
/// ```
/// # use tagiron::{tile, Color, Tile};
/// assert_eq!(tile!("7r"), Tile::new(7, Color::Red).unwrap());
/// ```
#[macro_export]
macro_rules! tile {
    ($s:literal) => {
        <$crate::Tile as std::str::FromStr>::from_str($s)
            .expect("Invalid tile code given to tile! macro")
    };
}
#[allow(unused_imports)]
pub(crate) use tile;

/// Every physical tile of the game, in ascending order.
///
/// The green five appears twice, since two indistinguishable copies exist.
pub static TILE_UNIVERSE: [Tile; 20] = [
    Tile::raw(0, Color::Red),
    Tile::raw(0, Color::Blue),
    Tile::raw(1, Color::Red),
    Tile::raw(1, Color::Blue),
    Tile::raw(2, Color::Red),
    Tile::raw(2, Color::Blue),
    Tile::raw(3, Color::Red),
    Tile::raw(3, Color::Blue),
    Tile::raw(4, Color::Red),
    Tile::raw(4, Color::Blue),
    Tile::raw(5, Color::Green),
    Tile::raw(5, Color::Green),
    Tile::raw(6, Color::Red),
    Tile::raw(6, Color::Blue),
    Tile::raw(7, Color::Red),
    Tile::raw(7, Color::Blue),
    Tile::raw(8, Color::Red),
    Tile::raw(8, Color::Blue),
    Tile::raw(9, Color::Red),
    Tile::raw(9, Color::Blue),
];
