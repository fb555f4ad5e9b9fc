pub use candidates::*;
pub use catalog::*;
pub use command::*;
pub use entropy::*;
pub use errors::*;
pub use hand::*;
pub use question::*;
pub use state::*;
pub use tile::*;
pub use timeline::*;

#[cfg(test)]
mod arbitrary;
mod candidates;
mod catalog;
mod command;
mod entropy;
mod errors;
mod hand;
mod question;
mod state;
mod tile;
mod timeline;
