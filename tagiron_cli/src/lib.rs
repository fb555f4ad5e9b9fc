mod prompt;
mod render;
mod session;
pub use prompt::*;
pub use render::*;
pub use session::*;

use std::io::{BufRead, Write};

use tagiron::{GameState, Hand, QuestionCard};
use tracing::info;

/// Which text of the question cards to show.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Lang {
    Ja,
    En,
}

pub struct Config {
    pub lang: Lang,
    pub clear_screen: bool,
}

/// Plays games until the player finishes or the input ends.
///
/// `hand` is used for the first game only; later games prompt for a hand.
pub fn play<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &Config,
    catalog: &[QuestionCard],
    mut hand: Option<Hand>,
) -> anyhow::Result<()> {
    loop {
        let hand = match hand.take() {
            Some(hand) => hand,
            None => match prompter.input_hand(config) {
                Ok(hand) => hand,
                Err(err) if err.is::<EndOfInput>() => return Ok(()),
                Err(err) => return Err(err),
            },
        };
        let initial = GameState::new(hand, catalog.to_vec());
        info!(hand = %hand, candidates = initial.candidates().len(), "Starting game");
        let restart = Session::new(prompter, config, initial).run()?;
        if !restart {
            return Ok(());
        }
        info!("Restarting");
    }
}
