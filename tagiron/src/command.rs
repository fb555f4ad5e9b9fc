/// Typing this at any prompt aborts the current command.
pub const CANCEL_INPUT: &str = "exit";

/// The commands of the interactive assistant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Ask the opponent a question and narrow the candidates by the answer.
    Question,
    /// A card was moved from the deck to the field.
    Add,
    /// The opponent asked a question.
    Opponent,
    /// A card was discarded from the field.
    Delete,
    /// Toggle listing all candidates.
    ShowAll,
    /// Show the history and travel to an earlier state.
    History,
    Finish,
    Restart,
}

/// The error type for [`Command::parse()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    Unknown { input: String },
    Ambiguous { input: String, matches: Vec<Command> },
}

impl std::error::Error for ParseCommandError {}

impl std::fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseCommandError::Unknown { input } => write!(f, "Unknown command `{}`", input),
            ParseCommandError::Ambiguous { input, matches } => {
                let names: Vec<&str> = matches.iter().map(|c| c.name()).collect();
                write!(
                    f,
                    "`{}` could be any of `{}`",
                    input,
                    names.join("`, `")
                )
            }
        }
    }
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::Question,
        Command::Add,
        Command::Opponent,
        Command::Delete,
        Command::ShowAll,
        Command::History,
        Command::Finish,
        Command::Restart,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Question => "question",
            Command::Add => "add",
            Command::Opponent => "opponent",
            Command::Delete => "delete",
            Command::ShowAll => "show_all",
            Command::History => "history",
            Command::Finish => "finish",
            Command::Restart => "restart",
        }
    }

    /// Resolves a (case-sensitive) prefix of a command name.
    ///
    /// Empty input is not an error, it yields `None`.
    pub fn parse(input: &str) -> Result<Option<Command>, ParseCommandError> {
        if input.is_empty() {
            return Ok(None);
        }
        let matches: Vec<Command> = Command::ALL
            .into_iter()
            .filter(|command| command.name().starts_with(input))
            .collect();
        match matches.as_slice() {
            [] => Err(ParseCommandError::Unknown {
                input: String::from(input),
            }),
            [command] => Ok(Some(*command)),
            _ => Err(ParseCommandError::Ambiguous {
                input: String::from(input),
                matches,
            }),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether the input aborts the current command.
pub fn is_cancel(input: &str) -> bool {
    input == CANCEL_INPUT
}
