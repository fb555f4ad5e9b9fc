use std::io::{BufRead, Write};

use tagiron::{
    Answer, AnswerValue, Command, GameState, IllegalTransition, Question, QuestionType, Timeline,
};
use tracing::{debug, info, warn};

use crate::{
    clear_screen, print_border, show_cards, show_dashboard, show_history, show_question_scores,
    Config, EndOfInput, Prompter,
};

const COMMAND_HINT: &str = "`q[uestion]` / `a[dd]` / `o[pponent]` / `d[elete]` / \
                            `s[how_all]` / `h[istory]` / `f[inish]` / `r[estart]`";

/// What a command led to.
enum Outcome {
    Next(GameState),
    Traveled(usize),
    Cancelled,
    Message(String),
}

impl From<Result<GameState, IllegalTransition>> for Outcome {
    fn from(result: Result<GameState, IllegalTransition>) -> Self {
        match result {
            Ok(next) => Outcome::Next(next),
            Err(err) => {
                warn!(%err, "Rejected transition");
                Outcome::Message(err.to_string())
            }
        }
    }
}

/// One game: a command loop over a [`Timeline`].
pub struct Session<'a, R, W> {
    prompter: &'a mut Prompter<R, W>,
    config: &'a Config,
    timeline: Timeline,
    message: String,
    show_all: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(prompter: &'a mut Prompter<R, W>, config: &'a Config, initial: GameState) -> Self {
        Self {
            prompter,
            config,
            timeline: Timeline::new(initial),
            message: String::new(),
            show_all: false,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Runs commands until `finish` or `restart`, and returns whether to restart.
    ///
    /// The end of the input counts as `finish`.
    pub fn run(&mut self) -> anyhow::Result<bool> {
        match self.command_loop() {
            Err(err) if err.is::<EndOfInput>() => {
                info!("Input ended, finishing");
                Ok(false)
            }
            result => result,
        }
    }

    fn command_loop(&mut self) -> anyhow::Result<bool> {
        loop {
            self.render_dashboard(true)?;
            writeln!(self.prompter.output(), "{}", COMMAND_HINT)?;
            let line = self.prompter.read_line("$")?;
            self.message.clear();
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    self.message = err.to_string();
                    continue;
                }
            };
            debug!(command = %command, "Running command");
            let outcome = match command {
                Command::Question => self.question()?,
                Command::Add => self.add()?,
                Command::Opponent => self.opponent()?,
                Command::Delete => self.delete()?,
                Command::ShowAll => {
                    self.show_all = !self.show_all;
                    let state = if self.show_all { "on" } else { "off" };
                    Outcome::Message(format!("Listing all candidates is {}", state))
                }
                Command::History => self.history()?,
                Command::Finish | Command::Restart => {
                    info!(command = %command, "Game over");
                    return Ok(command == Command::Restart);
                }
            };
            match outcome {
                Outcome::Next(next) => self.timeline.record(next),
                Outcome::Traveled(idx) => {
                    self.message = format!("Traveled to state [{}]", idx);
                }
                Outcome::Cancelled => self.message = format!("Cancelled `{}`", command),
                Outcome::Message(message) => self.message = message,
            }
        }
    }

    fn render_dashboard(&mut self, with_message: bool) -> anyhow::Result<()> {
        let out = self.prompter.output();
        if self.config.clear_screen {
            clear_screen(out)?;
        }
        let message = if with_message { self.message.as_str() } else { "" };
        show_dashboard(
            out,
            self.timeline.current(),
            message,
            self.show_all,
            self.config.lang,
        )?;
        Ok(())
    }

    // Lists the questions of the field and lets the player pick one.
    fn choose_question(&mut self, message: &str) -> anyhow::Result<Option<Question>> {
        let mut scores = self.timeline.current().question_scores();
        self.render_dashboard(false)?;
        show_question_scores(self.prompter.output(), &scores, self.config.lang)?;
        let idx = self.prompter.input_index(message, scores.len())?;
        Ok(idx.map(|idx| scores.swap_remove(idx).question))
    }

    fn input_answer(&mut self, question: &Question) -> anyhow::Result<Option<Answer>> {
        writeln!(self.prompter.output(), "Asked {}", question)?;
        let value = match question.question_type() {
            QuestionType::Where => self
                .prompter
                .input_positions("Answer:")?
                .map(AnswerValue::Positions),
            _ => self
                .prompter
                .input_number("Answer:")?
                .map(AnswerValue::Number),
        };
        match value {
            Some(value) => Ok(Some(Answer::new(question.question_type(), value)?)),
            None => Ok(None),
        }
    }

    fn question(&mut self) -> anyhow::Result<Outcome> {
        if self.timeline.current().field().is_empty() {
            return Ok(Outcome::Message(String::from(
                "No question card in the field, `add` one first",
            )));
        }
        let Some(question) = self.choose_question("Which question do you ask?")? else {
            return Ok(Outcome::Cancelled);
        };
        let Some(answer) = self.input_answer(&question)? else {
            return Ok(Outcome::Cancelled);
        };
        Ok(self
            .timeline
            .current()
            .narrow_by_answer(&question, &answer)
            .into())
    }

    fn opponent(&mut self) -> anyhow::Result<Outcome> {
        if self.timeline.current().field().is_empty() {
            return Ok(Outcome::Message(String::from(
                "No question card in the field, `add` one first",
            )));
        }
        let Some(question) = self.choose_question("Which question did the opponent ask?")? else {
            return Ok(Outcome::Cancelled);
        };
        let answer = if question.question_type() == QuestionType::Shared {
            match self.input_answer(&question)? {
                Some(answer) => Some(answer),
                None => return Ok(Outcome::Cancelled),
            }
        } else {
            None
        };
        Ok(self
            .timeline
            .current()
            .opponent_ask(&question, answer.as_ref())
            .into())
    }

    fn add(&mut self) -> anyhow::Result<Outcome> {
        let len = self.timeline.current().deck().len();
        if len == 0 {
            return Ok(Outcome::Message(String::from("The deck is empty")));
        }
        self.render_dashboard(false)?;
        let out = self.prompter.output();
        writeln!(out, "Awaiting question cards:")?;
        show_cards(out, self.timeline.current().deck(), self.config.lang, true)?;
        print_border(out)?;
        let Some(idx) = self.prompter.input_index("Which card has been added?", len)? else {
            return Ok(Outcome::Cancelled);
        };
        Ok(self.timeline.current().add_question_card(idx).into())
    }

    fn delete(&mut self) -> anyhow::Result<Outcome> {
        let len = self.timeline.current().field().len();
        if len == 0 {
            return Ok(Outcome::Message(String::from("The field is empty")));
        }
        self.render_dashboard(false)?;
        let out = self.prompter.output();
        writeln!(out, "Current question cards:")?;
        show_cards(out, self.timeline.current().field(), self.config.lang, true)?;
        print_border(out)?;
        let Some(idx) = self.prompter.input_index("Which card has been deleted?", len)? else {
            return Ok(Outcome::Cancelled);
        };
        Ok(self.timeline.current().delete_question_card(idx).into())
    }

    fn history(&mut self) -> anyhow::Result<Outcome> {
        self.render_dashboard(false)?;
        show_history(self.prompter.output(), &self.timeline)?;
        let len = self.timeline.len();
        let Some(idx) = self.prompter.input_index("Travel to which state?", len)? else {
            return Ok(Outcome::Cancelled);
        };
        self.timeline.travel_to(idx)?;
        Ok(Outcome::Traveled(idx))
    }
}
