//! Interactive operator console.
//!
//! Reads one command per line, runs it to completion against the [`Session`],
//! then redraws the queue. Reports go through a yes/no confirmation before
//! anything is sent to the remote bracket.

pub mod command;
pub mod render;

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

use crate::state::{ReportOutcome, Session, queue::RefreshOutcome};

use self::command::{Command, ParseError};

/// Printed on the refresh where the last open match disappears.
pub const COMPLETED_MESSAGE: &str = "Tournament is completed!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Line-driven front end owning the session for its whole lifetime.
pub struct Console<R, W> {
    session: Session,
    lines: Lines<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// Console reading commands from `input` and printing to `out`.
    pub fn new(session: Session, input: R, out: W) -> Self {
        Self {
            session,
            lines: input.lines(),
            out,
        }
    }

    /// Give back the session and the output sink.
    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.out)
    }

    /// Tell the operator about anything notable in a refresh.
    pub fn announce(&mut self, outcome: &RefreshOutcome) -> io::Result<()> {
        if outcome.tournament_completed {
            writeln!(self.out, "{COMPLETED_MESSAGE}")?;
        }
        Ok(())
    }

    /// Run until `quit` or end of input.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_queue()?;
            write!(self.out, "> ")?;
            self.out.flush()?;

            let Some(line) = self.lines.next_line().await? else {
                writeln!(self.out)?;
                return Ok(());
            };

            let flow = self.handle_line(&line).await?;
            writeln!(self.out)?;
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    async fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(ParseError::Empty) => {
                self.print_help()?;
                return Ok(Flow::Continue);
            }
            Err(err @ ParseError::Unknown(_)) => {
                writeln!(self.out, "{err}")?;
                self.print_help()?;
                return Ok(Flow::Continue);
            }
            Err(err @ ParseError::Usage(_)) => {
                writeln!(self.out, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        debug!(?command, "dispatching command");
        match command {
            Command::Update => self.refresh().await?,
            Command::Start { identifier } => {
                if let Err(err) = self.session.toggle(&identifier) {
                    writeln!(self.out, "{err}")?;
                }
            }
            Command::Report { identifier, score } => self.report(&identifier, &score).await?,
            Command::Help => self.print_help()?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn refresh(&mut self) -> io::Result<()> {
        match self.session.refresh().await {
            Ok(outcome) => self.announce(&outcome),
            Err(err) => writeln!(self.out, "update failed: {err}"),
        }
    }

    async fn report(&mut self, identifier: &str, score: &str) -> io::Result<()> {
        let plan = match self.session.plan_report(identifier, score) {
            Ok(plan) => plan,
            Err(err) => return writeln!(self.out, "{err}"),
        };

        if !self.confirm(&plan.confirmation_question()).await? {
            debug!(%identifier, "report declined");
            return Ok(());
        }

        match self.session.report(&plan).await {
            Ok(ReportOutcome::Refreshed(outcome)) => self.announce(&outcome),
            Ok(ReportOutcome::Stale(err)) => {
                writeln!(self.out, "result recorded, but update failed: {err}")
            }
            Err(err) => {
                writeln!(self.out, "report failed: {err}")?;
                if err.is_retryable() {
                    writeln!(self.out, "nothing was recorded; reissue the command to retry.")?;
                }
                Ok(())
            }
        }
    }

    /// Ask a yes/no question; only `y` or `yes` count as yes.
    async fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.out, "{question} [y/N] ")?;
        self.out.flush()?;

        let answer = self.lines.next_line().await?.unwrap_or_default();
        let answer = answer.trim().to_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }

    fn print_queue(&mut self) -> io::Result<()> {
        for line in render::queue_lines(self.session.queue()) {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    fn print_help(&mut self) -> io::Result<()> {
        for line in render::help_lines() {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }
}
