use log::{ info, warn };
use std::error::Error;
use tokio::io::{ AsyncBufRead, AsyncBufReadExt };
use tokio::task::{ JoinError, JoinSet };

use crate::controller::{ ChatController, ExchangeOutcome, LoadingState };

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    ListExamples,
    /// 1-based, as shown by `/examples`.
    Example(usize),
    Ask(String),
}

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed {
        "/quit" | "/exit" => Command::Quit,
        "/examples" => Command::ListExamples,
        _ => {
            if let Some(n) = trimmed.strip_prefix('/').and_then(|rest| rest.parse::<usize>().ok()) {
                return Command::Example(n);
            }
            Command::Ask(line.to_string())
        }
    }
}

/// Tally of the exchanges a console session settled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub resolved: usize,
    pub failed: usize,
}

impl SessionSummary {
    fn record(&mut self, joined: Result<ExchangeOutcome, JoinError>) -> Result<(), JoinError> {
        match joined?.state() {
            LoadingState::Resolved => self.resolved += 1,
            LoadingState::Failed => self.failed += 1,
            LoadingState::Absent => {}
        }
        Ok(())
    }

    pub fn total(&self) -> usize {
        self.resolved + self.failed
    }
}

/// Reads questions line by line until EOF or `/quit`. Each question runs as
/// its own task; the loop does not wait for an answer before reading the next
/// line. Finished tasks are reaped after every line.
pub async fn run_console<R>(
    controller: ChatController,
    input: R
) -> Result<SessionSummary, Box<dyn Error + Send + Sync>>
    where R: AsyncBufRead + Unpin
{
    controller.initialize();
    print_examples(&controller);

    let mut lines = input.lines();
    let mut in_flight: JoinSet<ExchangeOutcome> = JoinSet::new();
    let mut summary = SessionSummary::default();

    while let Some(line) = lines.next_line().await? {
        let question = match parse_command(&line) {
            Command::Quit => break,
            Command::ListExamples => {
                print_examples(&controller);
                None
            }
            Command::Example(n) => {
                let question = n
                    .checked_sub(1)
                    .and_then(|i| controller.examples().get(i))
                    .cloned();
                if question.is_none() {
                    warn!("No example question #{}", n);
                }
                question
            }
            Command::Ask(text) => Some(text),
        };

        // Blank lines come back as EmptyInput and are dropped.
        if let Some(pending) = question.and_then(|q| controller.begin(&q).ok()) {
            in_flight.spawn(pending.run());
        }

        while let Some(joined) = in_flight.try_join_next() {
            summary.record(joined)?;
        }
    }

    info!("Waiting for {} outstanding exchange(s)", in_flight.len());
    while let Some(joined) = in_flight.join_next().await {
        summary.record(joined)?;
    }
    Ok(summary)
}

fn print_examples(controller: &ChatController) {
    let examples = controller.examples();
    if examples.is_empty() {
        return;
    }
    println!("Example questions (type /N to ask):");
    for (i, q) in examples.iter().enumerate() {
        println!("  /{} {}", i + 1, q);
    }
}
