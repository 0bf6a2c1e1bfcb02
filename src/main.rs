//! Examiner Desk - terminal client for the History Examiner backend
//!
//! Questions are submitted under a mark allocation and the structured
//! answers are rendered as they arrive.

mod blocks;
mod config;
mod controller;
mod examiner;
mod marks;
mod render;
mod state_machine;
mod transcript;

use config::ExaminerConfig;
use controller::{ControllerEvent, ControllerHandle, ConversationController, SubmitOutcome};
use examiner::{HttpExaminer, LoggingExaminer};
use marks::MarkTier;
use state_machine::{AdmissionRejected, Phase, Session};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use transcript::{InMemoryTranscript, Role};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ANALYZING: &str = "Analyzing sources...";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = ExaminerConfig::from_env()?;

    // Logs go to stderr so they never interleave with answers on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "examiner_desk=info".into()),
        )
        .with(config.log_json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr)
        }))
        .with((!config.log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let http = HttpExaminer::new(&config.api_url, config.timeout)?;
    tracing::info!(endpoint = %http.endpoint(), timeout = ?config.timeout, "Examiner client ready");

    let session = config.default_marks.map_or_else(Session::new, Session::with_marks);
    let handle = ConversationController::spawn(
        LoggingExaminer::new(http),
        Arc::new(InMemoryTranscript::new()),
        session,
    );

    let printer = tokio::spawn(print_events(handle.subscribe(), std::io::stdout()));

    print_lines(&render::render_rubric(config.default_marks));
    println!("Commands: /marks <4|7|14>, /rubric, /history, /quit. Anything else is asked.");

    let exit = run_repl(handle, BufReader::new(tokio::io::stdin())).await?;
    match exit {
        Exit::Quit => printer.abort(),
        // The controller stops once the last handle is gone, which closes
        // the event stream after the final answer has been printed
        Exit::EndOfInput => {
            printer.await??;
        }
    }
    Ok(())
}

/// How the REPL loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Quit,
    EndOfInput,
}

/// Read commands until `/quit` or end of input.
///
/// At end of input an in-flight request is awaited so piped questions still
/// get their answers.
async fn run_repl<R>(handle: ControllerHandle, input: R) -> Result<Exit, BoxError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            None => {}
            Some(Command::Quit) => return Ok(Exit::Quit),
            Some(Command::Rubric) => {
                print_lines(&render::render_rubric(handle.snapshot().pending_marks));
            }
            Some(Command::History) => show_history(&handle).await,
            Some(Command::Marks(raw)) => match raw.parse::<MarkTier>() {
                Ok(tier) => {
                    handle.select_marks(tier).await?;
                    println!("Mark allocation set to {tier}.");
                }
                Err(e) => println!("{e}"),
            },
            Some(Command::Ask(question)) => {
                handle.update_draft(question).await?;
                if let SubmitOutcome::Rejected(reason) = handle.submit().await? {
                    println!("{}", rejection_hint(reason));
                }
            }
        }
    }

    handle.wait_idle().await?;
    Ok(Exit::EndOfInput)
}

/// One line of REPL input
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Marks(String),
    Rubric,
    History,
    Quit,
    Ask(String),
}

impl Command {
    /// `None` for blank lines; unrecognised text is asked verbatim
    fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(arg) = trimmed.strip_prefix("/marks") {
            if arg.is_empty() || arg.starts_with(char::is_whitespace) {
                return Some(Command::Marks(arg.trim().to_string()));
            }
        }
        Some(match trimmed {
            "/rubric" => Command::Rubric,
            "/history" => Command::History,
            "/quit" | "/exit" => Command::Quit,
            _ => Command::Ask(line.to_string()),
        })
    }
}

fn rejection_hint(reason: AdmissionRejected) -> &'static str {
    match reason {
        AdmissionRejected::NoTierSelected => {
            "Select a mark allocation first with /marks 4, /marks 7 or /marks 14."
        }
        AdmissionRejected::EmptyDraft => "Nothing to ask.",
        AdmissionRejected::RequestInFlight => "Still waiting for the examiner, try again shortly.",
    }
}

/// Write answers and progress to `out` until the controller stops
async fn print_events<W: Write>(
    mut rx: tokio::sync::broadcast::Receiver<ControllerEvent>,
    mut out: W,
) -> std::io::Result<W> {
    loop {
        match rx.recv().await {
            Ok(ControllerEvent::TurnAppended(turn)) if turn.role == Role::Assistant => {
                for line in render::render_turn(&turn) {
                    writeln!(out, "{line}")?;
                }
            }
            Ok(ControllerEvent::PhaseChanged(Phase::Sending { .. })) => writeln!(out, "{ANALYZING}")?,
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Display fell behind, some events were not shown");
            }
            Err(RecvError::Closed) => break,
        }
        out.flush()?;
    }
    Ok(out)
}

async fn show_history(handle: &ControllerHandle) {
    let turns = handle.transcript().await;
    if turns.is_empty() {
        println!("No questions asked yet.");
        return;
    }
    for turn in &turns {
        print_lines(&render::render_turn(turn));
        println!();
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
