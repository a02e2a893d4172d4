//! Line-oriented command loop over stdin.

use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::app::{AppError, Assistant, Severity};
use crate::translate::Language;

const HELP: &str = "\
Commands:
  fetch <topic>     search Crossref and arXiv, then summarize the results
  ask <question>    ask a question about the fetched papers
  show              print the fetched papers
  export [path]     write the papers to a PDF (default: configured output)
  lang <language>   english | urdu | arabic (applies to the next fetch)
  limit <n>         results per source, 1 to 10 (applies to the next fetch)
  help              show this message
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch(String),
    Ask(String),
    Show,
    Export(Option<PathBuf>),
    Lang(Language),
    Limit(String),
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list.")]
    Unknown(String),

    #[error("Unknown language '{0}'. Choose english, urdu or arabic.")]
    UnknownLanguage(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        let cmd = match word.to_ascii_lowercase().as_str() {
            "fetch" => Command::Fetch(rest.to_string()),
            "ask" => Command::Ask(rest.to_string()),
            "show" => Command::Show,
            "export" => Command::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "lang" | "language" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("lang english|urdu|arabic"));
                }
                let lang = Language::parse(rest)
                    .ok_or_else(|| CommandError::UnknownLanguage(rest.to_string()))?;
                Command::Lang(lang)
            }
            "limit" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("limit <1-10>"));
                }
                Command::Limit(rest.to_string())
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(Some(cmd))
    }
}

enum Flow {
    Continue(String),
    Quit,
}

async fn execute(assistant: &mut Assistant, cmd: Command) -> Result<Flow, AppError> {
    let text = match cmd {
        Command::Fetch(topic) => {
            let count = assistant.fetch(&topic).await?;
            format!("Fetched {count} papers.\n\n{}", assistant.show()?)
        }
        Command::Ask(question) => assistant.ask(&question).await?,
        Command::Show => assistant.show()?,
        Command::Export(path) => {
            let written = assistant.export(path.as_deref())?;
            format!("Saved {}", written.display())
        }
        Command::Lang(lang) => {
            assistant.set_language(lang);
            format!("Summaries will be in {lang}.")
        }
        Command::Limit(raw) => {
            let n = raw
                .parse::<u8>()
                .map_err(|_| AppError::InvalidLimit(raw.clone()))?;
            assistant.set_limit(n)?;
            format!("Fetching up to {n} papers per source.")
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Flow::Quit),
    };
    Ok(Flow::Continue(text))
}

/// Prefix used when printing an error of the given severity.
pub fn report(severity: Severity, message: &str) -> String {
    match severity {
        Severity::Warning => format!("Warning: {message}"),
        Severity::Failure => format!("Error: {message}"),
    }
}

/// Read commands until `quit` or end of input.
pub async fn run<R, W>(assistant: &mut Assistant, input: R, mut out: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let s = assistant.settings();
    let banner = format!(
        "litscout: {} papers per source, summaries in {}. Type 'help' for commands.\n",
        s.limit, s.language
    );
    out.write_all(banner.as_bytes()).await?;

    loop {
        out.write_all(b"> ").await?;
        out.flush().await?;

        let Some(line) = lines.next_line().await? else {
            info!("input closed");
            break;
        };

        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                let msg = report(Severity::Warning, &e.to_string());
                out.write_all(format!("{msg}\n").as_bytes()).await?;
                continue;
            }
        };
        debug!(?cmd, "command");

        let text = match execute(assistant, cmd).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue(text)) => text,
            Err(e) => {
                if e.severity() == Severity::Failure {
                    tracing::error!(error = %e, "command failed");
                }
                report(e.severity(), &e.user_message())
            }
        };
        out.write_all(format!("{text}\n").as_bytes()).await?;
    }

    Ok(())
}
