use std::path::PathBuf;

use clap::Parser;

use crate::app::{AppError, Assistant, DEFAULT_LIMIT, Settings};
use crate::export::DEFAULT_FILE_NAME;
use crate::translate::Language;

/// Search Crossref and arXiv for a topic, summarize the papers with an LLM,
/// answer questions about them and export the results to PDF.
///
/// Without --topic an interactive prompt is started.
#[derive(Debug, Parser)]
#[command(name = "litscout", version, about)]
pub struct Args {
    /// Research topic to fetch immediately
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Papers requested from each source
    #[arg(short, long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub limit: u8,

    /// Language of the summaries
    #[arg(long, value_enum, default_value_t = Language::English)]
    pub lang: Language,

    /// Question to answer after fetching (repeatable)
    #[arg(short, long = "question", requires = "topic")]
    pub questions: Vec<String>,

    /// Write the results to a PDF after fetching
    #[arg(short, long, requires = "topic")]
    pub export: bool,

    /// PDF path used by --export and the interactive `export` command
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    pub output: PathBuf,
}

impl Args {
    pub fn settings(&self) -> Settings {
        Settings {
            limit: self.limit,
            language: self.lang,
            output: self.output.clone(),
        }
    }
}

/// Fetch, print, answer each question, then optionally export.
/// A failed question is reported and the remaining ones still run.
pub async fn run_once(
    assistant: &mut Assistant,
    topic: &str,
    questions: &[String],
    export: bool,
) -> Result<(), AppError> {
    let count = assistant.fetch(topic).await?;
    println!("Fetched {count} papers.\n");
    println!("{}", assistant.show()?);

    for question in questions {
        match assistant.ask(question).await {
            Ok(answer) => println!("Q: {question}\nA: {answer}\n"),
            Err(e) => eprintln!("{}", crate::repl::report(e.severity(), &e.user_message())),
        }
    }

    if export {
        let written = assistant.export(None)?;
        println!("Saved {}", written.display());
    }
    Ok(())
}
