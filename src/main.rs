mod app;
mod cli;
mod export;
mod llm;
mod markdown;
mod normalize;
mod paper;
mod repl;
mod research;
mod session;
mod sources;
mod translate;

pub const USER_AGENT: &str = concat!("litscout/", env!("CARGO_PKG_VERSION"));

use std::process::ExitCode;

use app::Assistant;
use clap::Parser;
use cli::Args;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // A missing .env file is fine; variables may come from the environment.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("litscout=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let mut assistant = match Assistant::new(args.settings()) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    let Some(topic) = args.topic.as_deref() else {
        info!("starting interactive session");
        let stdin = BufReader::new(tokio::io::stdin());
        repl::run(&mut assistant, stdin, tokio::io::stdout()).await?;
        return Ok(ExitCode::SUCCESS);
    };

    match cli::run_once(&mut assistant, topic, &args.questions, args.export).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("{}", repl::report(e.severity(), &e.user_message()));
            Ok(ExitCode::FAILURE)
        }
    }
}
