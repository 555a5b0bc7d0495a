use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{CardApi, HttpCardApi};
use ui::{App, AppContext};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct Args {
    api_url: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <base_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api {}", services::DEFAULT_BASE_URL);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RECALL_API_URL");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    let value = args
                        .next()
                        .ok_or(ArgsError::MissingValue { flag: "--api" })?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api_url = Some(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { api_url })
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // CLI beats the environment; both fall back to the local backend.
    let api = match args.api_url {
        Some(url) => HttpCardApi::new(url),
        None => HttpCardApi::from_env(),
    };
    let cards: Arc<dyn CardApi> = Arc::new(api);
    let context = AppContext::new(cards);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Recall")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
