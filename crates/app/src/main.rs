use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Catalog, QuizService};
use tracing::info;
use tracing_subscriber::EnvFilter;
use triage_core::model::DEFAULT_RECOMMENDATION;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidContentPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidContentPath { raw } => write!(f, "invalid --content value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_service: Arc<QuizService>,
}

impl UiApp for DesktopApp {
    fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    content: Option<PathBuf>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--content <path>]");
    eprintln!("  cargo run -p app -- check [--content <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --content  bundled triage quiz");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIAGE_CONTENT, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env_content: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut content = env_content
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--content" => {
                    let value = require_value(args, "--content")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidContentPath { raw: value });
                    }
                    content = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { content })
    }

    fn load_catalog(&self) -> Result<Catalog, services::CatalogError> {
        match &self.content {
            Some(path) => Catalog::from_path(path),
            None => Catalog::bundled(),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn check(catalog: &Catalog) {
    let graph = catalog.graph();
    let recommendations = catalog.recommendations();
    let terminals = graph.terminal_options().count();
    let unmapped = graph
        .terminal_options()
        .filter(|(question, option)| recommendations.get(question.id(), option.id()).is_none())
        .count();

    println!("{}", catalog.title());
    println!("  root:             {} ({})", graph.root_id(), graph.root().text());
    println!("  questions:        {}", graph.len());
    println!("  terminal options: {terminals}");
    println!("  recommendations:  {}", recommendations.len());
    if unmapped > 0 {
        println!("  {unmapped} terminal option(s) will show: {DEFAULT_RECOMMENDATION:?}");
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, std::env::var("TRIAGE_CONTENT").ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    let catalog = parsed.load_catalog()?;

    match cmd {
        Command::Check => {
            check(&catalog);
            Ok(())
        }
        Command::Ui => {
            let quiz_service = Arc::new(QuizService::new(&catalog));
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                quiz_service: Arc::clone(&quiz_service),
            });
            let context = build_app_context(&app);

            info!(title = %quiz_service.title(), "launching desktop window");

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            // Explicitly disable it so the app doesn't behave like a modal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(quiz_service.title())
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
    }
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
