use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use parenting_pulse::config::{self, Config};
use parenting_pulse::flow::Flow;
use parenting_pulse::output;
use parenting_pulse::scoring::{self, QuestionCatalog};
use parenting_pulse::stderr_buffer::StderrWriter;
use parenting_pulse::tui;

const EXIT_SUCCESS: i32 = 0;
const EXIT_RUNTIME: i32 = 1;
const EXIT_CONFIG: i32 = 4;
const EXIT_INPUT: i32 = 5;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take the questionnaire interactively (default if no subcommand)
    Survey {
        /// Write the session's assessments to this file as JSON on exit
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Score a YAML answer file ({question_id: 0|1|2}) without the TUI
    Score {
        /// Path to the answers file
        answers: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the question catalog
    Questions,
    /// Write a default config file with the built-in questions
    Init {
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "parenting-pulse")]
#[command(about = "Parenting style questionnaire", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/parenting-pulse/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Initialize tracing, writing through the stderr buffer
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(|| StderrWriter),
        )
        .init();
}

fn load_catalog(config: &Config) -> QuestionCatalog {
    let catalog = config.catalog();
    if let Err(errors) = scoring::validate_catalog(&catalog) {
        eprintln!("Question catalog errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    if catalog.is_empty() {
        eprintln!("No questions configured. Remove the empty `questions:` list to use the built-in set.");
        std::process::exit(EXIT_CONFIG);
    }
    catalog
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Survey { export: None });
    let config_path = cli.config.map(PathBuf::from);

    // Init writes the config, so it must not require a readable one
    if let Commands::Init { force } = command {
        match config::run_init(config_path, force) {
            Ok(Some(path)) => println!("Config written to {}", path.display()),
            Ok(None) => println!("Aborted."),
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let catalog = load_catalog(&config);
    debug!(questions = catalog.len(), "catalog ready");

    let use_colors = output::should_use_colors();

    match command {
        Commands::Survey { export } => {
            let theme = tui::resolve_theme(config.theme);
            debug!(?theme, "theme resolved");
            let app = tui::App::new(Flow::new(catalog), theme.colors());
            let app = match tui::run_tui(app).await {
                Ok(app) => app,
                Err(e) => {
                    eprintln!("TUI error: {:#}", e);
                    std::process::exit(EXIT_RUNTIME);
                }
            };

            // Session summary once the terminal is back
            let store = app.flow.store();
            if let Some(latest) = store.latest() {
                println!("{}", output::format_result_summary(latest, use_colors));
            }
            if store.len() > 1 {
                let records: Vec<_> = store.iter().collect();
                println!("{}", output::format_dashboard_table(&records, use_colors));
            }
            if let Some(path) = export {
                let records: Vec<_> = store.iter().collect();
                if let Err(e) = output::export_records(&path, &records) {
                    eprintln!("Export failed: {:#}", e);
                    std::process::exit(EXIT_RUNTIME);
                }
                println!("{} assessment(s) written to {}", records.len(), path.display());
            }
        }
        Commands::Score { answers, format } => {
            let answer_map = match scoring::load_answers(&answers) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            let report = match scoring::score_answers(&catalog, &answer_map) {
                Ok(report) => report,
                Err(errors) => {
                    eprintln!("Answer errors:");
                    for error in errors {
                        eprintln!("  - {}", error);
                    }
                    std::process::exit(EXIT_INPUT);
                }
            };

            if report.unanswered > 0 {
                info!(
                    unanswered = report.unanswered,
                    total = catalog.len(),
                    "unanswered questions count as 0"
                );
            }

            let (scores, classification) = (&report.scores, &report.classification);
            match format {
                OutputFormat::Text => {
                    println!("{}", output::format_scores(scores, classification, use_colors));
                }
                OutputFormat::Json => match output::format_scores_json(scores, classification) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_RUNTIME);
                    }
                },
            }
        }
        Commands::Questions => {
            println!("{}", output::format_catalog(&catalog, use_colors));
            println!();
            println!("{}", output::format_style_legend(use_colors));
        }
        Commands::Init { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
