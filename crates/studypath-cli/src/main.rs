//! studypath CLI: browse curricula, take quizzes, and track progress.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use studypath_core::model::Level;

mod commands;

#[derive(Parser)]
#[command(
    name = "studypath",
    version,
    about = "Curriculum browser: roadmaps, modules, quizzes and progress"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available subjects
    Subjects,

    /// Show the module roadmap of a subject
    Roadmap {
        /// Subject slug (e.g. "aiml")
        #[arg(long)]
        subject: String,

        /// Also write the roadmap as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Select a subject and level, and optionally a module
    Select {
        #[arg(long)]
        subject: String,

        /// beginner, intermediate or advanced
        #[arg(long)]
        level: Level,

        #[arg(long)]
        module: Option<String>,
    },

    /// Show the selected module
    Module {
        /// Also write the module as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Show or submit the quiz of the selected module
    Quiz {
        /// Chosen option per question, comma-separated; "-" leaves one blank
        /// (e.g. "0,2,-,1")
        #[arg(long, allow_hyphen_values = true)]
        answers: Option<String>,
    },

    /// Show the AI summary of the selected module
    Summary {
        /// Request a generated summary from the summary backend
        #[arg(long)]
        dynamic: bool,
    },

    /// Step through the flashcards of the selected level
    Flashcards,

    /// Show best quiz scores
    Progress {
        /// Write the progress record as JSON
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Mark the selected module completed
    Complete,

    /// Validate a static content directory
    Validate {
        /// Directory holding *_curriculum.json files
        #[arg(long)]
        content: PathBuf,
    },

    /// Create a starter config and sample content
    Init,
}

#[tokio::main]
async fn main() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "studypath=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Subjects => commands::subjects::execute(config).await,
        Commands::Roadmap { subject, html } => {
            commands::roadmap::execute(config, subject, html).await
        }
        Commands::Select {
            subject,
            level,
            module,
        } => commands::select::execute(config, subject, level, module).await,
        Commands::Module { html } => commands::module::execute(config, html).await,
        Commands::Quiz { answers } => commands::quiz::execute(config, answers).await,
        Commands::Summary { dynamic } => commands::summary::execute(config, dynamic).await,
        Commands::Flashcards => commands::flashcards::execute(config).await,
        Commands::Progress { export } => commands::progress::execute(config, export),
        Commands::Complete => commands::complete::execute(config).await,
        Commands::Validate { content } => commands::validate::execute(content),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
