//! Markhub - marketing operations hub for your terminal.
//!
//! Opens a dashboard over tasks, channels, scheduled social posts, and
//! AI-drafted content, all persisted as JSON under `~/.markhub`.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use markhub::schedule::{bucket_tasks, ScheduleBucket};
use markhub::{tui, App, Session, Store, TaskQuery};

#[cfg(feature = "ai")]
use markhub::model::SocialPlatform;

/// Marketing operations hub for your terminal
#[derive(Parser)]
#[command(name = "markhub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Data directory (defaults to ~/.markhub)
    #[arg(long, global = true, env = "MARKHUB_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the dashboard (default)
    Run,

    /// List tasks without opening the TUI
    Tasks {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Filter by a case-insensitive substring of title or description
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print the schedule board
    Schedule,

    /// AI content generation
    #[cfg(feature = "ai")]
    Ai {
        /// AI operation mode
        #[command(subcommand)]
        operation: AiOperation,
    },
}

/// AI operation modes.
#[cfg(feature = "ai")]
#[derive(Subcommand)]
enum AiOperation {
    /// Generate free-form content ideas
    Ideas {
        /// What to generate ideas about
        prompt: String,
    },

    /// Generate a platform-shaped draft
    Draft {
        /// Target platform (x, linkedin, instagram)
        platform: String,

        /// Topic of the post
        topic: String,

        /// Desired tone
        #[arg(short, long)]
        tone: Option<String>,

        /// Keywords to include (comma-separated)
        #[arg(short, long)]
        keywords: Option<String>,
    },

    /// Show whether the AI client is configured
    Status,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };
    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    let store = match cli.data_dir {
        Some(ref dir) => Store::with_root(dir.clone())?,
        None => Store::open()?,
    };

    match cli.command {
        None | Some(Commands::Run) => cmd_run(store),
        Some(Commands::Tasks { format, search }) => cmd_tasks(store, &format, search),
        Some(Commands::Schedule) => cmd_schedule(store),
        #[cfg(feature = "ai")]
        Some(Commands::Ai { operation }) => cmd_ai(store, operation),
    }
}

/// Run the interactive dashboard.
fn cmd_run(store: Store) -> Result<()> {
    let session = Session::load(store)?;

    #[cfg(feature = "ai")]
    {
        let runtime = tokio::runtime::Runtime::new()?;
        let app = App::new(session, runtime.handle().clone());
        tui::run_tui(app)
    }
    #[cfg(not(feature = "ai"))]
    {
        let app = App::new(session);
        tui::run_tui(app)
    }
}

/// List tasks to stdout.
fn cmd_tasks(store: Store, format: &str, search: Option<String>) -> Result<()> {
    let session = Session::load(store)?;
    let query = TaskQuery { search: search.unwrap_or_default(), ..Default::default() };
    let tasks = query.apply(session.tasks());

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&tasks)?;
            println!("{json}");
        }
        _ => {
            for task in &tasks {
                let due = task
                    .due_date
                    .map(|d| format!(" (due {})", d.format("%Y-%m-%d")))
                    .unwrap_or_default();
                println!(
                    "[{}] {} - {}{}",
                    task.priority.label(),
                    task.status.label(),
                    task.title,
                    due
                );
            }
            println!("\nTotal: {} tasks", tasks.len());
        }
    }

    Ok(())
}

/// Print the schedule board.
fn cmd_schedule(store: Store) -> Result<()> {
    let session = Session::load(store)?;
    let board = bucket_tasks(session.tasks(), Utc::now().date_naive());

    if board.is_empty() {
        println!("No open tasks scheduled.");
        return Ok(());
    }

    for bucket in ScheduleBucket::ALL {
        let tasks = board.bucket(bucket);
        if tasks.is_empty() {
            continue;
        }
        println!("{} ({})", bucket.label(), tasks.len());
        for task in tasks {
            let due = task
                .due_date
                .map(|d| format!("  {}", d.format("%Y-%m-%d")))
                .unwrap_or_default();
            println!("  [{}] {}{}", task.priority.label(), task.title, due);
        }
        println!();
    }

    Ok(())
}

/// Handle AI commands.
#[cfg(feature = "ai")]
fn cmd_ai(store: Store, operation: AiOperation) -> Result<()> {
    use markhub::ContentClient;

    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        match operation {
            AiOperation::Status => match ContentClient::from_env() {
                Ok(client) => println!("AI provider ready: {}", client.provider_name()),
                Err(e) => println!("{e}"),
            },

            AiOperation::Ideas { prompt } => {
                let client = ContentClient::from_env()?;
                println!("Generating ideas...\n");
                let text = client.generate_content_ideas(&prompt).await?;
                println!("{text}");

                let mut session = Session::load(store)?;
                session.record_generated(markhub::GeneratedContent::new(prompt, text))?;
            }

            AiOperation::Draft { platform, topic, tone, keywords } => {
                let platform = parse_platform(&platform)?;
                let client = ContentClient::from_env()?;
                println!("Drafting for {}...\n", platform.label());
                let text = client
                    .generate_platform_content(
                        &topic,
                        platform,
                        &topic,
                        tone.as_deref(),
                        keywords.as_deref(),
                    )
                    .await?;
                println!("{text}");

                let mut session = Session::load(store)?;
                session.record_generated(markhub::GeneratedContent::new(topic, text))?;
            }
        }

        Ok(())
    })
}

/// Parse a platform name from the command line.
#[cfg(feature = "ai")]
fn parse_platform(name: &str) -> Result<SocialPlatform> {
    match name.trim().to_lowercase().as_str() {
        "x" | "twitter" => Ok(SocialPlatform::X),
        "linkedin" => Ok(SocialPlatform::LinkedIn),
        "instagram" => Ok(SocialPlatform::Instagram),
        _ => anyhow::bail!("Unknown platform: {name}. Use: x, linkedin, instagram"),
    }
}
