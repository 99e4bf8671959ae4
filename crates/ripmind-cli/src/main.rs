//! RIP MIND CLI
//!
//! Thin wrapper around ripmind-core for writing and browsing letters from a
//! terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Show data directory, configuration and archive size
//! ripmind info
//!
//! # Bury a letter in the archive
//! ripmind write --nickname Sam --content "hello"
//!
//! # Send a letter live, sharing a phone number
//! ripmind write --nickname Sam --content "hello" --phone 010-1234-5678 --agree --live
//!
//! # Browse the archive (newest first), expanding the second letter
//! ripmind browse --select 2
//!
//! # Show one letter in full
//! ripmind show <letter_id>
//! ```

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use ripmind_core::config::DATABASE_FILE;
use ripmind_core::{
    Destination, EntryPoint, FlowConfig, LetterDetail, LetterFlow, LetterId, LetterStore,
    ListRow, LiveMode, Step,
};

/// RIP MIND - write a letter, send it or bury it
#[derive(Parser)]
#[command(name = "ripmind")]
#[command(version = "0.1.0")]
#[command(about = "RIP MIND - write a letter, send it or bury it")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (default: platform data dir/ripmind)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Notification endpoint (overrides config.json)
    #[arg(long, global = true)]
    notify_endpoint: Option<String>,

    /// Disable live notifications
    #[arg(long, global = true)]
    no_notify: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show data directory, configuration and archive size
    Info,

    /// Write a letter and send it live or bury it
    Write {
        /// Nickname (at most 6 characters are kept)
        #[arg(short, long)]
        nickname: String,

        /// Letter body
        #[arg(short, long)]
        content: String,

        /// Phone number to share (requires --agree)
        #[arg(short, long)]
        phone: Option<String>,

        /// Agree to the collection and use of personal information
        #[arg(long)]
        agree: bool,

        /// Send live instead of burying in the archive
        #[arg(long)]
        live: bool,
    },

    /// Browse buried letters, newest first
    Browse {
        /// Expand the letter at this position (1 = newest)
        #[arg(short, long)]
        select: Option<usize>,
    },

    /// Show a single letter in full
    Show {
        /// Letter ID
        letter_id: String,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ripmind")
}

fn print_rows(flow: &LetterFlow) {
    let list = flow.list();
    for (i, row) in list.rows().iter().enumerate() {
        match row {
            ListRow::Letter {
                id,
                nickname,
                time_label,
            } => {
                let marker = if list.selected_index() == Some(i) { ">" } else { " " };
                let age = list
                    .letters()
                    .get(i)
                    .map(|letter| letter.relative_time())
                    .unwrap_or_default();
                println!(
                    "{} {:>3}. {:<4} {}  ({})  [{}]",
                    marker,
                    i + 1,
                    nickname,
                    time_label,
                    age,
                    id
                );
            }
            ListRow::Placeholder(text) => println!("  {}", text),
        }
    }
}

fn print_detail(detail: &LetterDetail) {
    println!("{}", detail.title);
    println!("{}", detail.since);
    println!();
    println!("{}", detail.content);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let mut config = FlowConfig::load_from_dir(&data_dir)?;
    if let Some(endpoint) = cli.notify_endpoint {
        config.notify_endpoint = Some(endpoint);
    }
    if cli.no_notify {
        config.notify_endpoint = None;
    }

    let store = LetterStore::open(data_dir.join(DATABASE_FILE))?;
    let mut flow = LetterFlow::new(store, config);

    match cli.command {
        Commands::Info => {
            let config = flow.config();
            println!("RIP MIND v0.1.0");
            println!();
            println!("Data directory: {}", data_dir.display());
            println!("Letters buried: {}", flow.store().len());
            println!();
            println!("Live mode: {:?}", config.live_mode);
            println!(
                "Notify endpoint: {}",
                config.notify_endpoint.as_deref().unwrap_or("(disabled)")
            );
            println!("Live delay: {}ms", config.live_delay_ms);
            println!("Archive delay: {}ms", config.archive_delay_ms);
        }

        Commands::Write {
            nickname,
            content,
            phone,
            agree,
            live,
        } => {
            flow.start();
            flow.set_consent(phone.is_some());
            flow.draft_mut().set_nickname(&nickname);
            if let Some(ref phone) = phone {
                flow.draft_mut().set_phone(phone);
            }
            flow.draft_mut().set_acknowledged(agree);

            if let Err(e) = flow.validate_before_content() {
                anyhow::bail!("{}", e);
            }

            flow.draft_mut().set_content(&content);
            flow.finish_content();

            let destination = if live {
                Destination::Live
            } else {
                Destination::Archive
            };
            let record = flow.submit_and_wait(destination).await;

            match flow.active_step() {
                Some(Step::Archive) => {
                    println!("Letter buried in RIP MIND.");
                    println!("  ID: {}", record.id);
                    println!("  Time: {}", record.formatted_time(&Local));
                    println!();
                    print_rows(&flow);
                }
                Some(Step::LiveWall) => {
                    println!("Letter posted to the live wall.");
                    println!("  ID: {}", record.id);
                }
                _ => {
                    println!("Letter sent.");
                    println!("  ID: {}", record.id);
                    if let (LiveMode::Notify, Some(phone)) = (flow.config().live_mode, &record.phone) {
                        println!("  Notification requested for {}", phone);
                    }
                }
            }
        }

        Commands::Browse { select } => {
            flow.open(EntryPoint::Archive);

            if let Some(position) = select {
                let detail = position
                    .checked_sub(1)
                    .and_then(|index| flow.list_mut().select(index).cloned());
                match detail {
                    Some(detail) => {
                        print_rows(&flow);
                        println!();
                        print_detail(&detail);
                    }
                    None => anyhow::bail!("No letter at position {}", position),
                }
            } else {
                print_rows(&flow);
            }
        }

        Commands::Show { letter_id } => {
            flow.open(EntryPoint::Archive);
            let id = LetterId::from_string(letter_id);
            match flow.list_mut().select_id(&id).cloned() {
                Some(detail) => print_detail(&detail),
                None => anyhow::bail!("Letter not found: {}", id),
            }
        }
    }

    Ok(())
}
