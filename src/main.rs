#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod pages;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use ripmind_core::EntryPoint;

/// Global data directory, set from command line
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Where the flow opens, set from command line
static ENTRY_POINT: OnceLock<EntryPoint> = OnceLock::new();

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ripmind")
}

/// Get the data directory (set from command line or default)
pub fn get_data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

/// Get the entry point (`--step ripmind` opens the archive directly)
pub fn get_entry_point() -> EntryPoint {
    ENTRY_POINT.get().copied().unwrap_or(EntryPoint::Start)
}

/// RIP MIND - write a letter, send it or bury it
#[derive(Parser, Debug)]
#[command(name = "ripmind-desktop")]
#[command(about = "RIP MIND - write a letter, send it or bury it")]
struct Args {
    /// Data directory for storage
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Open at a step instead of the beginning (only "ripmind" is recognized)
    #[arg(short, long)]
    step: Option<String>,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
    let entry = EntryPoint::from_step_param(args.step.as_deref());

    let _ = DATA_DIR.set(data_dir.clone());
    let _ = ENTRY_POINT.set(entry);

    tracing::info!("Starting RIP MIND ({:?}) with data dir: {:?}", entry, data_dir);

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("RIP MIND")
            .with_inner_size(dioxus::desktop::LogicalSize::new(480.0, 860.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
