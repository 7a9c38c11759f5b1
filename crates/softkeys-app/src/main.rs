//! Main application entry point.

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use softkeys_app::type_text;
use softkeys_core::{ConfigResult, InputText, KeyboardConfig, KeyboardLayout, KeyboardPanel};

/// Type text through the SoftKeys on-screen keyboard.
#[derive(Debug, Parser)]
#[command(name = "softkeys", version, about)]
struct Args {
    /// JSON layout file (defaults to compact QWERTY)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// JSON keyboard configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective layout to this file and exit
    #[arg(long)]
    dump_layout: Option<PathBuf>,

    /// Text to type
    text: Vec<String>,
}

fn build_panel(args: &Args) -> ConfigResult<KeyboardPanel> {
    let config = match &args.config {
        Some(path) => KeyboardConfig::load(path)?,
        None => KeyboardConfig::default(),
    };
    let layout = match &args.layout {
        Some(path) => KeyboardLayout::load(path)?,
        None => KeyboardLayout::compact_qwerty(&config),
    };
    if let Some(path) = &args.dump_layout {
        layout.save(path)?;
        log::info!("Wrote layout to {}", path.display());
    }
    Ok(KeyboardPanel::with_layout(config, &layout))
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Starting SoftKeys");

    let mut panel = match build_panel(&args) {
        Ok(panel) => panel,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if args.dump_layout.is_some() {
        return ExitCode::SUCCESS;
    }

    let input = Rc::new(RefCell::new(InputText::new()));
    panel.connect(input.clone());
    input.borrow_mut().focus();

    let report = type_text(&mut panel, &args.text.join(" "));
    log::info!(
        "{} key presses, {} characters skipped",
        report.presses,
        report.skipped.len()
    );

    println!("{}", input.borrow().text());
    if report.skipped.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
