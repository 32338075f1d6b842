//! Status messages, the fetch spinner and the settings summary.
//!
//! Everything here goes to stderr except the settings summary, so the
//! forecast table is the only thing on stdout.

use crossterm::style::Stylize;
use ds_core::{Config, Granularity};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    io,
    path::Path,
    process::Command,
    thread,
    time::Duration,
};
use tracing::warn;

/// Status message prefixes
pub mod status {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
}

pub fn success(message: &str) {
    eprintln!("{} {message}", status::SUCCESS.green());
}

pub fn warning(message: &str) {
    eprintln!("{} {message}", status::WARNING.yellow());
}

pub fn error(err: &anyhow::Error) {
    eprintln!("{} {err:#}", status::ERROR.red().bold());
}

/// Printed when no display mode was asked for.
pub fn mode_hint(has_locations: bool) {
    eprintln!("Choose a forecast: --current (-c), --today (-t) or --week (-w). See --help.");
    if !has_locations {
        eprintln!("No location saved yet. Add one with --add (-a).");
    }
}

/// Spinner shown while the forecast is requested.
pub fn fetch_spinner(granularity: Granularity) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(format!(
        "Fetching Dark Sky for {} weather",
        granularity.describe()
    ));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn finish_spinner(pb: &ProgressBar, ok: bool) {
    if ok {
        pb.finish_and_clear();
    } else {
        pb.abandon_with_message(format!("{} Error fetching Dark Sky data", status::ERROR));
    }
}

fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count == 0 {
        return "(not set)".to_string();
    }
    let visible: String = secret.chars().skip(count.saturating_sub(4)).collect();
    format!("{}{visible}", "*".repeat(count.saturating_sub(4)))
}

/// Human-readable settings overview. The API key is masked.
pub fn settings_summary(config: &Config, path: &Path) -> String {
    let locations = config.list_locations();
    let locations = if locations.is_empty() {
        "  locations: none\n".to_string()
    } else {
        let lines: String = locations
            .iter()
            .map(|location| {
                let marker = if config.current.as_deref() == Some(location.name.as_str()) {
                    "*"
                } else {
                    " "
                };
                format!("  {marker} {location}\n")
            })
            .collect();
        format!("  locations:\n{lines}")
    };

    format!(
        "Settings file: {}\n  apikey:  {}\n  lang:    {} ({})\n  units:   {}\n{locations}",
        path.display(),
        mask(&config.apikey),
        config.lang,
        config.lang.localization().name,
        config.units,
    )
}

fn opener() -> Command {
    if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else {
        Command::new("xdg-open")
    }
}

/// Start `cmd` without waiting for it; the child is reaped on a background thread.
fn launch(mut cmd: Command) -> io::Result<()> {
    let mut child = cmd.spawn()?;
    thread::spawn(move || child.wait());
    Ok(())
}

/// Open `path` with the platform's default application. Failure is only a warning.
pub fn open_in_system(path: &Path) {
    let mut cmd = opener();
    cmd.arg(path);

    match launch(cmd) {
        Ok(()) => eprintln!(
            "Opening settings file: {}",
            path.display().to_string().magenta().bold()
        ),
        Err(err) => {
            warn!(%err, "could not launch file opener");
            warning(&format!(
                "Could not open the settings file ({err}). Edit it by hand: {}",
                path.display()
            ));
        }
    }
}
