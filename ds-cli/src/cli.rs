use anyhow::Context;
use clap::{ArgGroup, Parser};
use ds_core::{
    Config, DarkSkyProvider, ForecastProvider, ForecastRequest, Granularity, LocationError,
    Renderer, SettingKey, provider::darksky::DEFAULT_BASE_URL,
};
use inquire::InquireError;
use std::{
    io::{self, IsTerminal},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::{output, prompt};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "ds",
    version,
    about = "Dark Sky forecasts as a table in your terminal",
    group(ArgGroup::new("action").multiple(false))
)]
pub struct Cli {
    /// Show current weather
    #[arg(short = 'c', long, group = "action")]
    pub current: bool,

    /// Show the next 24 hours
    #[arg(
        short = 't',
        long,
        visible_alias = "daily",
        visible_short_alias = 'd',
        group = "action"
    )]
    pub today: bool,

    /// Show the coming week
    #[arg(short = 'w', long, visible_alias = "weekly", group = "action")]
    pub week: bool,

    /// Add new location
    #[arg(short = 'a', long, group = "action")]
    pub add: bool,

    /// Pick the saved location used for forecasts
    #[arg(short = 'g', long, group = "action")]
    pub get: bool,

    /// Remove saved location
    #[arg(short = 'r', long, visible_alias = "remove", group = "action")]
    pub delete: bool,

    /// Show settings and open the settings file
    #[arg(short = 's', long, group = "action")]
    pub settings: bool,

    /// Settings file to use instead of the platform default.
    #[arg(long, env = "DS_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Forecast API base URL.
    #[arg(long, env = "DS_ENDPOINT", default_value = DEFAULT_BASE_URL, hide = true)]
    pub endpoint: String,
}

/// What a single invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Show(Granularity),
    AddLocation,
    GetLocation,
    DeleteLocation,
    Settings,
}

impl Cli {
    pub fn action(&self) -> Option<Action> {
        [
            (self.current, Action::Show(Granularity::Current)),
            (self.today, Action::Show(Granularity::Today)),
            (self.week, Action::Show(Granularity::Week)),
            (self.add, Action::AddLocation),
            (self.get, Action::GetLocation),
            (self.delete, Action::DeleteLocation),
            (self.settings, Action::Settings),
        ]
        .into_iter()
        .find_map(|(set, action)| set.then_some(action))
    }

    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::default_path()?),
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let path = self.config_path()?;
        let mut config = Config::load_from(&path)?;
        debug!(path = %path.display(), action = ?self.action(), "starting");

        let Some(action) = self.action() else {
            output::mode_hint(!config.cities.is_empty());
            return Ok(());
        };

        let result = match action {
            Action::Show(granularity) => self.show(&mut config, &path, granularity).await,
            Action::AddLocation => add_location(&mut config, &path),
            Action::GetLocation => get_location(&mut config, &path),
            Action::DeleteLocation => delete_location(&mut config, &path),
            Action::Settings => show_settings(&config, &path),
        };

        match result {
            Err(err) if is_no_op(&err) => {
                output::warning(&err.to_string());
                Ok(())
            }
            other => other,
        }
    }

    async fn show(
        &self,
        config: &mut Config,
        path: &Path,
        granularity: Granularity,
    ) -> anyhow::Result<()> {
        let location = config.forecast_location()?;

        if !config.has_api_key() {
            output::warning("No Dark Sky API key configured.");
            let key = prompt::api_key()?;
            config.set_setting(SettingKey::ApiKey, &key)?;
            config.save_to(path)?;
            info!("stored API key");
        }

        let provider = DarkSkyProvider::with_base_url(config.apikey.clone(), &self.endpoint);
        let request = ForecastRequest::for_location(config, &location, granularity);

        let spinner = output::fetch_spinner(granularity);
        let forecast = match provider.fetch(&request).await {
            Ok(forecast) => {
                output::finish_spinner(&spinner, true);
                forecast
            }
            Err(err) => {
                output::finish_spinner(&spinner, false);
                return Err(err.into());
            }
        };

        let table = Renderer::from_config(config).table(&forecast, granularity, &location.name)?;

        let stdout = io::stdout();
        let colored = stdout.is_terminal();
        table
            .write_to(stdout.lock(), colored)
            .context("Failed to write forecast table")?;

        Ok(())
    }
}

fn add_location(config: &mut Config, path: &Path) -> anyhow::Result<()> {
    let new = prompt::new_location()?;
    let replaced = config.add_location(&new.name, new.latitude, new.longitude)?;

    let make_current = config.current_location().is_none()
        || prompt::confirm(&format!("Use {} for forecasts from now on?", new.name), true)?;
    if make_current {
        config.switch_current(&new.name)?;
    }
    config.save_to(path)?;

    match replaced {
        Some(_) => output::success(&format!("Updated {new}")),
        None => output::success(&format!("Saved {new}")),
    }
    Ok(())
}

fn get_location(config: &mut Config, path: &Path) -> anyhow::Result<()> {
    let locations = config.list_locations();
    let chosen = prompt::pick_location(
        "Which location should forecasts use?",
        locations,
        config.current.as_deref(),
    )?;

    config.switch_current(&chosen.name)?;
    config.save_to(path)?;
    output::success(&format!("Forecasts now use {chosen}"));
    Ok(())
}

fn delete_location(config: &mut Config, path: &Path) -> anyhow::Result<()> {
    let locations = config.list_locations();
    let chosen = prompt::pick_location(
        "Which location do you want to remove?",
        locations,
        config.current.as_deref(),
    )?;

    if !prompt::confirm(&format!("Remove {chosen}?"), false)? {
        return Ok(());
    }

    let removed = config.delete_location(&chosen.name)?;
    config.save_to(path)?;
    output::success(&format!("Removed {removed}"));
    if config.current.is_none() {
        output::warning("No location is selected now. Run `ds --get` to pick one.");
    }
    Ok(())
}

fn show_settings(config: &Config, path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        config.save_to(path)?;
    }

    print!("{}", output::settings_summary(config, path));
    output::open_in_system(path);
    Ok(())
}

/// Errors that end the invocation without failing it.
fn is_no_op(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<LocationError>(),
        Some(LocationError::NoSavedLocation | LocationError::NoCurrentLocation)
    ) || matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}
