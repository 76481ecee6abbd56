use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use meteo_core::{Config, OpenWeatherClient, SearchController, SearchOutcome};

use crate::terminal::TerminalPage;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Prévisions météo par ville")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show the daily forecast for a city.
    Search {
        /// City name, e.g. "Saint Étienne".
        city: String,

        /// Also write the forecast list as an HTML fragment to this file.
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Search repeatedly, with suggested cities one keystroke away.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure().map(|()| ExitCode::SUCCESS),
            Command::Search { city, html } => search_once(&city, html).await,
            Command::Interactive => interactive().await.map(|()| ExitCode::SUCCESS),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn client_for(config: &Config) -> OpenWeatherClient {
    let client = match &config.endpoint {
        Some(endpoint) => OpenWeatherClient::with_endpoint(endpoint.clone()),
        None => OpenWeatherClient::new(),
    };

    match config.days {
        Some(days) => client.with_days(days),
        None => client,
    }
}

/// The failure was already shown as a toast; only the exit status reports it.
fn exit_code(outcome: SearchOutcome) -> ExitCode {
    if succeeded(outcome) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn succeeded(outcome: SearchOutcome) -> bool {
    !matches!(outcome, SearchOutcome::Failed(_))
}

async fn search_once(city: &str, html: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let api_key = config.api_key()?;

    let page = TerminalPage::new(config.suggested_cities.clone());
    let controller =
        SearchController::new(Box::new(client_for(&config)), page.surface(), api_key)
            .with_toast_duration(config.toast_duration());

    let outcome = controller.set_search_and_go(city).await;

    if let (SearchOutcome::Rendered { .. }, Some(path)) = (outcome, html) {
        std::fs::write(&path, page.html())
            .with_context(|| format!("Failed to write HTML to {}", path.display()))?;
    }

    Ok(exit_code(outcome))
}

/// Where a prompt left the interactive loop.
#[derive(Debug, PartialEq, Eq)]
enum Step<T> {
    Answer(T),
    /// Esc: back to the menu.
    Back,
    /// Ctrl-C: leave the loop.
    Quit,
}

fn step<T>(res: Result<T, InquireError>, what: &'static str) -> anyhow::Result<Step<T>> {
    match res {
        Ok(answer) => Ok(Step::Answer(answer)),
        Err(InquireError::OperationCanceled) => Ok(Step::Back),
        Err(InquireError::OperationInterrupted) => Ok(Step::Quit),
        Err(err) => Err(err).with_context(|| format!("Failed to read {what}")),
    }
}

const SEARCH_CHOICE: &str = "🔍 Rechercher une ville…";
const QUIT_CHOICE: &str = "Quitter";

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_key = config.api_key()?;

    let page = TerminalPage::new(config.suggested_cities.clone());
    let controller =
        SearchController::new(Box::new(client_for(&config)), page.surface(), api_key)
            .with_toast_duration(config.toast_duration());

    loop {
        let mut choices = vec![SEARCH_CHOICE.to_string()];
        choices.extend(page.suggested().iter().cloned());
        choices.push(QUIT_CHOICE.to_string());

        let choice = match step(Select::new("Météo :", choices).prompt(), "choice")? {
            Step::Answer(choice) => choice,
            Step::Back | Step::Quit => break,
        };

        if choice == QUIT_CHOICE {
            break;
        }

        if choice == SEARCH_CHOICE {
            if !page.submit_enabled() {
                continue;
            }
            let city = match step(Text::new("Ville :").prompt(), "city")? {
                Step::Answer(city) => city,
                Step::Back => continue,
                Step::Quit => break,
            };
            let _ = controller.set_search_and_go(&city).await;
        } else {
            let _ = controller.set_search_and_go(&choice).await;
        }
    }

    Ok(())
}
