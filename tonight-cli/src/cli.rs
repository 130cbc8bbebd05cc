use anyhow::bail;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use tonight_core::{Config, Event, ResolveError, ResolverId, View};

use crate::app::{App, print_share_panel, print_verdict};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tonight", version, about = "Will I sleep tonight?")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Choose a coordinate resolver and store API keys.
    Configure,

    /// One-shot check: will you sleep tonight in the given city?
    Check {
        /// City name, e.g. "London".
        city: String,

        /// Also print the share links for the verdict.
        #[arg(long)]
        share: bool,
    },

    /// Question/answer loop with a share panel.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Check { city, share } => check(&city, share).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    // Start from the file contents only; environment overrides would
    // otherwise get baked into the saved config.
    let mut config = Config::load_file()?;

    let options: Vec<&str> = ResolverId::all().iter().map(|id| id.as_str()).collect();
    let chosen = Select::new("How should city names be mapped to coordinates?", options)
        .with_help_message("table: bundled city list, no key needed. geocoding: remote lookup.")
        .prompt()?;
    let resolver = ResolverId::try_from(chosen)?;
    config.set_resolver(resolver);

    let weather_key = prompt_api_key("OpenWeather API key", config.weather_api_key())?;
    if let Some(key) = weather_key {
        config.set_weather_api_key(key);
    }

    if resolver == ResolverId::Geocoding {
        let geocoding_key = prompt_api_key("Geocoding API key", config.geocoding_api_key())?;
        if let Some(key) = geocoding_key {
            config.set_geocoding_api_key(key);
        }
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

/// Returns `None` when the user keeps the already-configured key.
fn prompt_api_key(label: &str, existing: Option<&str>) -> anyhow::Result<Option<String>> {
    let message = if existing.is_some() {
        format!("{label} (empty keeps the current one):")
    } else {
        format!("{label}:")
    };

    let entered = Password::new(&message)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    if entered.is_empty() {
        if existing.is_none() {
            bail!("No {label} provided.");
        }
        return Ok(None);
    }

    Ok(Some(entered))
}

async fn check(city: &str, share: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let app = App::from_config(&config)?;

    let (location, verdict) = match app.verdict_for(city).await {
        Ok(found) => found,
        Err(ResolveError::NotFound { city }) => {
            bail!("Couldn't find your city: '{city}'. Check the spelling and try again.");
        }
        Err(ResolveError::Other(err)) => return Err(err),
    };

    print_verdict(&location.name, &verdict);

    if share {
        println!();
        print_share_panel(&verdict)?;
    }

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let app = App::from_config(&config)?;

    let mut view = View::Prompt;

    // Each screen produces the next event; `None` means quit.
    loop {
        let event = match &view {
            View::Prompt => {
                let input = Text::new("Enter your city:").prompt()?;
                let city = input.trim();
                if city.is_empty() {
                    println!("Please enter your city!");
                    continue;
                }

                let (name, outcome) = app.submit(city).await;
                Some(Event::Submit { city: name, outcome })
            }

            View::LocationError { city } => {
                println!("Couldn't find your city: '{city}'.");
                match Select::new("What next?", vec!["Try another city", "Quit"]).prompt()? {
                    "Try another city" => Some(Event::Clear),
                    _ => None,
                }
            }

            View::FetchError => {
                println!("There was an error loading your request.");
                match Select::new("What next?", vec!["Try again", "Quit"]).prompt()? {
                    "Try again" => Some(Event::Clear),
                    _ => None,
                }
            }

            View::Verdict { city, verdict } => {
                print_verdict(city, verdict);

                let mut options = vec!["Try another city", "Quit"];
                if verdict.is_known() {
                    options.insert(1, "Share");
                }

                match Select::new("What next?", options).prompt()? {
                    "Try another city" => Some(Event::Clear),
                    "Share" => Some(Event::ToggleShare),
                    _ => None,
                }
            }

            View::Sharing { verdict, .. } => {
                print_share_panel(verdict)?;
                match Select::new("What next?", vec!["Close", "Quit"]).prompt()? {
                    "Close" => Some(Event::ToggleShare),
                    _ => None,
                }
            }
        };

        match event {
            Some(event) => view = view.apply(event),
            None => break,
        }
    }

    Ok(())
}
