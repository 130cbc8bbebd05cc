//! Wiring between the CLI and the core: resolve, fetch, evaluate, render.

use anyhow::Result;
use tonight_core::{
    ComfortVerdict, Config, CoordinateResolver, ForecastProvider, NightComfortEvaluator,
    ResolveError, ResolvedLocation, SubmitOutcome,
    provider::provider_from_config,
    resolver::default_resolver_from_config,
    share::{ShareMessage, share_links},
};

const RESEARCH_URL: &str =
    "https://www.sleepfoundation.org/bedroom-environment/touch/what-temperature-should-your-bedroom-be";

pub struct App {
    resolver: Box<dyn CoordinateResolver>,
    provider: Box<dyn ForecastProvider>,
}

impl App {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            resolver: default_resolver_from_config(config)?,
            provider: provider_from_config(config)?,
        })
    }

    /// Resolve the city, fetch tonight's hourly series and evaluate it.
    /// Two sequential calls, no retries; any failure is terminal for this
    /// request.
    pub async fn verdict_for(
        &self,
        city: &str,
    ) -> Result<(ResolvedLocation, ComfortVerdict), ResolveError> {
        let location = self.resolver.resolve(city).await?;
        let forecast = self.provider.hourly_forecast(&location.coordinates).await?;

        let evaluator = NightComfortEvaluator::for_forecast(&forecast)?;
        let verdict = evaluator.evaluate(&forecast.samples);

        Ok((location, verdict))
    }

    /// Same flow, but folded into a submission outcome for the view-state
    /// machine. Transport failures are logged and collapsed into the generic
    /// error state, mirroring the single error banner of the UI.
    pub async fn submit(&self, city: &str) -> (String, SubmitOutcome) {
        match self.verdict_for(city).await {
            Ok((location, verdict)) => (location.name, SubmitOutcome::Verdict(verdict)),
            Err(ResolveError::NotFound { city }) => (city, SubmitOutcome::LocationNotFound),
            Err(ResolveError::Other(err)) => {
                tracing::warn!("Request for '{city}' failed: {err:#}");
                (city.to_string(), SubmitOutcome::FetchFailed)
            }
        }
    }
}

pub fn print_verdict(city: &str, verdict: &ComfortVerdict) {
    match verdict.average_night_temp_c {
        None => {
            println!("The forecast for {city} has no night hours yet, so there is no verdict.");
            println!("Try again closer to the evening.");
        }
        Some(average) if verdict.comfortable => {
            println!("Yes!");
            println!(
                "The average temperature tonight in {city} is {average}\u{b0}C, \
                 you should sleep well!"
            );
        }
        Some(average) => {
            println!("Nope!");
            println!("Yikes! The average temperature tonight in {city} is {average}\u{b0}C.");
            println!("Research suggests optimal sleeping temperature is 18\u{b0}C:");
            println!("{RESEARCH_URL}");
        }
    }
}

pub fn print_share_panel(verdict: &ComfortVerdict) -> Result<()> {
    let Some(message) = ShareMessage::for_verdict(verdict) else {
        println!("Nothing to share yet.");
        return Ok(());
    };

    println!("Share: {}", message.subject);
    for link in share_links(&message)? {
        println!("  {:<9} {}", link.service.label(), link.url);
    }

    Ok(())
}
