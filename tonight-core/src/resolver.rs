use crate::{Config, model::ResolvedLocation};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod geocoding;
pub mod table;

/// Why a city name could not be turned into coordinates.
///
/// "Not found" is a typed outcome rather than an absent value so callers can
/// tell a bad city name apart from a transport failure.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Couldn't find your city: '{city}'")]
    NotFound { city: String },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverId {
    Table,
    Geocoding,
}

impl ResolverId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolverId::Table => "table",
            ResolverId::Geocoding => "geocoding",
        }
    }

    pub const fn all() -> &'static [ResolverId] {
        &[ResolverId::Table, ResolverId::Geocoding]
    }
}

impl std::fmt::Display for ResolverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ResolverId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "table" => Ok(ResolverId::Table),
            "geocoding" => Ok(ResolverId::Geocoding),
            _ => Err(anyhow::anyhow!(
                "Unknown resolver '{value}'. Supported resolvers: table, geocoding."
            )),
        }
    }
}

/// Maps a human-entered city name to coordinates.
#[async_trait]
pub trait CoordinateResolver: Send + Sync + Debug {
    async fn resolve(&self, city: &str) -> Result<ResolvedLocation, ResolveError>;
}

/// Construct a resolver from config and explicit ResolverId.
pub fn resolver_from_config(
    id: ResolverId,
    config: &Config,
) -> anyhow::Result<Box<dyn CoordinateResolver>> {
    let boxed: Box<dyn CoordinateResolver> = match id {
        ResolverId::Table => Box::new(table::TableResolver::bundled()),
        ResolverId::Geocoding => {
            let api_key = config.geocoding_api_key().ok_or_else(|| {
                anyhow::anyhow!(
                    "No geocoding API key configured.\n\
                     Hint: run `tonight configure` and enter your API key, or set \
                     TONIGHT_GEOCODING_API_KEY."
                )
            })?;
            Box::new(geocoding::GeocodingResolver::new(api_key.to_owned())?)
        }
    };

    Ok(boxed)
}

/// Construct the configured resolver, using the `resolver` config field.
pub fn default_resolver_from_config(config: &Config) -> anyhow::Result<Box<dyn CoordinateResolver>> {
    let id = config.resolver_id()?;
    resolver_from_config(id, config)
}
