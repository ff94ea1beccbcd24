//! Mirrors the settled URL into the host's own location and history.

use crate::{error::LocationError, params::QueryParamList};
use core::fmt::Debug;
use live_url_config::SyncOptions;

#[cfg(feature = "browser")]
mod history;
mod memory;
#[cfg(feature = "browser")]
pub use history::*;
pub use memory::*;

/// A description of a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationChange {
    /// The new location.
    pub value: String,
    /// Overwrite the current history entry instead of adding one, so going
    /// back skips the value being replaced.
    pub replace: bool,
    /// The edited URL this navigation publishes, stored with the history entry.
    pub state: String,
}

impl Default for LocationChange {
    fn default() -> Self {
        Self {
            value: Default::default(),
            replace: false,
            state: Default::default(),
        }
    }
}

/// The host environment's current location and history.
pub trait LocationProvider: Debug {
    /// The full current location.
    fn current(&self) -> Result<String, LocationError>;

    /// Update the host's history to reflect a new location.
    fn complete_navigation(
        &mut self,
        loc: &LocationChange,
    ) -> Result<(), LocationError>;
}

/// Reads the starting value from, and publishes settled values to, a
/// designated query key on the host's own location.
#[derive(Debug, Clone)]
pub struct LocationBridge<L> {
    provider: L,
    options: SyncOptions,
    last_published: Option<String>,
}

impl<L: LocationProvider> LocationBridge<L> {
    pub fn new(provider: L) -> Self {
        Self::with_options(provider, SyncOptions::default())
    }

    pub fn with_options(provider: L, options: SyncOptions) -> Self {
        Self {
            provider,
            options,
            last_published: None,
        }
    }

    pub fn provider(&self) -> &L {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut L {
        &mut self.provider
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    pub fn last_published(&self) -> Option<&str> {
        self.last_published.as_deref()
    }

    pub fn into_provider(self) -> L {
        self.provider
    }

    /// The value to start editing with: the designated query key on the
    /// current location, or the whole location when that key is absent or
    /// empty.
    ///
    /// A value read from the query key is already reflected in the location,
    /// so it is remembered as published.
    pub fn initial(&mut self) -> Result<String, LocationError> {
        let href = self.provider.current()?;
        let current = parse_location(&href)?;
        let params =
            QueryParamList::from_query(current.query().unwrap_or_default());
        match params.get_first(&self.options.query_key) {
            Some(value) if !value.is_empty() => {
                let value = value.to_string();
                self.last_published = Some(value.clone());
                Ok(value)
            }
            _ => Ok(href),
        }
    }

    /// The current location with the designated query key set to `text`.
    ///
    /// All other query parameters keep their order.
    pub fn location_for(&self, text: &str) -> Result<String, LocationError> {
        let mut current = parse_location(&self.provider.current()?)?;
        let params = QueryParamList::from_query(current.query().unwrap_or_default())
            .set(&self.options.query_key, text);
        current.set_query(Some(&params.serialize()));
        Ok(current.into())
    }

    /// Pushes a history entry for a newly settled `text`.
    ///
    /// Returns `Ok(false)` without touching the history when `text` equals
    /// the last published value and deduplication is enabled.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self))
    )]
    pub fn publish(&mut self, text: &str) -> Result<bool, LocationError> {
        if self.options.dedupe_publish
            && self.last_published.as_deref() == Some(text)
        {
            #[cfg(feature = "tracing")]
            tracing::debug!("skipping publish of unchanged URL");
            return Ok(false);
        }

        let change = LocationChange {
            value: self.location_for(text)?,
            replace: self.options.history_mode.is_replace(),
            state: text.to_string(),
        };
        self.provider.complete_navigation(&change)?;
        self.last_published = Some(text.to_string());
        Ok(true)
    }

    /// Records `text` as already reflected in the host location, e.g. after
    /// the host navigated there itself.
    pub fn mark_published(&mut self, text: &str) {
        self.last_published = Some(text.to_string());
    }
}

fn parse_location(href: &str) -> Result<url::Url, LocationError> {
    url::Url::parse(href)
        .map_err(|e| LocationError::InvalidLocation(format!("{href}: {e}")))
}
