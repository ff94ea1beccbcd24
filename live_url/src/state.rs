use crate::{
    error::UrlError, params::QueryParamList, url_model::ParsedUrl,
};
use std::fmt;

/// Which representation was edited directly since the last reconciliation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Settled: both representations agree.
    #[default]
    None,
    /// The raw text was edited.
    Text,
    /// A structured field or the parameter list was edited.
    Structured,
}

/// The outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The text parsed and replaced the structured value.
    Parsed,
    /// The structured value was formatted into the text.
    Formatted,
    /// The text did not parse; the structured value was kept.
    Rejected(UrlError),
}

/// The edited URL in both of its forms.
///
/// Instances are cloned, never shared, across transitions, so a reader
/// holding a snapshot always sees a consistent pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlState {
    pub(crate) text: String,
    pub(crate) structured: ParsedUrl,
    pub(crate) origin: Origin,
}

impl UrlState {
    /// Creates a settled state whose text is the formatted `structured` value.
    pub fn settled(structured: ParsedUrl) -> Self {
        Self {
            text: structured.format(),
            structured,
            origin: Origin::None,
        }
    }

    /// Parses `text` into a settled state, keeping `text` verbatim.
    pub fn parse(text: impl Into<String>) -> Result<Self, UrlError> {
        let text = text.into();
        let structured = ParsedUrl::parse(&text)?;
        Ok(Self {
            text,
            structured,
            origin: Origin::None,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn structured(&self) -> &ParsedUrl {
        &self.structured
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn params(&self) -> QueryParamList {
        self.structured.params()
    }

    pub fn is_settled(&self) -> bool {
        self.origin == Origin::None
    }

    /// Re-derives the representation that was not edited.
    ///
    /// Runs at most once per edit: the origin is reset to [`Origin::None`]
    /// only after the derived value is written, and a settled state returns
    /// `None` without doing anything.
    pub fn reconcile(&mut self) -> Option<Reconciliation> {
        let outcome = match self.origin {
            Origin::None => return None,
            Origin::Text => match ParsedUrl::parse(&self.text) {
                Ok(structured) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!("parsed text {:?} into fields", self.text);
                    self.structured = structured;
                    Reconciliation::Parsed
                }
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!("kept fields, text {:?} rejected", self.text);
                    Reconciliation::Rejected(err)
                }
            },
            Origin::Structured => {
                self.text = self.structured.format();
                #[cfg(feature = "tracing")]
                tracing::trace!("formatted fields into text {:?}", self.text);
                Reconciliation::Formatted
            }
        };
        self.origin = Origin::None;
        Some(outcome)
    }
}

/// The single user-visible error channel. Empty means no error.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ErrorState {
    message: String,
}

impl ErrorState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}

impl From<&UrlError> for ErrorState {
    fn from(err: &UrlError) -> Self {
        Self::new(err.to_string())
    }
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
