#![forbid(unsafe_code)]

//! Edit a URL as raw text or as structured fields, and keep both forms
//! consistent.
//!
//! The pieces, from the bottom up:
//! - [`QueryParamList`]: the query string as an ordered list of key/value pairs.
//! - [`ParsedUrl`]: parse and format between text and structured fields.
//! - [`SyncEngine`]: applies edits, reconciles the other representation once
//!   per edit, and reports parse failures on a single error channel.
//! - [`LocationBridge`]: mirrors settled values into the host's location
//!   and history, and supplies the starting value.
//!
//! ```rust
//! use live_url::{LocationBridge, MemoryHistory, SyncEngine, UrlField};
//!
//! let history = MemoryHistory::new("https://tool.example/?url=http%3A%2F%2Fa.com%2F");
//! let mut engine = SyncEngine::new(LocationBridge::new(history)).unwrap();
//!
//! engine.set_field(UrlField::Host, "b.com").unwrap();
//! assert_eq!(engine.state().text(), "http://b.com/");
//!
//! engine.edit_text("not a url").unwrap();
//! assert_eq!(engine.state().text(), "not a url");
//! assert_eq!(engine.state().structured().hostname(), "b.com");
//! assert!(!engine.error().is_empty());
//! ```

pub mod engine;
pub mod error;
pub mod location;
pub mod params;
#[cfg(feature = "reactive")]
pub mod reactive;
pub mod state;
pub mod url_model;

pub use engine::{transition, Edit, Effect, ParamEdit, SyncEngine, Transition};
pub use error::{EditError, LocationError, ParamError, UrlError};
pub use live_url_config as config;
pub use location::{
    HistoryEntry, LocationBridge, LocationChange, LocationProvider,
    MemoryHistory,
};
#[cfg(feature = "browser")]
pub use location::BrowserHistory;
pub use params::{ParamPart, QueryParam, QueryParamList};
#[cfg(feature = "reactive")]
pub use reactive::SyncStore;
pub use state::{ErrorState, Origin, Reconciliation, UrlState};
pub use url_model::{ParsedUrl, UrlField};
