//! Keeps the raw text and the structured fields of one URL consistent.
//!
//! Every edit goes through [`transition`], a single pass that applies the
//! edit, tags its [`Origin`], and reconciles the other representation once.
//! Side effects come back as [`Effect`]s and are executed by
//! [`SyncEngine`] after the new state is stored, so the derived write is
//! never observed as a fresh edit.

use crate::{
    error::{EditError, LocationError, ParamError},
    location::{LocationBridge, LocationProvider},
    params::{ParamPart, QueryParam},
    state::{ErrorState, Origin, Reconciliation, UrlState},
    url_model::{ParsedUrl, UrlField},
};

/// An edit to the parameter list. Indices refer to the list as currently
/// derived from the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamEdit {
    Set {
        index: usize,
        part: ParamPart,
        value: String,
    },
    Remove {
        index: usize,
    },
    Append(QueryParam),
}

/// One user edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// The raw text field changed.
    Text(String),
    /// A structured field changed.
    Field(UrlField, String),
    /// The parameter list changed.
    Param(ParamEdit),
}

impl Edit {
    pub fn origin(&self) -> Origin {
        match self {
            Edit::Text(_) => Origin::Text,
            Edit::Field(..) | Edit::Param(_) => Origin::Structured,
        }
    }
}

/// Work left for the caller once a transition has produced its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Mirror this settled text into the host location.
    Publish(String),
}

/// The result of applying one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: UrlState,
    pub error: ErrorState,
    pub effects: Vec<Effect>,
}

/// Applies `edit` to a copy of `state` and reconciles it.
///
/// Fails only when a parameter edit addresses an index that does not exist;
/// `state` is never modified.
pub fn transition(state: &UrlState, edit: Edit) -> Result<Transition, ParamError> {
    let mut next = state.clone();
    apply(&mut next, edit)?;
    Ok(settle(next))
}

/// Reconciles a state whose text was replaced wholesale. Text edits cannot
/// fail to apply, only to parse.
fn transition_text(state: &UrlState, text: String) -> Transition {
    let mut next = state.clone();
    next.text = text;
    next.origin = Origin::Text;
    #[cfg(feature = "tracing")]
    tracing::trace!(origin = ?next.origin, "applied edit");
    settle(next)
}

fn settle(mut next: UrlState) -> Transition {
    let (error, effects) = match next.reconcile() {
        Some(Reconciliation::Rejected(err)) => (ErrorState::from(&err), vec![]),
        Some(Reconciliation::Parsed | Reconciliation::Formatted) => {
            let text = next.text.clone();
            (ErrorState::default(), vec![Effect::Publish(text)])
        }
        None => (ErrorState::default(), vec![]),
    };

    Transition {
        state: next,
        error,
        effects,
    }
}

fn apply(state: &mut UrlState, edit: Edit) -> Result<(), ParamError> {
    let origin = edit.origin();
    match edit {
        Edit::Text(text) => state.text = text,
        Edit::Field(field, value) => state.structured.set_field(field, &value),
        Edit::Param(op) => {
            let params = state.structured.params();
            let params = match op {
                ParamEdit::Set { index, part, value } => {
                    params.set_at(index, part, value)?
                }
                ParamEdit::Remove { index } => params.remove_at(index)?,
                ParamEdit::Append(entry) => params.append(entry),
            };
            state.structured.set_params(&params);
        }
    }
    state.origin = origin;
    #[cfg(feature = "tracing")]
    tracing::trace!(?origin, "applied edit");
    Ok(())
}

/// Owns the current [`UrlState`] and the error channel, and publishes every
/// settled text through a [`LocationBridge`].
#[derive(Debug)]
pub struct SyncEngine<L> {
    state: UrlState,
    error: ErrorState,
    bridge: LocationBridge<L>,
}

impl<L: LocationProvider> SyncEngine<L> {
    /// Starts from the bridge's initial value.
    ///
    /// If that value does not parse, it is kept as the text and reported on
    /// the error channel, and the structured fields start from the host's own
    /// location instead.
    pub fn new(mut bridge: LocationBridge<L>) -> Result<Self, LocationError> {
        let text = bridge.initial()?;
        let (state, error) = match UrlState::parse(text.clone()) {
            Ok(state) => (state, ErrorState::default()),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("initial URL {text:?} is invalid: {err}");
                let href = bridge.provider().current()?;
                let structured = ParsedUrl::parse(&href).map_err(|e| {
                    LocationError::InvalidLocation(format!("{href}: {e}"))
                })?;
                let state = UrlState {
                    text,
                    structured,
                    origin: Origin::None,
                };
                (state, ErrorState::from(&err))
            }
        };
        Ok(Self {
            state,
            error,
            bridge,
        })
    }

    pub fn state(&self) -> &UrlState {
        &self.state
    }

    pub fn error(&self) -> &ErrorState {
        &self.error
    }

    pub fn bridge(&self) -> &LocationBridge<L> {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut LocationBridge<L> {
        &mut self.bridge
    }

    pub fn into_bridge(self) -> LocationBridge<L> {
        self.bridge
    }

    /// Applies one edit, reconciles, then publishes the settled text.
    ///
    /// A text that fails to parse is not an error here: it stays in the text
    /// field and its reason is put on the error channel. An out-of-range
    /// parameter index rejects the edit and leaves everything untouched.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self))
    )]
    pub fn apply_edit(&mut self, edit: Edit) -> Result<&UrlState, EditError> {
        let Transition {
            state,
            error,
            effects,
        } = transition(&self.state, edit).map_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::error!("rejected parameter edit: {err}");
            err
        })?;

        #[cfg(feature = "tracing")]
        {
            if !error.is_empty() {
                tracing::warn!("{error}");
            }
        }

        self.state = state;
        self.error = error;
        self.run_effects(effects)?;
        Ok(&self.state)
    }

    pub fn edit_text(
        &mut self,
        text: impl Into<String>,
    ) -> Result<&UrlState, EditError> {
        self.apply_edit(Edit::Text(text.into()))
    }

    pub fn set_field(
        &mut self,
        field: UrlField,
        value: impl Into<String>,
    ) -> Result<&UrlState, EditError> {
        self.apply_edit(Edit::Field(field, value.into()))
    }

    pub fn set_param(
        &mut self,
        index: usize,
        part: ParamPart,
        value: impl Into<String>,
    ) -> Result<&UrlState, EditError> {
        self.apply_edit(Edit::Param(ParamEdit::Set {
            index,
            part,
            value: value.into(),
        }))
    }

    pub fn remove_param(&mut self, index: usize) -> Result<&UrlState, EditError> {
        self.apply_edit(Edit::Param(ParamEdit::Remove { index }))
    }

    /// Appends an empty `=` entry.
    pub fn add_param(&mut self) -> Result<&UrlState, EditError> {
        self.apply_edit(Edit::Param(ParamEdit::Append(QueryParam::default())))
    }

    /// Re-reads the value from the host location after it changed on its own
    /// (back/forward navigation) and applies it as a text edit, without
    /// pushing another history entry.
    pub fn restore_from_location(&mut self) -> Result<&UrlState, LocationError> {
        let text = self.bridge.initial()?;
        let Transition { state, error, .. } = transition_text(&self.state, text);
        self.bridge.mark_published(&state.text);
        self.state = state;
        self.error = error;
        Ok(&self.state)
    }

    fn run_effects(&mut self, effects: Vec<Effect>) -> Result<(), EditError> {
        for effect in effects {
            match effect {
                Effect::Publish(text) => {
                    if let Err(err) = self.bridge.publish(&text) {
                        #[cfg(feature = "tracing")]
                        tracing::error!("failed to publish {text:?}: {err}");
                        return Err(err.into());
                    }
                }
            }
        }
        Ok(())
    }
}
