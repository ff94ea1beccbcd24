//! Reactive snapshots of the engine for renderers.

use crate::{
    engine::{Edit, SyncEngine},
    error::{EditError, LocationError},
    location::LocationProvider,
    state::{ErrorState, UrlState},
};
use reactive_graph::{
    signal::{ArcReadSignal, ArcRwSignal},
    traits::{Set, WithUntracked},
};

/// Wraps a [`SyncEngine`] and mirrors each settled state into signals.
///
/// Renderers subscribe to [`SyncStore::state`] and [`SyncStore::error`];
/// all writes go through [`SyncStore::apply_edit`], so a subscriber is
/// only ever notified with a reconciled state.
#[derive(Debug)]
pub struct SyncStore<L> {
    engine: SyncEngine<L>,
    state: ArcRwSignal<UrlState>,
    error: ArcRwSignal<ErrorState>,
}

impl<L: LocationProvider> SyncStore<L> {
    pub fn new(engine: SyncEngine<L>) -> Self {
        let state = ArcRwSignal::new(engine.state().clone());
        let error = ArcRwSignal::new(engine.error().clone());
        Self {
            engine,
            state,
            error,
        }
    }

    pub fn state(&self) -> ArcReadSignal<UrlState> {
        self.state.read_only()
    }

    pub fn error(&self) -> ArcReadSignal<ErrorState> {
        self.error.read_only()
    }

    pub fn engine(&self) -> &SyncEngine<L> {
        &self.engine
    }

    pub fn apply_edit(&mut self, edit: Edit) -> Result<(), EditError> {
        let result = self.engine.apply_edit(edit).map(|_| ());
        self.notify();
        result
    }

    pub fn restore_from_location(&mut self) -> Result<(), LocationError> {
        let result = self.engine.restore_from_location().map(|_| ());
        self.notify();
        result
    }

    fn notify(&self) {
        let state = self.engine.state();
        if self.state.with_untracked(|current| current != state) {
            self.state.set(state.clone());
        }
        let error = self.engine.error();
        if self.error.with_untracked(|current| current != error) {
            self.error.set(error.clone());
        }
    }
}
