use crate::core::orchestrator::FetchOrchestrator;
use crate::core::reducer::{reduce, AggregateState, Tagged};
use crate::domain::ports::CardCatalog;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Owns the aggregate state and is the only place events are reduced.
pub struct SweepEngine<C: CardCatalog + 'static> {
    orchestrator: FetchOrchestrator<C>,
    events: UnboundedReceiver<Tagged>,
    state: AggregateState,
}

impl<C: CardCatalog + 'static> SweepEngine<C> {
    pub fn new(catalog: Arc<C>, base_url: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            orchestrator: FetchOrchestrator::new(catalog, base_url, tx),
            events: rx,
            state: AggregateState::new(),
        }
    }

    pub fn state(&self) -> &AggregateState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.orchestrator.generation()
    }

    /// Starts a sweep over `identifiers`, superseding any sweep in progress.
    ///
    /// The `Reset` and the initial `RequestStarted` events are reduced before
    /// this returns, so the state reports loading as soon as any set is
    /// selected.
    pub fn initiate<'a, I>(&mut self, identifiers: I) -> u64
    where
        I: IntoIterator<Item = &'a str>,
    {
        let generation = self.orchestrator.initiate(identifiers);
        // orchestrator 已同步送出這些事件，直接套用
        while let Ok(tagged) = self.events.try_recv() {
            self.apply(tagged);
        }
        generation
    }

    /// Is the state caught up with the latest generation and idle?
    pub fn is_settled(&self) -> bool {
        self.state.generation() == self.orchestrator.generation() && !self.state.is_loading()
    }

    /// Waits for the next event and reduces it. Returns `false` once no
    /// event can arrive anymore, which only happens after the engine's own
    /// sender is gone.
    pub async fn process_next(&mut self) -> bool {
        match self.events.recv().await {
            Some(tagged) => {
                self.apply(tagged);
                true
            }
            None => false,
        }
    }

    /// Reduces every event until the current generation has no request in
    /// flight.
    ///
    /// Each chain answers its last announced request even when its task
    /// panics, so a settled state is always reached.
    pub async fn settle(&mut self) -> &AggregateState {
        while !self.is_settled() {
            if !self.process_next().await {
                break;
            }
        }

        tracing::info!(
            "✅ Sweep settled: {} priced card(s), {} failed source(s)",
            self.state.cards().len(),
            self.state.failures().len()
        );
        &self.state
    }

    fn apply(&mut self, tagged: Tagged) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, tagged);
    }
}
