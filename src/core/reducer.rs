use crate::domain::model::{CardRecord, FetchFailure, SourceFailure};
use std::collections::{BTreeMap, HashSet};

/// Events produced by the fetch orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepEvent {
    Reset,
    RequestStarted(String),
    PageFetched(Vec<CardRecord>),
    RequestCompleted(String),
    FetchFailed {
        source: String,
        url: String,
        reason: FetchFailure,
    },
}

/// An event tagged with the generation of the `initiate` call that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    pub generation: u64,
    pub event: SweepEvent,
}

impl Tagged {
    pub fn new(generation: u64, event: SweepEvent) -> Self {
        Self { generation, event }
    }
}

/// Combined result of every chain of the current generation.
///
/// Fields are only changed through [`reduce`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateState {
    cards: Vec<CardRecord>,
    pending_requests: HashSet<String>,
    failures: BTreeMap<String, SourceFailure>,
    generation: u64,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn pending_requests(&self) -> &HashSet<String> {
        &self.pending_requests
    }

    pub fn failures(&self) -> &BTreeMap<String, SourceFailure> {
        &self.failures
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// While loading, `cards` is not final and should not be presented.
    pub fn is_loading(&self) -> bool {
        !self.pending_requests.is_empty()
    }

    /// Cards to present, or `None` while requests are in flight.
    pub fn settled_cards(&self) -> Option<&[CardRecord]> {
        if self.is_loading() {
            None
        } else {
            Some(&self.cards)
        }
    }
}

/// Pure transition function of the aggregation state machine.
pub fn reduce(mut state: AggregateState, tagged: Tagged) -> AggregateState {
    let Tagged { generation, event } = tagged;

    match event {
        SweepEvent::Reset => {
            return AggregateState {
                generation,
                ..AggregateState::default()
            };
        }
        _ if generation != state.generation => {
            tracing::trace!(
                "Dropping stale event from generation {} (current {})",
                generation,
                state.generation
            );
        }
        SweepEvent::RequestStarted(url) => {
            state.pending_requests.insert(url);
        }
        SweepEvent::PageFetched(records) => {
            let mut cards = std::mem::take(&mut state.cards);
            cards.extend(records);
            state.cards = sort_desc(filter_has_price(cards));
        }
        SweepEvent::RequestCompleted(url) => {
            state.pending_requests.remove(&url);
        }
        SweepEvent::FetchFailed {
            source,
            url,
            reason,
        } => {
            state.pending_requests.remove(&url);
            state.failures.insert(source, SourceFailure { url, reason });
        }
    }

    state
}

fn filter_has_price(cards: Vec<CardRecord>) -> Vec<CardRecord> {
    cards.into_iter().filter(CardRecord::has_price).collect()
}

// Stable: equal prices keep arrival order.
fn sort_desc(mut cards: Vec<CardRecord>) -> Vec<CardRecord> {
    cards.sort_by(|a, b| b.price_value().total_cmp(&a.price_value()));
    cards
}
