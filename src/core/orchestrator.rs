use crate::core::reducer::{SweepEvent, Tagged};
use crate::domain::model::FetchFailure;
use crate::domain::ports::CardCatalog;
use crate::domain::selection::SelectionStore;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

/// Search predicate appended to every set filter: priced cards, every printing.
pub const PRICED_PRINTS_QUERY: &str = "eur>=0.01 unique:prints";

/// Starts one pagination chain per selected set and feeds their events into
/// a single channel.
pub struct FetchOrchestrator<C: CardCatalog + 'static> {
    catalog: Arc<C>,
    base_url: String,
    events: UnboundedSender<Tagged>,
    generation: u64,
}

impl<C: CardCatalog + 'static> FetchOrchestrator<C> {
    pub fn new(catalog: Arc<C>, base_url: impl Into<String>, events: UnboundedSender<Tagged>) -> Self {
        Self {
            catalog,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            events,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new generation: emits `Reset`, then `RequestStarted` for every
    /// initial search URL, then spawns the chains. Chains of older generations
    /// keep running; their events are discarded by the reducer.
    ///
    /// Identifiers are trimmed and lowercased; duplicates get a single chain.
    /// Every event of the new generation up to the last initial
    /// `RequestStarted` is in the channel when this returns.
    ///
    /// Must be called from within a tokio runtime.
    pub fn initiate<'a, I>(&mut self, identifiers: I) -> u64
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.generation += 1;
        let generation = self.generation;
        self.emit(generation, SweepEvent::Reset);

        // 同一個 set 只能有一條 chain，pending 以 URL 為 key
        let selection: SelectionStore = identifiers.into_iter().collect();
        for source in selection.ids() {
            let url = search_url(&self.base_url, source);
            self.emit(generation, SweepEvent::RequestStarted(url.clone()));

            let chain = Chain {
                catalog: Arc::clone(&self.catalog),
                source: source.to_string(),
                generation,
                events: self.events.clone(),
                in_flight: Some(url),
            };
            tokio::spawn(chain.run());
        }

        tracing::info!(
            "🚀 Generation {}: started {} pagination chain(s)",
            generation,
            selection.len()
        );
        generation
    }

    fn emit(&self, generation: u64, event: SweepEvent) {
        // 接收端已關閉表示沒有人在聽，直接丟棄
        let _ = self.events.send(Tagged::new(generation, event));
    }
}

/// Initial search URL for one set.
pub fn search_url(base_url: &str, source: &str) -> String {
    let query = format!("s:{} {}", source, PRICED_PRINTS_QUERY);
    match Url::parse(&format!("{}/cards/search", base_url.trim_end_matches('/'))) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("q", &query);
            url.to_string()
        }
        // base URL is validated by config; keep the raw form otherwise
        Err(_) => format!("{}/cards/search?q={}", base_url, query),
    }
}

struct Chain<C: CardCatalog + 'static> {
    catalog: Arc<C>,
    source: String,
    generation: u64,
    events: UnboundedSender<Tagged>,
    /// URL announced with `RequestStarted` and not yet answered.
    in_flight: Option<String>,
}

impl<C: CardCatalog + 'static> Chain<C> {
    /// Fetches pages strictly one after another until the catalog reports no
    /// more results or a fetch fails. Every URL announced with
    /// `RequestStarted` is answered by exactly one `RequestCompleted` or
    /// `FetchFailed`, also when the task panics or is aborted (see `Drop`).
    async fn run(mut self) {
        let mut pages = 0usize;

        while let Some(url) = self.in_flight.clone() {
            match self.catalog.fetch_page(&url).await {
                Ok(page) => {
                    pages += 1;
                    tracing::debug!(
                        "[{}] page {} returned {} card(s), has_more={}",
                        self.source,
                        pages,
                        page.data.len(),
                        page.has_more
                    );

                    self.emit(SweepEvent::PageFetched(page.data));
                    let next = if page.has_more { page.next_page } else { None };
                    if let Some(ref next_url) = next {
                        self.emit(SweepEvent::RequestStarted(next_url.clone()));
                    }
                    self.emit(SweepEvent::RequestCompleted(url));
                    self.in_flight = next;
                }
                Err(e) => {
                    tracing::warn!("⚠️ [{}] fetch of {} failed: {}", self.source, url, e);
                    self.in_flight = None;
                    self.emit(SweepEvent::FetchFailed {
                        source: self.source.clone(),
                        url,
                        reason: e.to_failure(),
                    });
                    return;
                }
            }

            if self.events.is_closed() {
                tracing::debug!("[{}] event receiver gone, stopping chain", self.source);
                self.in_flight = None;
                return;
            }
        }
    }

    fn emit(&self, event: SweepEvent) {
        let _ = self.events.send(Tagged::new(self.generation, event));
    }
}

impl<C: CardCatalog + 'static> Drop for Chain<C> {
    // 任務 panic 或被 abort 時，仍要回覆最後一個未完成的請求
    fn drop(&mut self) {
        if let Some(url) = self.in_flight.take() {
            tracing::error!("❌ [{}] chain stopped while {} was in flight", self.source, url);
            self.emit(SweepEvent::FetchFailed {
                source: self.source.clone(),
                url,
                reason: FetchFailure::NetworkError(
                    "pagination task stopped before the request resolved".to_string(),
                ),
            });
        }
    }
}
