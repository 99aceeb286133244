//! Debounced dish autocomplete
//!
//! Keystrokes go in through a channel; a query fires only once the input
//! has been quiet for the configured window. A newer keystroke resets the
//! window and aborts any request still in flight, so only the latest text
//! ever produces suggestions.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use shared::models::{CourseType, DishSuggestion};

use crate::api::FicheApi;
use crate::http::HttpClient;
use crate::ClientResult;

/// Where suggestions come from
#[async_trait]
pub trait DishSource: Send + Sync + 'static {
    /// `None` asks for the default suggestions of the course
    async fn suggest(&self, query: Option<&str>, course: CourseType) -> ClientResult<Vec<DishSuggestion>>;
}

#[async_trait]
impl<H: HttpClient + 'static> DishSource for FicheApi<H> {
    async fn suggest(&self, query: Option<&str>, course: CourseType) -> ClientResult<Vec<DishSuggestion>> {
        self.search_dishes(query, Some(course)).await
    }
}

/// Current text of one dish row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    /// Index of the draft row being typed into
    pub line: usize,
    pub course: CourseType,
    pub text: String,
}

impl SearchInput {
    pub fn new(line: usize, course: CourseType, text: impl Into<String>) -> Self {
        Self {
            line,
            course,
            text: text.into(),
        }
    }

    fn query(&self) -> Option<&str> {
        let text = self.text.trim();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub input: SearchInput,
    pub suggestions: Vec<DishSuggestion>,
}

type Fetch = JoinHandle<(SearchInput, ClientResult<Vec<DishSuggestion>>)>;

/// Handle used by the form to feed keystrokes
#[derive(Debug, Clone)]
pub struct DishSearchHandle {
    tx: mpsc::Sender<SearchInput>,
}

impl DishSearchHandle {
    /// Report new text; returns `false` once the worker is gone
    pub async fn input(&self, input: SearchInput) -> bool {
        self.tx.send(input).await.is_ok()
    }
}

pub struct DishSearchWorker<S> {
    source: Arc<S>,
    debounce: Duration,
    input_rx: mpsc::Receiver<SearchInput>,
    results_tx: mpsc::Sender<SearchResults>,
    shutdown: CancellationToken,
}

impl<S: DishSource> DishSearchWorker<S> {
    /// Build a worker with its input handle and result stream
    pub fn new(
        source: Arc<S>,
        debounce: Duration,
        shutdown: CancellationToken,
    ) -> (Self, DishSearchHandle, mpsc::Receiver<SearchResults>) {
        let (tx, input_rx) = mpsc::channel(32);
        let (results_tx, results_rx) = mpsc::channel(8);
        let worker = Self {
            source,
            debounce,
            input_rx,
            results_tx,
            shutdown,
        };
        (worker, DishSearchHandle { tx }, results_rx)
    }

    pub async fn run(mut self) {
        tracing::debug!(debounce_ms = self.debounce.as_millis() as u64, "Dish search started");

        let mut pending: Option<SearchInput> = None;
        let mut deadline: Option<Instant> = None;
        let mut in_flight: Option<Fetch> = None;

        loop {
            let sleep_until = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            // newer input must abort a fetch that finished in the same poll
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    break;
                }

                received = self.input_rx.recv() => {
                    let Some(input) = received else {
                        break;
                    };
                    if let Some(stale) = in_flight.take() {
                        stale.abort();
                    }
                    pending = Some(input);
                    deadline = Some(Instant::now() + self.debounce);
                }

                _ = tokio::time::sleep_until(sleep_until), if deadline.is_some() => {
                    deadline = None;
                    if let Some(input) = pending.take() {
                        in_flight = Some(self.fetch(input));
                    }
                }

                joined = join(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    match joined {
                        Ok((input, Ok(suggestions))) => {
                            let results = SearchResults { input, suggestions };
                            if self.results_tx.send(results).await.is_err() {
                                break;
                            }
                        }
                        Ok((input, Err(e))) => {
                            tracing::warn!(query = %input.text, error = %e, "Dish search failed");
                        }
                        Err(e) if e.is_cancelled() => {}
                        Err(e) => {
                            tracing::error!("Dish search task panicked: {e}");
                        }
                    }
                }
            }
        }

        if let Some(stale) = in_flight.take() {
            stale.abort();
        }
        tracing::debug!("Dish search stopped");
    }

    fn fetch(&self, input: SearchInput) -> Fetch {
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let result = source.suggest(input.query(), input.course).await;
            (input, result)
        })
    }
}

async fn join(
    fetch: &mut Option<Fetch>,
) -> Result<(SearchInput, ClientResult<Vec<DishSuggestion>>), JoinError> {
    match fetch {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Records every query with the elapsed time since the test began
    struct RecordingSource {
        started: Instant,
        latency: Duration,
        calls: Mutex<Vec<(Option<String>, CourseType, Duration)>>,
    }

    impl RecordingSource {
        fn new(latency: Duration) -> Arc<Self> {
            Arc::new(Self {
                started: Instant::now(),
                latency,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(Option<String>, CourseType, Duration)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DishSource for RecordingSource {
        async fn suggest(&self, query: Option<&str>, course: CourseType) -> ClientResult<Vec<DishSuggestion>> {
            self.calls.lock().unwrap().push((
                query.map(str::to_string),
                course,
                self.started.elapsed(),
            ));
            tokio::time::sleep(self.latency).await;
            Ok(vec![DishSuggestion {
                name: format!("{} maison", query.unwrap_or("Soupe")),
                course,
            }])
        }
    }

    /// Holds the "bl" query until the gate opens; other queries answer at once
    struct GatedSource {
        gate: Notify,
        calls: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl DishSource for GatedSource {
        async fn suggest(&self, query: Option<&str>, course: CourseType) -> ClientResult<Vec<DishSuggestion>> {
            self.calls.lock().unwrap().push(query.map(str::to_string));
            if query == Some("bl") {
                self.gate.notified().await;
            }
            Ok(vec![DishSuggestion {
                name: format!("{} maison", query.unwrap_or("Soupe")),
                course,
            }])
        }
    }

    fn spawn<S: DishSource>(source: Arc<S>) -> (DishSearchHandle, mpsc::Receiver<SearchResults>, CancellationToken) {
        let shutdown = CancellationToken::new();
        let (worker, handle, results) =
            DishSearchWorker::new(source, Duration::from_millis(200), shutdown.clone());
        tokio::spawn(worker.run());
        (handle, results, shutdown)
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_keystrokes_fire_one_query() {
        let source = RecordingSource::new(Duration::ZERO);
        let (handle, mut results, shutdown) = spawn(source.clone());

        for text in ["s", "so", "sou"] {
            if text != "s" {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            assert!(handle.input(SearchInput::new(0, CourseType::Entree, text)).await);
        }

        let received = results.recv().await.unwrap();
        assert_eq!(received.input.text, "sou");
        assert_eq!(received.suggestions[0].name, "sou maison");

        let calls = source.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.as_deref(), Some("sou"));
        assert_eq!(calls[0].2, Duration::from_millis(400));

        shutdown.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text_asks_for_course_defaults() {
        let source = RecordingSource::new(Duration::ZERO);
        let (handle, mut results, shutdown) = spawn(source.clone());

        handle.input(SearchInput::new(2, CourseType::Dessert, "  ")).await;
        let received = results.recv().await.unwrap();
        assert_eq!(received.input.line, 2);
        assert_eq!(source.calls()[0].0, None);
        assert_eq!(source.calls()[0].1, CourseType::Dessert);

        shutdown.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_keystroke_drops_in_flight_request() {
        let source = RecordingSource::new(Duration::from_millis(500));
        let (handle, mut results, shutdown) = spawn(source.clone());

        handle.input(SearchInput::new(0, CourseType::Plat, "bl")).await;
        // first query fires at 200 ms and is still running at 250 ms
        tokio::time::sleep(Duration::from_millis(250)).await;
        handle.input(SearchInput::new(0, CourseType::Plat, "blan")).await;

        let received = results.recv().await.unwrap();
        assert_eq!(received.input.text, "blan");
        assert_eq!(source.calls().len(), 2);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(results.try_recv().is_err());

        shutdown.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystroke_wins_over_fetch_finishing_together() {
        let source = Arc::new(GatedSource {
            gate: Notify::new(),
            calls: Mutex::new(Vec::new()),
        });
        let (handle, mut results, shutdown) = spawn(source.clone());

        handle.input(SearchInput::new(0, CourseType::Plat, "bl")).await;
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(source.calls.lock().unwrap().len(), 1);

        // release the fetch and type again before the worker gets to run
        source.gate.notify_one();
        handle.input(SearchInput::new(0, CourseType::Plat, "blan")).await;

        let received = results.recv().await.unwrap();
        assert_eq!(received.input.text, "blan");

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(results.try_recv().is_err());

        shutdown.cancel();
    }
}
