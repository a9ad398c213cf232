//! Search execution with an injected policy.

use super::simulated::SimulatedSource;
use crate::api::{ApiClient, ApiError};
use crate::catalog::JournalDirectory;
use crate::domain::{Notice, ResultRecord, SearchError, SearchQuery};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Where results come from.
#[derive(Debug, Clone)]
pub enum SearchPolicy {
    /// `POST /buscar` on the backend, degrading to simulated data.
    Remote(ApiClient),
    /// Locally generated data only.
    Simulated,
}

/// Result of one executed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub records: Vec<ResultRecord>,
    /// Feedback to show alongside the results, if any.
    pub notice: Option<Notice>,
    /// `true` when the records were generated locally.
    pub simulated: bool,
}

/// Runs queries under a fixed [`SearchPolicy`].
///
/// Shared between concurrently running searches behind an `Arc`; the
/// simulated generator is the only mutable part and is locked only while
/// generating.
#[derive(Debug)]
pub struct SearchExecutor {
    policy: SearchPolicy,
    simulated: Mutex<SimulatedSource>,
    simulated_delay: Duration,
}

impl SearchExecutor {
    /// Creates an executor.
    ///
    /// # Parameters
    ///
    /// * `policy` - Result source
    /// * `simulated_delay` - Artificial latency applied to simulated searches
    /// * `seed` - Optional RNG seed for reproducible simulated output
    #[must_use]
    pub fn new(policy: SearchPolicy, simulated_delay: Duration, seed: Option<u64>) -> Self {
        Self {
            policy,
            simulated: Mutex::new(SimulatedSource::new(seed)),
            simulated_delay,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Executes `query` against the configured source.
    ///
    /// Remote searches never fail on network problems: the executor falls
    /// back to simulated data and attaches a warning. A backend that answers
    /// with an error envelope yields an empty result set and the backend's
    /// message.
    ///
    /// # Errors
    ///
    /// [`SearchError::EmptyDirectory`] when simulated data is needed and
    /// there is no journal to attribute it to.
    #[tracing::instrument(level = "debug", skip_all, fields(keywords = %query.keywords, limit = query.limit))]
    pub async fn execute(
        &self,
        query: &SearchQuery,
        directory: &JournalDirectory,
    ) -> Result<SearchOutcome, SearchError> {
        let SearchPolicy::Remote(client) = &self.policy else {
            if !self.simulated_delay.is_zero() {
                tokio::time::sleep(self.simulated_delay).await;
            }
            return self.simulate(query, directory, None);
        };

        match fetch_remote(client, query).await {
            Ok((records, msg)) => {
                tracing::info!(count = records.len(), "remote search completed");
                Ok(SearchOutcome {
                    records,
                    notice: msg.map(Notice::success),
                    simulated: false,
                })
            }
            Err(SearchError::Backend(msg)) => {
                tracing::warn!(%msg, "backend reported search error");
                Ok(SearchOutcome {
                    records: Vec::new(),
                    notice: Some(Notice::error(msg)),
                    simulated: false,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "remote search failed, using simulated results");
                let notice = Notice::warning(format!("{e}. Exibindo resultados simulados."));
                self.simulate(query, directory, Some(notice))
            }
        }
    }

    fn simulate(
        &self,
        query: &SearchQuery,
        directory: &JournalDirectory,
        notice: Option<Notice>,
    ) -> Result<SearchOutcome, SearchError> {
        let records = self
            .simulated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .generate(query, directory)?;

        Ok(SearchOutcome {
            records,
            notice,
            simulated: true,
        })
    }
}

/// Runs the backend search and normalizes its envelope.
///
/// Records beyond `query.limit` and records repeating an earlier id are
/// dropped. Returns the records plus the backend's message.
async fn fetch_remote(
    client: &ApiClient,
    query: &SearchQuery,
) -> Result<(Vec<ResultRecord>, Option<String>), SearchError> {
    let envelope = client
        .search(query)
        .await
        .map_err(|e: ApiError| SearchError::Network(e.to_string()))?;

    let records = match (envelope.is_ok(), envelope.resultados) {
        (true, Some(records)) => records,
        _ => {
            let msg = envelope
                .msg
                .unwrap_or_else(|| "Nenhum resultado encontrado.".to_string());
            return Err(SearchError::Backend(msg));
        }
    };

    let mut seen = HashSet::new();
    let records = records
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .take(query.limit as usize)
        .collect();

    Ok((records, envelope.msg))
}
