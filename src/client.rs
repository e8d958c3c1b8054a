//! Multi-provider search session
//!
//! [`JobClient`] owns one adapter per activated provider plus the shared
//! HTTP transport, and tracks each provider's latest [`PageResult`]. The
//! table is replaced wholesale by every `search`/`next` call; entries never
//! survive a superseding call.

use crate::config::JobsConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::model::PageResult;
use crate::providers::{build_adapters, JobApi, Provider};
use crate::types::SearchCriteria;
use futures::future::join_all;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Latest page result per provider, ordered by provider name
pub type ResultTable = BTreeMap<Provider, PageResult>;

/// Aggregating client over all activated providers.
///
/// ```no_run
/// # async fn run() -> jobhub::Result<()> {
/// use jobhub::{JobClient, SearchCriteria};
///
/// let mut client = JobClient::from_yaml_file("jobhub.yml")?;
/// client.search(&SearchCriteria::keywords("ruby")).await?;
/// println!("{} offers total", client.count(None));
/// while client.next().await?.is_some() {
///     // walk every provider forward one page at a time
/// }
/// # Ok(())
/// # }
/// ```
pub struct JobClient {
    http: HttpClient,
    adapters: Vec<Box<dyn JobApi>>,
    table: ResultTable,
}

impl JobClient {
    /// Build a session from resolved settings
    pub fn new(config: &JobsConfig) -> Self {
        Self {
            http: HttpClient::new(),
            adapters: build_adapters(config),
            table: ResultTable::new(),
        }
    }

    /// Build a session from a YAML settings file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(&JobsConfig::from_yaml_file(path)?))
    }

    #[cfg(test)]
    pub(crate) fn with_adapters(adapters: Vec<Box<dyn JobApi>>) -> Self {
        Self {
            http: HttpClient::new(),
            adapters,
            table: ResultTable::new(),
        }
    }

    /// Providers this session fans out to
    pub fn providers(&self) -> Vec<Provider> {
        self.adapters.iter().map(|a| a.provider()).collect()
    }

    /// Latest results, keyed by provider
    pub fn jobs_table(&self) -> &ResultTable {
        &self.table
    }

    /// Issue the same criteria to every activated provider and replace the
    /// result table with the fresh responses.
    ///
    /// Per-provider failures (transport, backend, misconfiguration) land in
    /// the table as error-shaped entries; only a malformed success payload
    /// aborts the whole call, in which case the previous table is kept.
    pub async fn search(&mut self, criteria: &SearchCriteria) -> Result<&ResultTable> {
        info!(keywords = %criteria.keywords, providers = self.adapters.len(), "searching");
        let http = &self.http;
        let calls = self
            .adapters
            .iter()
            .map(|adapter| async move { (adapter.provider(), adapter.search(http, criteria).await) });
        let fresh = Self::collect(join_all(calls).await)?;
        self.table = fresh;
        Ok(&self.table)
    }

    /// Advance every provider that has pages left.
    ///
    /// Providers already on their last page, and providers whose latest
    /// result had no pages at all, drop out of the new table. Returns
    /// `Ok(None)` when no provider can advance; the stored table is left
    /// untouched in that case.
    pub async fn next(&mut self) -> Result<Option<&ResultTable>> {
        let http = &self.http;
        let pending: Vec<_> = self
            .table
            .iter()
            .filter(|(_, result)| result.has_next())
            .filter_map(|(provider, result)| {
                let adapter = self.adapters.iter().find(|a| a.provider() == *provider)?;
                Some((adapter, result))
            })
            .collect();
        if pending.is_empty() {
            debug!("no provider has further pages");
            return Ok(None);
        }

        let calls = pending.into_iter().map(|(adapter, result)| {
            // page is always Some here, has_next checked it
            let page = result.page.unwrap_or(0) + 1;
            async move {
                (
                    adapter.provider(),
                    adapter.page(http, &result.key, page).await,
                )
            }
        });
        let fresh = Self::collect(join_all(calls).await)?;
        self.table = fresh;
        Ok(Some(&self.table))
    }

    /// Total result count, either for one provider or summed over the table
    pub fn count(&self, provider: Option<Provider>) -> u64 {
        match provider {
            Some(p) => self.table.get(&p).map_or(0, |r| r.total_results),
            None => self.table.values().map(|r| r.total_results).sum(),
        }
    }

    // All-or-nothing commit: the first hard error discards the batch.
    fn collect(outcomes: Vec<(Provider, Result<PageResult>)>) -> Result<ResultTable> {
        let mut table = ResultTable::new();
        for (provider, outcome) in outcomes {
            table.insert(provider, outcome?);
        }
        Ok(table)
    }
}

impl std::fmt::Debug for JobClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobClient")
            .field("providers", &self.providers())
            .field("entries", &self.table.len())
            .finish_non_exhaustive()
    }
}
