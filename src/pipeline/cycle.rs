// src/pipeline/cycle.rs

//! Cycle orchestrator.
//!
//! One cycle runs fetch → filter → classify → dedup → publish to completion.
//! Per-item failures (a source, one insert, one channel call) are logged and
//! skipped; the cycle itself always finishes. Only opening the store can
//! abort a run, and that happens before the first cycle starts.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future;
use futures::stream::{self, StreamExt};

use crate::channels::PublishChannel;
use crate::error::Result;
use crate::models::{ChannelStatus, ChannelStatuses, StoredJob};
use crate::pipeline::{LocationFilter, classify};
use crate::sources::JobSource;
use crate::store::{InsertOutcome, JobStore};

/// Counters for one completed cycle.
#[derive(Debug, Default)]
pub struct CycleSummary {
    /// Raw postings collected from all sources
    pub fetched: usize,
    /// Sources whose fetch failed this cycle
    pub source_failures: usize,
    /// Postings dropped by the location filter
    pub filtered_out: usize,
    /// Postings newly inserted (not duplicates)
    pub new_jobs: usize,
    /// Pending records that completed a publish pass
    pub pending_processed: usize,
    /// Per-item store failures (insert or mark-published)
    pub store_errors: usize,
    /// Successful deliveries per channel name
    pub channel_success: BTreeMap<String, usize>,
}

/// Runs the full ingest/publish cycle over configured sources and channels.
pub struct CycleRunner {
    sources: Vec<Box<dyn JobSource>>,
    channels: Vec<Box<dyn PublishChannel>>,
    store: Arc<dyn JobStore>,
    filter: LocationFilter,
    max_concurrent: usize,
}

impl CycleRunner {
    pub fn new(
        sources: Vec<Box<dyn JobSource>>,
        channels: Vec<Box<dyn PublishChannel>>,
        store: Arc<dyn JobStore>,
        filter: LocationFilter,
        max_concurrent: usize,
    ) -> Self {
        Self {
            sources,
            channels,
            store,
            filter,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Run one cycle to completion.
    pub async fn run(&self) -> Result<CycleSummary> {
        log::info!("Starting job fetch cycle...");
        let mut summary = CycleSummary::default();

        // Fetching: all sources concurrently, bounded. A failing source
        // contributes nothing and never aborts the cycle.
        let mut candidates = Vec::new();
        {
            let mut batches = stream::iter(&self.sources)
                .map(|source| async move { (source.name(), source.fetch_jobs().await) })
                .buffer_unordered(self.max_concurrent);

            while let Some((name, result)) = batches.next().await {
                match result {
                    Ok(jobs) => {
                        summary.fetched += jobs.len();
                        candidates.extend(jobs);
                    }
                    Err(error) => {
                        summary.source_failures += 1;
                        log::warn!("Source {name} failed, contributing no postings: {error}");
                    }
                }
            }
        }

        // Filtering + classification + dedup insert.
        for mut posting in candidates {
            if !self.filter.is_allowed(&posting.location) {
                summary.filtered_out += 1;
                continue;
            }

            let (role, experience) = classify(&posting.title, "");
            posting.role_category = role;
            posting.experience_level = experience;

            match self.store.insert(&posting).await {
                Ok(InsertOutcome::Inserted) => summary.new_jobs += 1,
                Ok(InsertOutcome::Duplicate) => {}
                Err(error) => {
                    summary.store_errors += 1;
                    log::warn!(
                        "Skipping '{}' at {} this cycle: {error}",
                        posting.title,
                        posting.company
                    );
                }
            }
        }

        // Publishing: always drain pending records, even when nothing new
        // arrived this cycle. A record that fails every channel is still
        // marked published; there is no automatic retry.
        let pending = match self.store.pending_records().await {
            Ok(pending) => pending,
            Err(error) => {
                summary.store_errors += 1;
                log::error!("Could not query pending records: {error}");
                Vec::new()
            }
        };

        log::info!("Processing {} pending jobs...", pending.len());
        for record in pending {
            let statuses = self.publish_record(&record).await;

            for channel in &self.channels {
                if statuses.get(channel.name()) == Some(ChannelStatus::Success) {
                    *summary
                        .channel_success
                        .entry(channel.name().to_string())
                        .or_insert(0) += 1;
                }
            }

            match self.store.mark_published(&record.fingerprint, &statuses).await {
                Ok(()) => summary.pending_processed += 1,
                Err(error) => {
                    summary.store_errors += 1;
                    log::warn!(
                        "Could not record publish pass for {}: {error}",
                        record.fingerprint
                    );
                }
            }
        }

        log::info!(
            "Cycle complete: {} fetched ({} source failures), {} filtered out, {} new, {} pending processed, successes {:?}",
            summary.fetched,
            summary.source_failures,
            summary.filtered_out,
            summary.new_jobs,
            summary.pending_processed,
            summary.channel_success,
        );

        Ok(summary)
    }

    /// Render and publish one record on every channel.
    ///
    /// Channels run concurrently but all outcomes are awaited before
    /// returning, so `mark_published` never sees partial results.
    async fn publish_record(&self, record: &StoredJob) -> ChannelStatuses {
        let outcomes = future::join_all(self.channels.iter().map(|channel| async move {
            let payload = channel.render(&record.posting);
            let delivered = channel.publish(&payload).await;
            (channel.name(), delivered)
        }))
        .await;

        let mut statuses = ChannelStatuses::default();
        for (name, delivered) in outcomes {
            if !statuses.set(name, ChannelStatus::from_delivered(delivered)) {
                log::warn!("Channel '{name}' has no status column; outcome dropped");
            }
        }
        statuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::channels::ChannelPayload;
    use crate::config::FilterConfig;
    use crate::error::AppError;
    use crate::models::JobPosting;
    use crate::store::SqliteStore;

    struct StaticSource {
        name: &'static str,
        jobs: Vec<JobPosting>,
    }

    #[async_trait]
    impl JobSource for StaticSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch_jobs(&self) -> Result<Vec<JobPosting>> {
            Ok(self.jobs.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl JobSource for FailingSource {
        fn name(&self) -> &'static str {
            "Broken"
        }

        async fn fetch_jobs(&self) -> Result<Vec<JobPosting>> {
            Err(AppError::fetch("Broken", "connection refused"))
        }
    }

    struct FixedChannel {
        name: &'static str,
        deliver: bool,
        published: Mutex<Vec<String>>,
    }

    impl FixedChannel {
        fn new(name: &'static str, deliver: bool) -> Self {
            Self {
                name,
                deliver,
                published: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PublishChannel for FixedChannel {
        fn name(&self) -> &'static str {
            self.name
        }

        fn render(&self, job: &JobPosting) -> ChannelPayload {
            ChannelPayload {
                subject: None,
                body: format!("{} at {}", job.title, job.company),
                tags: Vec::new(),
            }
        }

        async fn publish(&self, payload: &ChannelPayload) -> bool {
            self.published.lock().unwrap().push(payload.body.clone());
            self.deliver
        }
    }

    fn posting(title: &str, location: &str, url: &str) -> JobPosting {
        JobPosting::new(title, "Acme", location, url, "Test").unwrap()
    }

    fn runner_with(
        sources: Vec<Box<dyn JobSource>>,
        channels: Vec<Box<dyn PublishChannel>>,
        store: Arc<SqliteStore>,
    ) -> CycleRunner {
        CycleRunner::new(
            sources,
            channels,
            store,
            LocationFilter::new(&FilterConfig::default()),
            4,
        )
    }

    fn default_channels() -> Vec<Box<dyn PublishChannel>> {
        vec![
            Box::new(FixedChannel::new("chat", true)),
            Box::new(FixedChannel::new("blog", false)),
            Box::new(FixedChannel::new("social", false)),
        ]
    }

    #[tokio::test]
    async fn test_cycle_filters_inserts_and_publishes() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let source = StaticSource {
            name: "Test",
            jobs: vec![
                posting("Backend Engineer", "Bengaluru", "https://x/1"),
                posting("Backend Engineer", "London", "https://x/2"),
            ],
        };
        let runner = runner_with(vec![Box::new(source)], default_channels(), store.clone());

        let summary = runner.run().await.unwrap();

        assert_eq!(summary.fetched, 2);
        assert_eq!(summary.filtered_out, 1);
        assert_eq!(summary.new_jobs, 1);
        assert_eq!(summary.pending_processed, 1);
        assert_eq!(summary.channel_success.get("chat"), Some(&1));
        assert_eq!(summary.channel_success.get("blog"), None);

        // The stored record was classified before insert.
        let fingerprint = posting("Backend Engineer", "Bengaluru", "https://x/1").fingerprint();
        let record = store.find_by_fingerprint(&fingerprint).unwrap().unwrap();
        assert_eq!(record.posting.role_category.as_str(), "Backend");
        assert!(record.is_published);
    }

    #[tokio::test]
    async fn test_failing_source_does_not_block_others() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let good = StaticSource {
            name: "Good",
            jobs: vec![posting("QA Tester", "Pune", "https://x/3")],
        };
        let runner = runner_with(
            vec![Box::new(FailingSource), Box::new(good)],
            default_channels(),
            store.clone(),
        );

        let summary = runner.run().await.unwrap();

        assert_eq!(summary.source_failures, 1);
        assert_eq!(summary.new_jobs, 1);
        assert_eq!(summary.pending_processed, 1);
        assert!(store.pending_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_channels_failing_still_completes_pass() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let source = StaticSource {
            name: "Test",
            jobs: vec![posting("DevOps Engineer", "Mumbai", "https://x/4")],
        };
        let channels: Vec<Box<dyn PublishChannel>> = vec![
            Box::new(FixedChannel::new("chat", false)),
            Box::new(FixedChannel::new("blog", false)),
            Box::new(FixedChannel::new("social", false)),
        ];
        let runner = runner_with(vec![Box::new(source)], channels, store.clone());

        let summary = runner.run().await.unwrap();
        assert_eq!(summary.pending_processed, 1);
        assert!(summary.channel_success.is_empty());

        // Marked published anyway: one attempt per record, no retry path.
        let fingerprint = posting("DevOps Engineer", "Mumbai", "https://x/4").fingerprint();
        let record = store.find_by_fingerprint(&fingerprint).unwrap().unwrap();
        assert!(record.is_published);
        assert_eq!(record.statuses.chat, Some(ChannelStatus::SkippedOrFailed));
        assert_eq!(record.statuses.blog, Some(ChannelStatus::SkippedOrFailed));
        assert_eq!(record.statuses.social, Some(ChannelStatus::SkippedOrFailed));
    }

    #[tokio::test]
    async fn test_second_cycle_absorbs_duplicates() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let jobs = vec![posting("Frontend Engineer", "Chennai", "https://x/5")];
        let make_runner = |store: Arc<SqliteStore>| {
            runner_with(
                vec![Box::new(StaticSource { name: "Test", jobs: jobs.clone() })],
                default_channels(),
                store,
            )
        };

        let first = make_runner(store.clone()).run().await.unwrap();
        assert_eq!(first.new_jobs, 1);
        assert_eq!(first.pending_processed, 1);

        let second = make_runner(store.clone()).run().await.unwrap();
        assert_eq!(second.new_jobs, 0);
        // Already published in the first cycle; nothing pending.
        assert_eq!(second.pending_processed, 0);
        assert_eq!(store.record_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_pending_drained_even_without_new_jobs() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());

        // Seed a pending record directly, then run a cycle with no sources.
        store
            .insert(&posting("Data Engineer", "Noida", "https://x/6"))
            .await
            .unwrap();

        let runner = runner_with(Vec::new(), default_channels(), store.clone());
        let summary = runner.run().await.unwrap();

        assert_eq!(summary.fetched, 0);
        assert_eq!(summary.new_jobs, 0);
        assert_eq!(summary.pending_processed, 1);
        assert!(store.pending_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scenario_qa_tester_end_to_end() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let job = JobPosting::new("QA Tester", "Acme", "Bengaluru", "https://x/1", "LinkedIn")
            .unwrap();
        let source = StaticSource {
            name: "LinkedIn",
            jobs: vec![job.clone()],
        };
        let runner = runner_with(vec![Box::new(source)], default_channels(), store.clone());

        let summary = runner.run().await.unwrap();
        assert_eq!(summary.new_jobs, 1);

        let record = store.find_by_fingerprint(&job.fingerprint()).unwrap().unwrap();
        assert_eq!(record.posting.role_category.as_str(), "QA/Automation");
        assert_eq!(record.posting.experience_level.as_str(), "Unknown");
        assert!(record.is_published);
        assert!(record.statuses.chat.is_some());
        assert!(record.statuses.blog.is_some());
        assert!(record.statuses.social.is_some());

        // A re-fetch of the identical posting is absorbed as a duplicate.
        assert_eq!(
            store.insert(&job).await.unwrap(),
            InsertOutcome::Duplicate
        );
    }
}
