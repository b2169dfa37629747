//! Typed dataset store.
//!
//! One [`SingleFlight`] per record type, keyed by the dataset path declared
//! in the configuration. A store is cheap to clone; clones share their
//! caches.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;

use crate::error::{AppError, LoadError, Result};
use crate::models::{
    AnalyticsData, CompanyProforma, Config, DatasetKind, Edition, Resume, SlotStudent,
    StudentRoster, TimelineNotice,
};
use crate::services::cache::SingleFlight;
use crate::services::eligibility::EligibilityMap;
use crate::services::lookup::find_company;
use crate::services::timeline::{TimelineCache, TimelineIndex};
use crate::storage::{self, DataSource};

/// Everything a company detail view shows.
#[derive(Debug, Clone)]
pub struct CompanyDetail {
    pub company: CompanyProforma,
    pub eligibility: EligibilityMap,
    pub events: Vec<Arc<TimelineNotice>>,
}

struct StoreInner {
    source: Arc<dyn DataSource>,
    config: Arc<Config>,
    students: SingleFlight<String, StudentRoster>,
    companies: SingleFlight<String, Vec<CompanyProforma>>,
    notices: SingleFlight<String, Vec<TimelineNotice>>,
    resumes: SingleFlight<String, Vec<Resume>>,
    slots: SingleFlight<String, Vec<SlotStudent>>,
    analytics: SingleFlight<String, AnalyticsData>,
    timelines: HashMap<Edition, TimelineCache>,
}

/// Shared, memoized access to every configured dataset.
#[derive(Clone)]
pub struct PlacementStore {
    inner: Arc<StoreInner>,
}

impl PlacementStore {
    /// Create a store reading through `source`.
    pub fn new(source: Arc<dyn DataSource>, config: Arc<Config>) -> Self {
        let timelines = [Edition::Legacy, Edition::Y2025]
            .into_iter()
            .map(|edition| (edition, TimelineCache::new()))
            .collect();
        Self {
            inner: Arc::new(StoreInner {
                source,
                config,
                students: SingleFlight::new(),
                companies: SingleFlight::new(),
                notices: SingleFlight::new(),
                resumes: SingleFlight::new(),
                slots: SingleFlight::new(),
                analytics: SingleFlight::new(),
                timelines,
            }),
        }
    }

    /// Create a store with the data source selected by `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let source = storage::from_config(&config)?;
        log::info!("Reading datasets from {}", source.describe());
        Ok(Self::new(source, Arc::new(config)))
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn source(&self) -> &dyn DataSource {
        self.inner.source.as_ref()
    }

    /// Students (and legacy branch totals) of an edition.
    pub async fn students(&self, edition: Edition) -> Result<Arc<StudentRoster>> {
        let path = self.path(DatasetKind::Students, Some(edition))?;
        self.load(&self.inner.students, path, move |bytes| {
            StudentRoster::decode(edition, bytes)
        })
        .await
    }

    /// Company proformas of an edition.
    pub async fn companies(&self, edition: Edition) -> Result<Arc<Vec<CompanyProforma>>> {
        let path = self.path(DatasetKind::Companies, Some(edition))?;
        self.load(&self.inner.companies, path, move |bytes| {
            CompanyProforma::decode_all(edition, bytes)
        })
        .await
    }

    /// Timeline notices, in published order.
    pub async fn notices(&self) -> Result<Arc<Vec<TimelineNotice>>> {
        let path = self.path(DatasetKind::Notices, None)?;
        self.load(&self.inner.notices, path, decode_json).await
    }

    pub async fn resumes(&self) -> Result<Arc<Vec<Resume>>> {
        let path = self.path(DatasetKind::Resumes, None)?;
        self.load(&self.inner.resumes, path, decode_json).await
    }

    /// Students with their per-slot placements.
    pub async fn slots(&self) -> Result<Arc<Vec<SlotStudent>>> {
        let path = self.path(DatasetKind::Slots, None)?;
        self.load(&self.inner.slots, path, decode_json).await
    }

    pub async fn analytics(&self) -> Result<Arc<AnalyticsData>> {
        let path = self.path(DatasetKind::Analytics, None)?;
        self.load(&self.inner.analytics, path, decode_json).await
    }

    /// Notices grouped by the companies of `edition`.
    ///
    /// Rebuilt only when either underlying dataset has been reloaded.
    pub async fn timeline_index(&self, edition: Edition) -> Result<Arc<TimelineIndex>> {
        let (notices, companies) = tokio::try_join!(self.notices(), self.companies(edition))?;
        let index = match self.inner.timelines.get(&edition) {
            Some(cache) => cache.get_or_build(&notices, &companies),
            None => Arc::new(TimelineIndex::build(&notices, &companies)),
        };
        Ok(index)
    }

    /// Company, decoded eligibility and attributed notices for a detail view.
    ///
    /// Notices are only consulted when a notices dataset is configured.
    pub async fn company_detail(&self, edition: Edition, raw_id: &str) -> Result<CompanyDetail> {
        let companies = self.companies(edition).await?;
        let company = find_company(&companies, edition.id_scheme(), raw_id)?.clone();
        let eligibility = EligibilityMap::for_company(&company, &self.config().catalog);

        let events = if self.has_dataset(DatasetKind::Notices) {
            let index = self.timeline_index(edition).await?;
            index.events_for(&company.company_name).to_vec()
        } else {
            Vec::new()
        };

        Ok(CompanyDetail {
            company,
            eligibility,
            events,
        })
    }

    /// Start loading a dataset in the background.
    ///
    /// Failures are logged and otherwise ignored; a later `get` retries.
    /// `edition` is ignored for kinds published in a single edition.
    pub fn preload(&self, kind: DatasetKind, edition: Edition) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let result = match kind {
                DatasetKind::Students => store.students(edition).await.map(drop),
                DatasetKind::Companies => store.companies(edition).await.map(drop),
                DatasetKind::Notices => store.notices().await.map(drop),
                DatasetKind::Resumes => store.resumes().await.map(drop),
                DatasetKind::Slots => store.slots().await.map(drop),
                DatasetKind::Analytics => store.analytics().await.map(drop),
            };
            match result {
                Ok(()) => log::debug!("Preloaded {kind} ({edition})"),
                Err(e) => log::warn!("Preload of {kind} ({edition}) failed: {e}"),
            }
        })
    }

    /// Whether a dataset is loaded and cached.
    pub fn is_loaded(&self, kind: DatasetKind, edition: Edition) -> bool {
        let edition = edition_filter(kind, edition);
        let Ok(path) = self.path(kind, edition) else {
            return false;
        };
        match kind {
            DatasetKind::Students => self.inner.students.is_loaded(&path),
            DatasetKind::Companies => self.inner.companies.is_loaded(&path),
            DatasetKind::Notices => self.inner.notices.is_loaded(&path),
            DatasetKind::Resumes => self.inner.resumes.is_loaded(&path),
            DatasetKind::Slots => self.inner.slots.is_loaded(&path),
            DatasetKind::Analytics => self.inner.analytics.is_loaded(&path),
        }
    }

    /// Drop every cached dataset and derived index.
    pub fn reset(&self) {
        let inner = &self.inner;
        inner.students.reset();
        inner.companies.reset();
        inner.notices.reset();
        inner.resumes.reset();
        inner.slots.reset();
        inner.analytics.reset();
        for cache in inner.timelines.values() {
            cache.clear();
        }
        log::debug!("Dataset caches reset");
    }

    fn has_dataset(&self, kind: DatasetKind) -> bool {
        self.config().datasets.iter().any(|d| d.kind == kind)
    }

    /// Configured path for a dataset. Without an edition, the first
    /// declared dataset of the kind is used.
    fn path(&self, kind: DatasetKind, edition: Option<Edition>) -> Result<String> {
        let config = self.config();
        let dataset = match edition {
            Some(edition) => config.require_dataset(kind, edition)?,
            None => config
                .datasets
                .iter()
                .find(|d| d.kind == kind)
                .ok_or_else(|| AppError::config(format!("no {kind} dataset configured")))?,
        };
        Ok(dataset.path.clone())
    }

    async fn load<V, D>(&self, cache: &SingleFlight<String, V>, path: String, decode: D) -> Result<Arc<V>>
    where
        V: Send + Sync + 'static,
        D: FnOnce(&[u8]) -> serde_json::Result<V> + Send + 'static,
    {
        let source = Arc::clone(&self.inner.source);
        let key = path.clone();
        let value = cache
            .get_with(key, move || async move {
                log::debug!("Loading {path}");
                let bytes = source.fetch(&path).await?;
                let value = decode(&bytes).map_err(|e| LoadError::parse(&path, e))?;
                log::debug!("Loaded {path}");
                Ok(value)
            })
            .await?;
        Ok(value)
    }
}

/// Kinds keyed by edition use it; the rest use the first declared dataset.
fn edition_filter(kind: DatasetKind, edition: Edition) -> Option<Edition> {
    match kind {
        DatasetKind::Students | DatasetKind::Companies => Some(edition),
        _ => None,
    }
}

fn decode_json<V: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<V> {
    serde_json::from_slice(bytes)
}
