//! Viewport visibility for the region that contains a carousel.
//!
//! The host layout engine reports intersection ratios through an
//! [`IntersectionSource`]. A [`VisibilityTracker`] turns them into a boolean
//! signal that only changes on threshold crossings.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::domain::RegionId;
use thiserror::Error;
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::controller::DEFAULT_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub region: RegionId,
    /// Visible fraction of the region, `0.0..=1.0`.
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityMode {
    /// Follow every threshold crossing.
    #[default]
    Follow,
    /// Turn visible on first reveal and stay visible.
    Latch,
}

#[derive(Debug, Error)]
pub enum VisibilityError {
    #[error("visibility threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),
    #[error("failed to observe region {region}: {source}")]
    Observe { region: i64, source: anyhow::Error },
    #[error("failed to release observation of region {region}: {source}")]
    Unobserve { region: i64, source: anyhow::Error },
}

#[async_trait]
pub trait IntersectionSource: Send + Sync {
    async fn observe(&self, region: RegionId)
        -> anyhow::Result<broadcast::Receiver<IntersectionEntry>>;
    async fn unobserve(&self, region: RegionId) -> anyhow::Result<()>;
}

/// Ratio-to-boolean debouncing without any runtime attached.
#[derive(Debug, Clone)]
pub struct ThresholdFilter {
    threshold: f64,
    mode: VisibilityMode,
    visible: bool,
}

impl ThresholdFilter {
    pub fn new(threshold: f64, mode: VisibilityMode) -> Result<Self, VisibilityError> {
        if threshold.is_nan() || threshold <= 0.0 || threshold > 1.0 {
            return Err(VisibilityError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            mode,
            visible: false,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feeds one ratio and returns the new signal only when it flipped.
    pub fn observe(&mut self, ratio: f64) -> Option<bool> {
        if ratio.is_nan() {
            return None;
        }
        if self.mode == VisibilityMode::Latch && self.visible {
            return None;
        }

        let visible = ratio.clamp(0.0, 1.0) >= self.threshold;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }
}

impl Default for ThresholdFilter {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mode: VisibilityMode::Follow,
            visible: false,
        }
    }
}

/// An attached observation of one region.
///
/// Dropping the tracker stops delivery; [`VisibilityTracker::detach`] also
/// releases the subscription held by the source.
pub struct VisibilityTracker {
    region: RegionId,
    source: Arc<dyn IntersectionSource>,
    signal: watch::Receiver<bool>,
    task: Option<JoinHandle<()>>,
}

impl VisibilityTracker {
    pub async fn attach(
        source: Arc<dyn IntersectionSource>,
        region: RegionId,
        threshold: f64,
        mode: VisibilityMode,
    ) -> Result<Self, VisibilityError> {
        let mut filter = ThresholdFilter::new(threshold, mode)?;
        let mut entries = source
            .observe(region)
            .await
            .map_err(|source| VisibilityError::Observe {
                region: region.0,
                source,
            })?;
        let (signal_tx, signal) = watch::channel(false);

        let task = tokio::spawn(async move {
            loop {
                let entry = match entries.recv().await {
                    Ok(entry) => entry,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(region = region.0, skipped, "intersection events lagged");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if entry.region != region {
                    continue;
                }
                if let Some(visible) = filter.observe(entry.ratio) {
                    debug!(region = region.0, ratio = entry.ratio, visible, "visibility changed");
                    if signal_tx.send(visible).is_err() {
                        break;
                    }
                }
            }
        });

        info!(region = region.0, threshold, ?mode, "visibility tracker attached");
        Ok(Self {
            region,
            source,
            signal,
            task: Some(task),
        })
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn is_visible(&self) -> bool {
        *self.signal.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.signal.clone()
    }

    pub async fn detach(mut self) -> Result<(), VisibilityError> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        info!(region = self.region.0, "visibility tracker detached");
        self.source
            .unobserve(self.region)
            .await
            .map_err(|source| VisibilityError::Unobserve {
                region: self.region.0,
                source,
            })
    }
}

impl Drop for VisibilityTracker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// In-process source for hosts that compute ratios themselves.
#[derive(Default)]
pub struct ManualIntersectionSource {
    regions: Mutex<HashMap<RegionId, ObservedRegion>>,
}

/// Shared channel for one region; dropped when the last observer leaves.
struct ObservedRegion {
    sender: broadcast::Sender<IntersectionEntry>,
    observers: usize,
}

impl ManualIntersectionSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Publishes a ratio. Returns false when nothing observes the region.
    pub fn report(&self, region: RegionId, ratio: f64) -> bool {
        let regions = match self.regions.lock() {
            Ok(regions) => regions,
            Err(poisoned) => poisoned.into_inner(),
        };
        match regions.get(&region) {
            Some(observed) => observed
                .sender
                .send(IntersectionEntry { region, ratio })
                .is_ok(),
            None => false,
        }
    }

    pub fn is_observed(&self, region: RegionId) -> bool {
        match self.regions.lock() {
            Ok(regions) => regions.contains_key(&region),
            Err(poisoned) => poisoned.into_inner().contains_key(&region),
        }
    }
}

#[async_trait]
impl IntersectionSource for ManualIntersectionSource {
    async fn observe(
        &self,
        region: RegionId,
    ) -> anyhow::Result<broadcast::Receiver<IntersectionEntry>> {
        let mut regions = self
            .regions
            .lock()
            .map_err(|_| anyhow::anyhow!("intersection registry poisoned"))?;
        let observed = regions.entry(region).or_insert_with(|| ObservedRegion {
            sender: broadcast::channel(64).0,
            observers: 0,
        });
        observed.observers += 1;
        Ok(observed.sender.subscribe())
    }

    async fn unobserve(&self, region: RegionId) -> anyhow::Result<()> {
        let mut regions = self
            .regions
            .lock()
            .map_err(|_| anyhow::anyhow!("intersection registry poisoned"))?;
        if let Some(observed) = regions.get_mut(&region) {
            observed.observers = observed.observers.saturating_sub(1);
            if observed.observers == 0 {
                regions.remove(&region);
            }
        }
        Ok(())
    }
}
