//! Render metrics collection and reporting.
//!
//! A [`RenderReport`] records, per container, what a render produced
//! (occupied slots, fingerprint, base) together with registry-wide counters.
//! Reports are exported as JSON so runs can be diffed in CI.

use anyhow::Result;
use mdinventory_container::{Inventories, InventoryError, LayeredContainer};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Top-level report written by the CLI and by tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderReport {
    /// Run identifier
    pub run_name: String,

    /// Timestamp when the report was collected (ISO 8601)
    pub timestamp: String,

    /// Overall result
    pub result: RunResult,

    /// Per-container render metrics, in registration order
    pub grids: Vec<GridMetric>,

    /// Registry-wide counters
    pub registry: RegistryMetrics,
}

/// Overall result status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunResult {
    /// Every container rendered
    Pass,
    /// At least one container failed to render
    Fail,
}

/// What one container rendered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMetric {
    /// Container name
    pub container: String,

    /// Base container name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Slot count
    pub capacity: usize,

    /// Descriptors owned by the container itself
    pub descriptors: usize,

    /// Occupied slots after base resolution (0 when rendering failed)
    pub occupied: usize,

    /// Grid fingerprint (hex), absent when rendering failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Render error message, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GridMetric {
    /// Render `container` against `inventories` and record the outcome.
    pub fn capture(inventories: &Inventories, container: &LayeredContainer) -> Self {
        let rendered: Result<_, InventoryError> = container.render(inventories.registry());
        let (occupied, fingerprint, error) = match rendered {
            Ok(grid) => (grid.occupied_count(), Some(grid.fingerprint().to_hex()), None),
            Err(err) => (0, None, Some(err.to_string())),
        };
        Self {
            container: container.name().to_string(),
            base: container.base(),
            capacity: container.capacity(),
            descriptors: container.len(),
            occupied,
            fingerprint,
            error,
        }
    }
}

/// Registry-wide counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryMetrics {
    /// Registered containers
    pub containers: usize,

    /// Cached item identities
    pub identities: usize,
}

/// Builder for constructing render reports
pub struct RenderReportBuilder {
    report: RenderReport,
}

impl RenderReportBuilder {
    /// Create a new builder with a run name
    pub fn new(run_name: impl Into<String>) -> Self {
        Self {
            report: RenderReport {
                run_name: run_name.into(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                result: RunResult::Pass,
                grids: Vec::new(),
                registry: RegistryMetrics::default(),
            },
        }
    }

    /// Add one grid metric; a failed render marks the whole run as failed
    pub fn grid(mut self, metric: GridMetric) -> Self {
        if metric.error.is_some() {
            self.report.result = RunResult::Fail;
        }
        self.report.grids.push(metric);
        self
    }

    /// Capture every registered container plus the registry counters
    pub fn capture_all(mut self, inventories: &Inventories) -> Self {
        for container in inventories.registry().containers() {
            self = self.grid(GridMetric::capture(inventories, &container));
        }
        self.report.registry = RegistryMetrics {
            containers: inventories.registry().len(),
            identities: inventories.identities().len(),
        };
        self
    }

    /// Build the report
    pub fn build(self) -> RenderReport {
        self.report
    }
}

/// Sink for writing render reports to JSON files
pub struct MetricsSink {
    path: std::path::PathBuf,
}

impl MetricsSink {
    /// Create a new sink at the specified path
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { path })
    }

    /// Write a report to file
    pub fn write(&self, report: &RenderReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(&self.path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
