//! Position ingest: report → device resolution → write path.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::application::cache::device::DeviceCache;
use crate::application::position::PositionWriter;
use crate::domain::{DeviceId, PositionId, PositionReport, UniqueId};
use crate::error::Result;

/// What happened to one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IngestOutcome {
    /// Persisted and set as the device's latest position.
    Stored {
        device_id: DeviceId,
        position_id: PositionId,
    },
    /// Device resolved but the store records no positions.
    NotRecorded { device_id: DeviceId },
    /// No device with this unique id exists in the store.
    UnknownDevice { unique_id: UniqueId },
}

/// Running totals for a batch of reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub stored: usize,
    pub not_recorded: usize,
    pub unknown_devices: usize,
    pub rejected: usize,
}

impl IngestSummary {
    pub fn record(&mut self, outcome: &IngestOutcome) {
        match outcome {
            IngestOutcome::Stored { .. } => self.stored += 1,
            IngestOutcome::NotRecorded { .. } => self.not_recorded += 1,
            IngestOutcome::UnknownDevice { .. } => self.unknown_devices += 1,
        }
    }
}

/// Resolves reporting devices and persists their positions.
#[derive(Debug)]
pub struct PositionIngest {
    devices: Arc<DeviceCache>,
    writer: Arc<PositionWriter>,
}

impl PositionIngest {
    pub fn new(devices: Arc<DeviceCache>, writer: Arc<PositionWriter>) -> Self {
        Self { devices, writer }
    }

    /// Ingest one report.
    ///
    /// # Errors
    /// Store failures (device reload, insert, pointer update) and invalid
    /// coordinates are returned so the pipeline can decide whether to retry.
    pub fn ingest(&self, report: PositionReport) -> Result<IngestOutcome> {
        let Some(device) = self.devices.resolve(report.unique_id.as_str())? else {
            warn!(unique_id = %report.unique_id, "Unknown device");
            return Ok(IngestOutcome::UnknownDevice {
                unique_id: report.unique_id,
            });
        };

        let position = report.into_position(device.id)?;
        let Some(position_id) = self.writer.add_position(&position)? else {
            return Ok(IngestOutcome::NotRecorded {
                device_id: device.id,
            });
        };
        self.writer.update_latest_position(&position, position_id)?;

        debug!(device_id = %device.id, position_id = %position_id, "Ingested position");
        Ok(IngestOutcome::Stored {
            device_id: device.id,
            position_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::error::Error;
    use crate::testkit::clock::ManualClock;
    use crate::testkit::domain::{device, report};
    use crate::testkit::store::CountingStore;

    fn setup(memory: MemoryStore) -> (Arc<CountingStore<MemoryStore>>, PositionIngest) {
        memory.put_device(device(1, "IMEI-A"));
        let store = Arc::new(CountingStore::new(memory));
        let cache = Arc::new(DeviceCache::new(
            store.clone(),
            Arc::new(ManualClock::at_epoch()),
            Duration::seconds(300),
        ));
        let writer = Arc::new(PositionWriter::new(store.clone()));
        (store, PositionIngest::new(cache, writer))
    }

    #[test]
    fn known_device_is_stored_and_repointed() {
        let (store, ingest) = setup(MemoryStore::new());

        let outcome = ingest.ingest(report("IMEI-A")).unwrap();
        let IngestOutcome::Stored {
            device_id,
            position_id,
        } = outcome
        else {
            panic!("expected Stored, got {outcome:?}");
        };
        assert_eq!(device_id, DeviceId::new(1));
        assert_eq!(
            store.inner().device(device_id).unwrap().position_id,
            Some(position_id)
        );
    }

    #[test]
    fn unknown_device_writes_nothing() {
        let (store, ingest) = setup(MemoryStore::new());

        let outcome = ingest.ingest(report("IMEI-Z")).unwrap();
        assert_eq!(
            outcome,
            IngestOutcome::UnknownDevice {
                unique_id: UniqueId::new("IMEI-Z")
            }
        );
        assert_eq!(store.inserts(), 0);
    }

    #[test]
    fn store_without_statements_reports_not_recorded() {
        let (store, ingest) = setup(MemoryStore::with_statements(false, false));

        let outcome = ingest.ingest(report("IMEI-A")).unwrap();
        assert_eq!(
            outcome,
            IngestOutcome::NotRecorded {
                device_id: DeviceId::new(1)
            }
        );
        assert_eq!(store.latest_updates(), 0);
    }

    #[test]
    fn invalid_coordinates_are_rejected_before_insert() {
        let (store, ingest) = setup(MemoryStore::new());
        let mut bad = report("IMEI-A");
        bad.latitude = 123.0;

        assert!(matches!(ingest.ingest(bad), Err(Error::Domain(_))));
        assert_eq!(store.inserts(), 0);
    }

    #[test]
    fn store_outage_surfaces_to_pipeline() {
        let (store, ingest) = setup(MemoryStore::new());
        store.set_failing(true);

        let err = ingest.ingest(report("IMEI-A")).unwrap_err();
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn summary_counts_outcomes() {
        let mut summary = IngestSummary::default();
        summary.record(&IngestOutcome::UnknownDevice {
            unique_id: UniqueId::new("x"),
        });
        summary.record(&IngestOutcome::NotRecorded {
            device_id: DeviceId::new(1),
        });
        assert_eq!(summary.unknown_devices, 1);
        assert_eq!(summary.not_recorded, 1);
        assert_eq!(summary.stored, 0);
    }
}
