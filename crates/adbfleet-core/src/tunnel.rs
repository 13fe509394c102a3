// ── Fleet tunnel reconciliation ──
//
// Drives the managed reverse-rule set onto every attached device at
// once. Failures are isolated per device: one unreachable device never
// stops the rest of the fleet from being brought in line. The fleet
// snapshot is taken once per apply; devices attaching mid-operation are
// picked up by the caller's next cycle.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::bridge::DeviceBridge;
use crate::error::CoreError;
use crate::model::{Device, MANAGED_RULES, TunnelRule};
use crate::suspend::{RefreshGate, RefreshPause};

/// Result of one fleet-wide apply.
#[derive(Debug)]
pub enum ApplyOutcome {
    /// Nothing was attached; a no-op, not a failure.
    NoDevices,
    /// One entry per device in the snapshot, in snapshot order.
    Applied(Vec<DeviceApplyResult>),
}

/// Per-device outcome inside a fleet apply.
#[derive(Debug)]
pub struct DeviceApplyResult {
    pub serial: String,
    pub outcome: Result<(), CoreError>,
}

/// Serializable per-device row for machine-readable output.
#[derive(Debug, Serialize)]
pub struct DeviceApplyRow {
    pub serial: String,
    pub ok: bool,
    pub error: Option<String>,
}

impl From<&DeviceApplyResult> for DeviceApplyRow {
    fn from(result: &DeviceApplyResult) -> Self {
        Self {
            serial: result.serial.clone(),
            ok: result.outcome.is_ok(),
            error: result.outcome.as_ref().err().map(ToString::to_string),
        }
    }
}

/// Reconciles the managed reverse-rule set across the attached fleet.
pub struct TunnelReconciler {
    bridge: Arc<dyn DeviceBridge>,
    gate: Option<Arc<dyn RefreshGate>>,
}

impl TunnelReconciler {
    pub fn new(bridge: Arc<dyn DeviceBridge>) -> Self {
        Self { bridge, gate: None }
    }

    /// Suspend an external polling loop for the duration of each apply.
    pub fn with_refresh_gate(mut self, gate: Arc<dyn RefreshGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Bring every attached device to the `desired` tunnel state:
    /// `true` installs the full managed rule set, `false` removes
    /// whichever managed rules are present. Both directions are
    /// idempotent. Enumeration failure is the only fleet-level error.
    pub async fn apply(&self, desired: bool) -> Result<ApplyOutcome, CoreError> {
        let _pause = self.gate.clone().map(RefreshPause::acquire);

        let devices =
            self.bridge
                .list_devices()
                .await
                .map_err(|e| CoreError::EnumerationFailed {
                    reason: e.to_string(),
                })?;
        if devices.is_empty() {
            warn!("no devices attached, tunnel state unchanged");
            return Ok(ApplyOutcome::NoDevices);
        }

        let results = join_all(devices.iter().map(|device| self.apply_one(device, desired))).await;
        let failed = results.iter().filter(|r| r.outcome.is_err()).count();
        info!(
            desired,
            devices = results.len(),
            failed,
            "tunnel reconciliation finished"
        );
        Ok(ApplyOutcome::Applied(results))
    }

    async fn apply_one(&self, device: &Device, desired: bool) -> DeviceApplyResult {
        let outcome = if desired {
            self.install_rules(&device.serial).await
        } else {
            self.remove_rules(&device.serial).await
        };
        if let Err(e) = &outcome {
            warn!(serial = %device.serial, error = %e, "device left unreconciled");
        }
        DeviceApplyResult {
            serial: device.serial.clone(),
            outcome,
        }
    }

    /// Install the full managed set. Re-installing an existing rule
    /// rebinds it on the device side, so no presence check is needed.
    async fn install_rules(&self, serial: &str) -> Result<(), CoreError> {
        for rule in MANAGED_RULES {
            self.bridge
                .add_reverse_rule(serial, rule.remote_port, rule.local_port)
                .await
                .map_err(|e| rule_failure(serial, &e))?;
            debug!(serial, remote = rule.remote_port, "reverse rule installed");
        }
        Ok(())
    }

    /// Remove only the managed rules the device actually holds. Removing
    /// an absent rule errors on the device side, so the active set is
    /// consulted first; a device with no managed rules is a no-op.
    async fn remove_rules(&self, serial: &str) -> Result<(), CoreError> {
        let active = self
            .bridge
            .list_reverse_rules(serial)
            .await
            .map_err(|e| rule_failure(serial, &e))?;
        for rule in MANAGED_RULES {
            if active.contains(&rule) {
                self.bridge
                    .remove_reverse_rule(serial, rule.remote_port)
                    .await
                    .map_err(|e| rule_failure(serial, &e))?;
                debug!(serial, remote = rule.remote_port, "reverse rule removed");
            }
        }
        Ok(())
    }

    /// Whether the fleet currently holds the full managed rule set,
    /// sampled from the first attached device. An empty fleet or any
    /// query failure reads as not reconciled; a fleet whose devices have
    /// diverged is the caller's cue to re-apply, which converges them.
    pub async fn is_reconciled(&self) -> bool {
        let devices = match self.bridge.list_devices().await {
            Ok(devices) => devices,
            Err(e) => {
                debug!(error = %e, "enumeration failed, reporting unreconciled");
                return false;
            }
        };
        let Some(first) = devices.first() else {
            return false;
        };
        match self.bridge.list_reverse_rules(&first.serial).await {
            Ok(active) => MANAGED_RULES.iter().all(|rule| active.contains(rule)),
            Err(e) => {
                debug!(serial = %first.serial, error = %e, "rule query failed, reporting unreconciled");
                false
            }
        }
    }

    /// Active managed-port rules on one specific device, for callers
    /// that need more than the first-device sample.
    pub async fn device_rules(&self, serial: &str) -> Result<Vec<TunnelRule>, CoreError> {
        self.bridge
            .list_reverse_rules(serial)
            .await
            .map_err(|e| rule_failure(serial, &e))
    }
}

fn rule_failure(serial: &str, error: &adbfleet_bridge::Error) -> CoreError {
    CoreError::RuleApplyFailed {
        serial: serial.to_owned(),
        reason: error.to_string(),
    }
}
