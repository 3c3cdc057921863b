//! Replicated device state and outbound user intents.
//!
//! The authority side constructs a state snapshot on demand; the UI bridge
//! consumes it once and discards it. In the other direction the bridge emits
//! fire-and-forget intents with no acknowledgement contract. Both directions
//! are closed tagged unions: the bridge's behavior is defined entirely by
//! exhaustive matching over these shapes.

use serde::{Deserialize, Serialize};

/// Whether the canister is seated on a connector port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortStatus {
    Connected,
    Disconnected,
}

/// Snapshot of a gas canister as the authority last saw it.
///
/// `tank_label` / `tank_pressure` are `None` when no holding tank is
/// inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasCanisterState {
    pub canister_label: String,
    pub canister_pressure: f32,
    pub port_status: PortStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tank_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tank_pressure: Option<f32>,
    pub release_valve: bool,
    pub release_pressure: f32,
    pub release_pressure_min: f32,
    pub release_pressure_max: f32,
}

/// Snapshot of a gas pressure pump. The canister bridge receives these only
/// when an update is misrouted, and must ignore them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasPressurePumpState {
    pub pump_label: String,
    pub output_pressure: f32,
    pub enabled: bool,
}

/// Tagged union of device states the authority replicates to UIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum DeviceUiState {
    GasCanister(GasCanisterState),
    GasPressurePump(GasPressurePumpState),
}

/// User intents the canister UI sends back to the authority.
///
/// No local validation happens before sending; whether a requested change is
/// acceptable (e.g. pressure within range) is the authority's call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CanisterIntent {
    EjectTank,
    SetReleaseValve(bool),
    SetReleasePressure(f32),
}
