//! Application orchestration layer.
//!
//! Wires the canister UI bridge to a local authority stub so the window can
//! be driven end to end without a server: window events flow through the
//! bridge onto the intent channel, the authority applies each intent to its
//! canonical state, and the resulting snapshot is replicated back into the
//! bridge. The loop runs everything on one task; nothing here locks.

use crate::error::Result;
use crate::protocol::{CanisterIntent, DeviceUiState, GasCanisterState, PortStatus};
use crate::ui::{CanisterUiBridge, TerminalCanisterWindow, WindowEvent};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Poll granularity for window events.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Demo runtime: canister window against a local authority.
pub struct Application {
    bridge: CanisterUiBridge<TerminalCanisterWindow>,
    intent_rx: UnboundedReceiver<CanisterIntent>,
    authority: LocalAuthority,
}

impl Application {
    /// Create the runtime with the default demo canister.
    pub fn new() -> Self {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        Self {
            bridge: CanisterUiBridge::new(intent_tx),
            intent_rx,
            authority: LocalAuthority::new(demo_canister_state()),
        }
    }

    /// Run the window loop until the user closes it.
    pub async fn run(&mut self) -> Result<()> {
        self.bridge.open()?;
        self.bridge
            .receive_update(DeviceUiState::GasCanister(self.authority.snapshot()));

        loop {
            let Some(window) = self.bridge.window_mut() else {
                // Window closed by an event in the previous iteration.
                break;
            };

            let event = window.poll_event(POLL_INTERVAL)?;
            if let Some(event) = event {
                let closing = matches!(event, WindowEvent::Closed);
                self.bridge.handle_event(event);
                if closing {
                    break;
                }
            }

            while let Ok(intent) = self.intent_rx.try_recv() {
                let state = self.authority.apply(intent);
                self.bridge.receive_update(DeviceUiState::GasCanister(state));
            }

            if let Some(window) = self.bridge.window_mut() {
                window.render()?;
            }

            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        self.bridge.close();
        Ok(())
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

/// Stand-in for the authoritative simulation side.
///
/// Owns the canonical canister state and enforces what the bridge must not:
/// requested release pressures are clamped into the valid range.
pub struct LocalAuthority {
    state: GasCanisterState,
}

impl LocalAuthority {
    pub fn new(state: GasCanisterState) -> Self {
        Self { state }
    }

    /// Current canonical state.
    pub fn snapshot(&self) -> GasCanisterState {
        self.state.clone()
    }

    /// Apply one intent and return the updated snapshot.
    pub fn apply(&mut self, intent: CanisterIntent) -> GasCanisterState {
        match intent {
            CanisterIntent::EjectTank => {
                self.state.tank_label = None;
                self.state.tank_pressure = None;
            }
            CanisterIntent::SetReleaseValve(open) => {
                self.state.release_valve = open;
            }
            CanisterIntent::SetReleasePressure(value) => {
                self.state.release_pressure = value.clamp(
                    self.state.release_pressure_min,
                    self.state.release_pressure_max,
                );
            }
        }
        self.snapshot()
    }
}

/// The canister the demo starts with.
pub fn demo_canister_state() -> GasCanisterState {
    GasCanisterState {
        canister_label: "fuel canister C-104".to_string(),
        canister_pressure: 934.7,
        port_status: PortStatus::Connected,
        tank_label: Some("emergency oxygen tank".to_string()),
        tank_pressure: Some(202.6),
        release_valve: false,
        release_pressure: 101.3,
        release_pressure_min: 0.0,
        release_pressure_max: 1013.25,
    }
}
