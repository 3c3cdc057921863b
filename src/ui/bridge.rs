//! Bridge between replicated canister state and the window widget.
//!
//! Pure presentation: inbound state snapshots become widget field updates,
//! widget events become outbound intents. Malformed or mistimed updates are
//! swallowed rather than surfaced; the next authoritative update corrects the
//! view. The bridge holds no state beyond the window handle and the last
//! matching snapshot it saw.

use crate::error::Result;
use crate::protocol::{CanisterIntent, DeviceUiState, GasCanisterState};
use crate::ui::window::{CanisterWindow, WindowEvent};
use log::debug;
use tokio::sync::mpsc::UnboundedSender;

/// Client-side UI bridge for one gas canister device.
pub struct CanisterUiBridge<W: CanisterWindow> {
    window: Option<W>,
    state: Option<GasCanisterState>,
    intents: UnboundedSender<CanisterIntent>,
}

impl<W: CanisterWindow> CanisterUiBridge<W> {
    /// Bridge with no window yet; `intents` is the outbound transport.
    pub fn new(intents: UnboundedSender<CanisterIntent>) -> Self {
        Self {
            window: None,
            state: None,
            intents,
        }
    }

    pub fn is_open(&self) -> bool {
        self.window.is_some()
    }

    /// Construct and show the window. Idempotent while a window exists.
    ///
    /// The most recently known state, if any, is applied before the window
    /// becomes visible so it never flashes blank.
    pub fn open(&mut self) -> Result<()> {
        if self.window.is_some() {
            return Ok(());
        }

        let mut window = W::create()?;
        if let Some(state) = &self.state {
            apply_state(&mut window, state);
        }
        window.open_centered()?;
        self.window = Some(window);
        Ok(())
    }

    /// Apply an authoritative state update.
    ///
    /// Updates with a non-canister shape are dropped entirely. Matching
    /// snapshots are cached (so a later `open` starts populated) and, when
    /// the window is open, copied into the widget field by field. Applying
    /// the same state twice yields the same visible result.
    pub fn receive_update(&mut self, update: DeviceUiState) {
        let DeviceUiState::GasCanister(state) = update else {
            return;
        };

        if let Some(window) = self.window.as_mut() {
            apply_state(window, &state);
        }
        self.state = Some(state);
    }

    /// React to one window event.
    ///
    /// Each non-close event packages exactly one intent and hands it to the
    /// transport unchecked; validity of the requested change is the
    /// authority's concern. A dropped transport is ignored.
    pub fn handle_event(&mut self, event: WindowEvent) {
        let intent = match event {
            WindowEvent::Closed => {
                self.close();
                return;
            }
            WindowEvent::ReleaseValveOpenPressed => CanisterIntent::SetReleaseValve(true),
            WindowEvent::ReleaseValveClosePressed => CanisterIntent::SetReleaseValve(false),
            WindowEvent::ReleasePressureChanged(value) => {
                CanisterIntent::SetReleasePressure(value)
            }
            WindowEvent::TankEjectPressed => CanisterIntent::EjectTank,
        };

        if self.intents.send(intent).is_err() {
            debug!("intent transport closed; dropping outbound message");
        }
    }

    /// Release the window and its subscriptions. Safe to call repeatedly and
    /// before the window was ever created.
    pub fn close(&mut self) {
        if let Some(mut window) = self.window.take() {
            window.close();
        }
    }

    /// Borrow the live window, e.g. for rendering. `None` while closed.
    pub fn window(&self) -> Option<&W> {
        self.window.as_ref()
    }

    pub fn window_mut(&mut self) -> Option<&mut W> {
        self.window.as_mut()
    }
}

/// Copy all nine replicated fields into the widget.
fn apply_state<W: CanisterWindow>(window: &mut W, state: &GasCanisterState) {
    window.set_canister_label(&state.canister_label);
    window.set_canister_pressure(state.canister_pressure);
    window.set_port_status(state.port_status);
    window.set_tank_label(state.tank_label.as_deref());
    window.set_tank_pressure(state.tank_pressure);
    window.set_release_pressure_range(state.release_pressure_min, state.release_pressure_max);
    window.set_release_pressure(state.release_pressure);
    window.set_release_valve(state.release_valve);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{GasPressurePumpState, PortStatus};
    use crate::ui::window::tests::MockCanisterWindow;
    use tokio::sync::mpsc;

    fn sample_state() -> GasCanisterState {
        GasCanisterState {
            canister_label: "fuel canister".to_string(),
            canister_pressure: 950.0,
            port_status: PortStatus::Connected,
            tank_label: Some("tank".to_string()),
            tank_pressure: Some(120.5),
            release_valve: true,
            release_pressure: 101.3,
            release_pressure_min: 0.0,
            release_pressure_max: 1013.25,
        }
    }

    fn bridge() -> (
        CanisterUiBridge<MockCanisterWindow>,
        mpsc::UnboundedReceiver<CanisterIntent>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        (CanisterUiBridge::new(tx), rx)
    }

    #[test]
    fn update_before_open_touches_no_window() {
        let (mut bridge, _rx) = bridge();

        bridge.receive_update(DeviceUiState::GasCanister(sample_state()));

        assert!(!bridge.is_open());
        assert!(bridge.window().is_none());
    }

    #[test]
    fn open_renders_cached_state_before_showing() {
        let (mut bridge, _rx) = bridge();
        bridge.receive_update(DeviceUiState::GasCanister(sample_state()));

        bridge.open().unwrap();

        let window = bridge.window().unwrap();
        assert!(window.visible);
        assert_eq!(window.canister_label, "fuel canister");
        assert_eq!(window.release_pressure_range, Some((0.0, 1013.25)));
    }

    #[test]
    fn open_is_idempotent_per_window_lifetime() {
        let (mut bridge, _rx) = bridge();
        bridge.open().unwrap();
        bridge.open().unwrap();

        assert_eq!(bridge.window().unwrap().open_calls, 1);
    }

    #[test]
    fn matching_update_copies_all_fields() {
        let (mut bridge, _rx) = bridge();
        bridge.open().unwrap();

        bridge.receive_update(DeviceUiState::GasCanister(sample_state()));

        let window = bridge.window().unwrap();
        assert_eq!(window.canister_label, "fuel canister");
        assert_eq!(window.canister_pressure, 950.0);
        assert_eq!(window.port_status, Some(PortStatus::Connected));
        assert_eq!(window.tank_label.as_deref(), Some("tank"));
        assert_eq!(window.tank_pressure, Some(120.5));
        assert_eq!(window.release_pressure_range, Some((0.0, 1013.25)));
        assert_eq!(window.release_pressure, 101.3);
        assert!(window.release_valve);
    }

    #[test]
    fn mismatched_shape_leaves_displayed_values_unchanged() {
        let (mut bridge, _rx) = bridge();
        bridge.open().unwrap();
        bridge.receive_update(DeviceUiState::GasCanister(sample_state()));

        bridge.receive_update(DeviceUiState::GasPressurePump(GasPressurePumpState {
            pump_label: "pump".to_string(),
            output_pressure: 5.0,
            enabled: true,
        }));

        let window = bridge.window().unwrap();
        assert_eq!(window.canister_label, "fuel canister");
        assert_eq!(window.canister_pressure, 950.0);
    }

    #[test]
    fn events_map_to_exactly_one_intent_each() {
        let (mut bridge, mut rx) = bridge();
        bridge.open().unwrap();

        bridge.handle_event(WindowEvent::ReleaseValveOpenPressed);
        bridge.handle_event(WindowEvent::ReleaseValveClosePressed);
        bridge.handle_event(WindowEvent::ReleasePressureChanged(55.5));
        bridge.handle_event(WindowEvent::TankEjectPressed);

        assert_eq!(rx.try_recv().unwrap(), CanisterIntent::SetReleaseValve(true));
        assert_eq!(
            rx.try_recv().unwrap(),
            CanisterIntent::SetReleaseValve(false)
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            CanisterIntent::SetReleasePressure(55.5)
        );
        assert_eq!(rx.try_recv().unwrap(), CanisterIntent::EjectTank);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn close_event_closes_without_sending() {
        let (mut bridge, mut rx) = bridge();
        bridge.open().unwrap();

        bridge.handle_event(WindowEvent::Closed);

        assert!(!bridge.is_open());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn close_is_safe_to_repeat_and_before_open() {
        let (mut bridge, _rx) = bridge();
        bridge.close();
        bridge.open().unwrap();
        bridge.close();
        bridge.close();

        assert!(!bridge.is_open());
    }

    #[test]
    fn dropped_transport_is_swallowed() {
        let (mut bridge, rx) = bridge();
        drop(rx);
        bridge.open().unwrap();

        // Must not panic or error.
        bridge.handle_event(WindowEvent::TankEjectPressed);
    }

    #[test]
    fn reopen_after_close_restores_last_known_state() {
        let (mut bridge, _rx) = bridge();
        bridge.open().unwrap();
        bridge.receive_update(DeviceUiState::GasCanister(sample_state()));
        bridge.close();

        bridge.open().unwrap();

        assert_eq!(bridge.window().unwrap().canister_label, "fuel canister");
    }
}
