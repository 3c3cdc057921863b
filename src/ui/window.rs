//! Canister window abstraction.
//!
//! The bridge talks to the widget through [`CanisterWindow`] so the same
//! bridge logic drives the real terminal window and a mock in tests. Setters
//! mirror the nine replicated fields one to one; events are the five user
//! interactions the window can produce.

use crate::error::Result;
use crate::protocol::PortStatus;

/// User interactions surfaced by the canister window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Closed,
    ReleaseValveOpenPressed,
    ReleaseValveClosePressed,
    ReleasePressureChanged(f32),
    TankEjectPressed,
}

/// Widget seam between the UI bridge and a concrete window implementation.
pub trait CanisterWindow {
    /// Construct the widget without showing it.
    fn create() -> Result<Self>
    where
        Self: Sized;

    /// Make the widget visible, centered on screen.
    fn open_centered(&mut self) -> Result<()>;

    fn set_canister_label(&mut self, label: &str);

    fn set_canister_pressure(&mut self, pressure: f32);

    fn set_port_status(&mut self, status: PortStatus);

    /// `None` clears the tank row (no tank inserted).
    fn set_tank_label(&mut self, label: Option<&str>);

    fn set_tank_pressure(&mut self, pressure: Option<f32>);

    fn set_release_pressure_range(&mut self, min: f32, max: f32);

    fn set_release_pressure(&mut self, value: f32);

    fn set_release_valve(&mut self, open: bool);

    /// Release the widget. Must be safe to call more than once.
    fn close(&mut self);
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Mock window recording every field the bridge pushes into it.
    #[derive(Debug, Default)]
    pub struct MockCanisterWindow {
        pub visible: bool,
        pub open_calls: usize,
        pub close_calls: usize,
        pub canister_label: String,
        pub canister_pressure: f32,
        pub port_status: Option<PortStatus>,
        pub tank_label: Option<String>,
        pub tank_pressure: Option<f32>,
        pub release_pressure_range: Option<(f32, f32)>,
        pub release_pressure: f32,
        pub release_valve: bool,
    }

    impl CanisterWindow for MockCanisterWindow {
        fn create() -> Result<Self> {
            Ok(Self::default())
        }

        fn open_centered(&mut self) -> Result<()> {
            self.visible = true;
            self.open_calls += 1;
            Ok(())
        }

        fn set_canister_label(&mut self, label: &str) {
            self.canister_label = label.to_string();
        }

        fn set_canister_pressure(&mut self, pressure: f32) {
            self.canister_pressure = pressure;
        }

        fn set_port_status(&mut self, status: PortStatus) {
            self.port_status = Some(status);
        }

        fn set_tank_label(&mut self, label: Option<&str>) {
            self.tank_label = label.map(str::to_string);
        }

        fn set_tank_pressure(&mut self, pressure: Option<f32>) {
            self.tank_pressure = pressure;
        }

        fn set_release_pressure_range(&mut self, min: f32, max: f32) {
            self.release_pressure_range = Some((min, max));
        }

        fn set_release_pressure(&mut self, value: f32) {
            self.release_pressure = value;
        }

        fn set_release_valve(&mut self, open: bool) {
            self.release_valve = open;
        }

        fn close(&mut self) {
            self.visible = false;
            self.close_calls += 1;
        }
    }

    #[test]
    fn mock_window_lifecycle() {
        let mut window = MockCanisterWindow::create().unwrap();
        assert!(!window.visible);

        window.open_centered().unwrap();
        assert!(window.visible);

        window.close();
        window.close();
        assert!(!window.visible);
        assert_eq!(window.close_calls, 2);
    }
}
