//! Terminal canister window using ratatui.
//!
//! Concrete [`CanisterWindow`] drawing a centered device panel in the
//! terminal. Field setters only update local copies; the host loop calls
//! [`TerminalCanisterWindow::render`] and [`TerminalCanisterWindow::poll_event`]
//! to redraw and to translate key presses into [`WindowEvent`]s.

use crate::error::Result;
use crate::protocol::PortStatus;
use crate::ui::window::{CanisterWindow, WindowEvent};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color as TuiColor, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Slider granularity: one key press moves 1/20th of the valid range.
const PRESSURE_STEPS: f32 = 20.0;

/// Ratatui-backed canister window.
pub struct TerminalCanisterWindow {
    terminal: Option<CrosstermTerminal>,
    canister_label: String,
    canister_pressure: f32,
    port_status: PortStatus,
    tank_label: Option<String>,
    tank_pressure: Option<f32>,
    release_pressure: f32,
    release_pressure_min: f32,
    release_pressure_max: f32,
    release_valve: bool,
}

impl TerminalCanisterWindow {
    /// Redraw the panel. No-op while the window is not open.
    pub fn render(&mut self) -> Result<()> {
        let title = self.canister_label.clone();
        let rows = self.body_rows();
        let gauge_ratio = self.release_ratio();
        let gauge_label = format!(
            "release {:.1} kPa [{:.0}..{:.0}]",
            self.release_pressure, self.release_pressure_min, self.release_pressure_max
        );
        let Some(terminal) = self.terminal.as_mut() else {
            return Ok(());
        };

        terminal.draw(move |frame| {
            let area = centered_rect(frame.size(), 46, 12);

            let block = Block::default().title(title).borders(Borders::ALL);
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
                .split(inner);

            frame.render_widget(Paragraph::new(rows), chunks[0]);

            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(TuiColor::Cyan))
                .ratio(gauge_ratio)
                .label(gauge_label);
            frame.render_widget(gauge, chunks[1]);
        })?;

        Ok(())
    }

    /// Wait up to `timeout` for a key press and map it to a window event.
    pub fn poll_event(&mut self, timeout: Duration) -> Result<Option<WindowEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
            return Ok(self.key_to_event(key.code));
        }

        Ok(None)
    }

    fn key_to_event(&self, code: KeyCode) -> Option<WindowEvent> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(WindowEvent::Closed),
            KeyCode::Char('o') => Some(WindowEvent::ReleaseValveOpenPressed),
            KeyCode::Char('c') => Some(WindowEvent::ReleaseValveClosePressed),
            KeyCode::Char('e') => Some(WindowEvent::TankEjectPressed),
            KeyCode::Left => Some(WindowEvent::ReleasePressureChanged(
                self.release_pressure - self.pressure_step(),
            )),
            KeyCode::Right => Some(WindowEvent::ReleasePressureChanged(
                self.release_pressure + self.pressure_step(),
            )),
            _ => None,
        }
    }

    fn pressure_step(&self) -> f32 {
        let span = self.release_pressure_max - self.release_pressure_min;
        if span > 0.0 {
            span / PRESSURE_STEPS
        } else {
            1.0
        }
    }

    fn release_ratio(&self) -> f64 {
        let span = self.release_pressure_max - self.release_pressure_min;
        if span <= 0.0 {
            return 0.0;
        }
        let ratio = (self.release_pressure - self.release_pressure_min) / span;
        f64::from(ratio.clamp(0.0, 1.0))
    }

    fn body_rows(&self) -> Vec<Line<'static>> {
        let port = match self.port_status {
            PortStatus::Connected => Span::styled("connected", Style::default().fg(TuiColor::Green)),
            PortStatus::Disconnected => {
                Span::styled("disconnected", Style::default().fg(TuiColor::Red))
            }
        };
        let valve = if self.release_valve {
            Span::styled("open", Style::default().fg(TuiColor::Green))
        } else {
            Span::styled("closed", Style::default().fg(TuiColor::DarkGray))
        };
        let tank_row = match (&self.tank_label, self.tank_pressure) {
            (Some(label), Some(pressure)) => format!("tank: {label} ({pressure:.1} kPa)"),
            (Some(label), None) => format!("tank: {label}"),
            _ => "tank: none inserted".to_string(),
        };

        vec![
            Line::from(format!("pressure: {:.1} kPa", self.canister_pressure)),
            Line::from(vec![Span::raw("port: "), port]),
            Line::from(tank_row),
            Line::from(vec![Span::raw("release valve: "), valve]),
            Line::from(""),
            Line::from("[o]pen/[c]lose valve  [e]ject tank  arrows: pressure  [q]uit"),
        ]
    }
}

impl CanisterWindow for TerminalCanisterWindow {
    fn create() -> Result<Self> {
        Ok(Self {
            terminal: None,
            canister_label: "gas canister".to_string(),
            canister_pressure: 0.0,
            port_status: PortStatus::Disconnected,
            tank_label: None,
            tank_pressure: None,
            release_pressure: 0.0,
            release_pressure_min: 0.0,
            release_pressure_max: 0.0,
            release_valve: false,
        })
    }

    fn open_centered(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            return Ok(());
        }

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        self.terminal = Some(Terminal::new(backend)?);
        self.render()
    }

    fn set_canister_label(&mut self, label: &str) {
        self.canister_label = label.to_string();
    }

    fn set_canister_pressure(&mut self, pressure: f32) {
        self.canister_pressure = pressure;
    }

    fn set_port_status(&mut self, status: PortStatus) {
        self.port_status = status;
    }

    fn set_tank_label(&mut self, label: Option<&str>) {
        self.tank_label = label.map(str::to_string);
    }

    fn set_tank_pressure(&mut self, pressure: Option<f32>) {
        self.tank_pressure = pressure;
    }

    fn set_release_pressure_range(&mut self, min: f32, max: f32) {
        self.release_pressure_min = min;
        self.release_pressure_max = max;
    }

    fn set_release_pressure(&mut self, value: f32) {
        self.release_pressure = value;
    }

    fn set_release_valve(&mut self, open: bool) {
        self.release_valve = open;
    }

    fn close(&mut self) {
        if self.terminal.take().is_some() {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

impl Drop for TerminalCanisterWindow {
    fn drop(&mut self) {
        self.close();
    }
}

/// Center a `width` x `height` box inside `area`, shrinking to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
