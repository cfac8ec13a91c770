//! Sidebar open/close state, independent of rendering.
//!
//! A four-state machine with a fixed transition duration, advanced by
//! caller-supplied instants so the renderer (or a test) owns the
//! clock.  Toggling mid-transition reverses direction from the
//! current visual progress rather than snapping to an endpoint.

use std::time::{Duration, Instant};

use courant_shared::constants::SIDEBAR_TRANSITION_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug)]
pub struct Sidebar {
    state: SidebarState,
    duration: Duration,
    /// Open fraction at the instant the current transition started.
    base: f32,
    started: Option<Instant>,
}

impl Sidebar {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: SidebarState::Closed,
            duration,
            base: 0.0,
            started: None,
        }
    }

    pub fn state(&self) -> SidebarState {
        self.state
    }

    /// Open fraction in `[0, 1]`; the renderer multiplies the full
    /// width by this.
    pub fn progress(&self, now: Instant) -> f32 {
        let step = self
            .started
            .map(|started| {
                now.duration_since(started).as_secs_f32() / self.duration.as_secs_f32()
            })
            .unwrap_or(0.0);
        match self.state {
            SidebarState::Closed => 0.0,
            SidebarState::Open => 1.0,
            SidebarState::Opening => (self.base + step).min(1.0),
            SidebarState::Closing => (self.base - step).max(0.0),
        }
    }

    /// Reverse or start a transition at `now`, keeping the current
    /// visual progress.
    pub fn toggle(&mut self, now: Instant) {
        self.base = self.progress(now);
        self.state = match self.state {
            SidebarState::Closed | SidebarState::Closing => SidebarState::Opening,
            SidebarState::Open | SidebarState::Opening => SidebarState::Closing,
        };
        self.started = Some(now);
    }

    /// Settle a finished transition into its resting state.
    pub fn tick(&mut self, now: Instant) {
        let progress = self.progress(now);
        match self.state {
            SidebarState::Opening if progress >= 1.0 => {
                self.state = SidebarState::Open;
                self.base = 1.0;
                self.started = None;
            }
            SidebarState::Closing if progress <= 0.0 => {
                self.state = SidebarState::Closed;
                self.base = 0.0;
                self.started = None;
            }
            _ => {}
        }
    }
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new(Duration::from_millis(SIDEBAR_TRANSITION_MS))
    }
}
