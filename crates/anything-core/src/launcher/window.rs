//! Window size choreography driven by the result count.

use super::{Signal, SignalKind, schedule};
use crate::HostBridge;
use crate::config::WindowConfig;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
}

/// Launcher geometry for `n` results: just the input row when empty,
/// otherwise the input row, up to `max_visible` item rows and the padding.
#[must_use]
pub fn compute_geometry(n: usize, window: &WindowConfig) -> Geometry {
    let height = if n == 0 {
        window.input_row_height
    } else {
        let visible = u32::try_from(n)
            .unwrap_or(u32::MAX)
            .min(window.max_visible);
        window.input_row_height + visible * window.item_row_height + window.padding
    };
    Geometry {
        width: window.width,
        height,
    }
}

pub struct WindowChoreographer {
    window: WindowConfig,
    recenter_delay: Duration,
    signals: UnboundedSender<Signal>,
    current: Geometry,
}

impl WindowChoreographer {
    pub fn new(
        window: WindowConfig,
        recenter_delay: Duration,
        signals: UnboundedSender<Signal>,
    ) -> Self {
        let current = compute_geometry(0, &window);
        Self {
            window,
            recenter_delay,
            signals,
            current,
        }
    }

    /// Resize for `n` results. Collapsing also schedules a recenter after a
    /// short delay so it lands after the host's own reflow.
    pub fn apply<B: HostBridge>(&mut self, n: usize, bridge: &B) {
        let geometry = compute_geometry(n, &self.window);
        let Geometry { width, height } = geometry;
        debug!("Resizing to {width}x{height} for {n} results");
        bridge.resize(width, height);
        self.current = geometry;

        if n == 0 {
            // Dropping the handle detaches the timer task
            let timer = schedule(&self.signals, self.recenter_delay, SignalKind::RecenterDue);
            drop(timer);
        }
    }

    /// Resize to the settings form and recenter immediately.
    pub fn apply_settings<B: HostBridge>(&mut self, bridge: &B) {
        let geometry = Geometry {
            width: self.window.settings_width,
            height: self.window.settings_height,
        };
        bridge.resize(geometry.width, geometry.height);
        bridge.recenter();
        self.current = geometry;
    }

    #[must_use]
    pub fn current(&self) -> Geometry {
        self.current
    }
}
