//! Tab zoom control.

use tracing::trace;

use super::Tab;

// ============================================================================
// Constants
// ============================================================================

/// Smallest zoom factor.
pub const MIN_ZOOM: f64 = 0.5;

/// Largest zoom factor.
pub const MAX_ZOOM: f64 = 2.0;

/// Zoom factor of a fresh tab.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Change applied by one zoom step.
pub const ZOOM_STEP: f64 = 0.1;

// ============================================================================
// Tab - Zoom
// ============================================================================

impl Tab {
    /// Zooms in one step, up to [`MAX_ZOOM`].
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
        self.apply_zoom();
    }

    /// Zooms out one step, down to [`MIN_ZOOM`].
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
        self.apply_zoom();
    }

    /// Restores [`DEFAULT_ZOOM`].
    pub fn reset_zoom(&mut self) {
        self.zoom = DEFAULT_ZOOM;
        self.apply_zoom();
    }

    /// Pushes the zoom factor to the context (privileged shells only).
    pub(crate) fn apply_zoom(&self) {
        if !self.services.config.privileged {
            return;
        }
        if let Some(context) = &self.context {
            trace!(tab_id = %self.id, zoom = self.zoom, "Applying zoom");
            context.set_zoom(self.zoom);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
