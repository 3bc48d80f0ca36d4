//! Shared frame-loop context
//!
//! Flags every phase of the frame consults, owned by main and passed down
//! by reference. Nothing here hides behind a process-wide singleton, so
//! tests construct their own.

/// Per-frame shared flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceContext {
    /// Gates simulation without touching world state
    pub paused: bool,
    /// Draw bounding-box outlines and runtime stats on top of the scene.
    /// A runtime flag, so the same build can toggle diagnostics.
    pub debug_overlay: bool,
}

impl DeviceContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }

    pub fn toggle_debug_overlay(&mut self) {
        self.debug_overlay = !self.debug_overlay;
    }
}
