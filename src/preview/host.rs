//! Resizable viewport hosting a preview component.
//!
//! Width is kept as a percentage of the viewport. Presets jump to fixed
//! widths; dragging a frame edge sets the width from the pointer's distance
//! to the viewport center, symmetric on both sides.

use ratatui::layout::Rect;

/// Keyboard step for nudging the width
pub const NUDGE_PERCENT: f32 = 5.0;

/// Device width presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevicePreset {
    Mobile,
    Tablet,
    Desktop,
}

impl DevicePreset {
    pub const ALL: [DevicePreset; 3] = [Self::Mobile, Self::Tablet, Self::Desktop];

    pub fn percent(&self) -> f32 {
        match self {
            Self::Mobile => 30.0,
            Self::Tablet => 60.0,
            Self::Desktop => 100.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mobile => "Mobile",
            Self::Tablet => "Tablet",
            Self::Desktop => "Desktop",
        }
    }
}

/// Drag gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// View state of the preview viewport. Lives only while the preview is open.
#[derive(Debug, Clone)]
pub struct PreviewHost {
    width_percent: f32,
    viewport: Rect,
    min_frame_width: u16,
    handle_tolerance: u16,
    drag: DragState,
    /// Width requested before the first viewport arrived
    pending_width: Option<f32>,
}

impl PreviewHost {
    /// Create a host at full width
    pub fn new(min_frame_width: u16, handle_tolerance: u16) -> Self {
        Self {
            width_percent: 100.0,
            viewport: Rect::default(),
            min_frame_width: min_frame_width.max(1),
            handle_tolerance,
            drag: DragState::Idle,
            pending_width: None,
        }
    }

    /// Start at a given width, clamped once a viewport is known
    pub fn with_width(mut self, percent: f32) -> Self {
        if self.viewport.width == 0 {
            self.pending_width = Some(percent);
        } else {
            self.width_percent = self.clamp(percent);
        }
        self
    }

    pub fn width_percent(&self) -> f32 {
        self.width_percent
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    /// Smallest percentage that still honors the minimum frame width
    pub fn min_percent(&self) -> f32 {
        if self.viewport.width == 0 {
            return 100.0;
        }
        (f32::from(self.min_frame_width) / f32::from(self.viewport.width) * 100.0).min(100.0)
    }

    /// Update the viewport after a resize and re-clamp the width
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        if viewport.width == 0 {
            return;
        }
        let width = self.pending_width.take().unwrap_or(self.width_percent);
        self.width_percent = self.clamp(width);
    }

    pub fn apply_preset(&mut self, preset: DevicePreset) {
        self.pending_width = None;
        self.width_percent = self.clamp(preset.percent());
    }

    /// Preset matching the current width, if any
    pub fn active_preset(&self) -> Option<DevicePreset> {
        DevicePreset::ALL
            .into_iter()
            .find(|p| (p.percent() - self.width_percent).abs() < 0.5)
    }

    /// Grow or shrink the width by a number of percentage points
    pub fn nudge(&mut self, delta: f32) {
        self.pending_width = None;
        self.width_percent = self.clamp(self.width_percent + delta);
    }

    /// Start dragging when the pointer goes down on a frame edge
    pub fn pointer_down(&mut self, column: u16, row: u16) -> bool {
        if self.is_on_handle(column, row) {
            self.drag = DragState::Dragging;
            true
        } else {
            false
        }
    }

    /// Track the pointer while dragging. Returns whether the width changed.
    pub fn pointer_move(&mut self, column: u16) -> bool {
        if !self.is_dragging() || self.viewport.width == 0 {
            return false;
        }
        let center = f32::from(self.viewport.x) + f32::from(self.viewport.width) / 2.0;
        let distance = (f32::from(column) - center).abs();
        let percent = distance * 2.0 / f32::from(self.viewport.width) * 100.0;
        let new_width = self.clamp(percent);
        let changed = (new_width - self.width_percent).abs() > f32::EPSILON;
        self.width_percent = new_width;
        changed
    }

    /// Pointer released anywhere ends the gesture
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Abandon any gesture in progress, e.g. when leaving the preview
    pub fn cancel_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Area of the frame inside the viewport, centered horizontally
    pub fn frame_area(&self) -> Rect {
        let viewport = self.viewport;
        if viewport.width == 0 {
            return viewport;
        }
        let scaled = (f32::from(viewport.width) * self.width_percent / 100.0).round() as u16;
        let width = scaled.max(self.min_frame_width).min(viewport.width);
        Rect {
            x: viewport.x + (viewport.width - width) / 2,
            y: viewport.y,
            width,
            height: viewport.height,
        }
    }

    /// Whether a cell lies on the left or right edge of the frame
    pub fn is_on_handle(&self, column: u16, row: u16) -> bool {
        let frame = self.frame_area();
        if frame.width == 0 || row < frame.y || row >= frame.y.saturating_add(frame.height) {
            return false;
        }
        let left = frame.x;
        let right = frame.x + frame.width - 1;
        column.abs_diff(left) <= self.handle_tolerance || column.abs_diff(right) <= self.handle_tolerance
    }

    fn clamp(&self, percent: f32) -> f32 {
        if percent.is_nan() {
            return 100.0;
        }
        percent.clamp(self.min_percent(), 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(width: u16) -> PreviewHost {
        let mut host = PreviewHost::new(24, 1);
        host.set_viewport(Rect::new(10, 2, width, 30));
        host
    }

    #[test]
    fn test_presets() {
        let mut host = host(200);
        host.apply_preset(DevicePreset::Mobile);
        assert_eq!(host.width_percent(), 30.0);
        assert_eq!(host.active_preset(), Some(DevicePreset::Mobile));
        assert_eq!(host.frame_area().width, 60);

        host.apply_preset(DevicePreset::Tablet);
        assert_eq!(host.frame_area().width, 120);
        assert_eq!(host.frame_area().x, 10 + 40);

        host.apply_preset(DevicePreset::Desktop);
        assert_eq!(host.frame_area(), Rect::new(10, 2, 200, 30));
    }

    #[test]
    fn test_preset_clamped_on_narrow_viewport() {
        let mut host = host(40);
        host.apply_preset(DevicePreset::Mobile);
        assert!((host.width_percent() - 60.0).abs() < 1e-3);
        assert_eq!(host.frame_area().width, 24);
    }

    #[test]
    fn test_drag_state_machine() {
        let mut host = host(100);
        assert_eq!(host.drag_state(), DragState::Idle);

        // not on a handle: no gesture
        assert!(!host.pointer_down(60, 5));
        assert!(!host.pointer_move(30));
        assert_eq!(host.width_percent(), 100.0);

        // right edge of a full-width frame is column 109
        assert!(host.pointer_down(109, 5));
        assert!(host.is_dragging());
        assert!(host.pointer_move(85));
        assert_eq!(host.width_percent(), 50.0);
        assert_eq!(host.frame_area().width, 50);

        // release outside the viewport still ends the drag
        host.pointer_up();
        assert_eq!(host.drag_state(), DragState::Idle);
        assert!(!host.pointer_move(109));
        assert_eq!(host.width_percent(), 50.0);
    }

    #[test]
    fn test_drag_is_symmetric() {
        let mut left = host(100);
        let mut right = host(100);
        assert!(left.pointer_down(10, 3));
        assert!(right.pointer_down(109, 3));
        left.pointer_move(35);
        right.pointer_move(85);
        assert_eq!(left.width_percent(), right.width_percent());
    }

    #[test]
    fn test_drag_width_always_in_bounds() {
        for width in [1u16, 10, 24, 37, 80, 200] {
            let mut host = host(width);
            let frame = host.frame_area();
            assert!(host.pointer_down(frame.x + frame.width - 1, 2));
            for column in 0..=u16::MAX / 64 {
                host.pointer_move(column);
                let w = host.width_percent();
                assert!(w >= host.min_percent() && w <= 100.0, "width {} out of bounds", w);
                assert!(host.frame_area().width >= 24.min(width));
                assert!(host.frame_area().width <= width);
            }
            host.pointer_move(u16::MAX);
            assert_eq!(host.width_percent(), 100.0);
        }
    }

    #[test]
    fn test_nudge_and_resize_reclamp() {
        let mut host = host(100);
        host.nudge(-NUDGE_PERCENT * 100.0);
        assert!((host.width_percent() - 24.0).abs() < 1e-3);
        host.set_viewport(Rect::new(0, 0, 48, 10));
        assert_eq!(host.width_percent(), 50.0);
        host.nudge(NUDGE_PERCENT);
        assert_eq!(host.width_percent(), 55.0);
    }

    #[test]
    fn test_requested_width_waits_for_viewport() {
        let mut host = PreviewHost::new(24, 1).with_width(30.0);
        assert_eq!(host.width_percent(), 100.0);

        host.set_viewport(Rect::default());
        assert_eq!(host.width_percent(), 100.0);

        host.set_viewport(Rect::new(0, 0, 200, 20));
        assert_eq!(host.width_percent(), 30.0);
        assert_eq!(host.active_preset(), Some(DevicePreset::Mobile));

        // clamped like any other width
        let mut narrow = PreviewHost::new(24, 1).with_width(10.0);
        narrow.set_viewport(Rect::new(0, 0, 48, 10));
        assert_eq!(narrow.width_percent(), 50.0);
    }

    #[test]
    fn test_empty_viewport() {
        let host = PreviewHost::new(24, 1);
        assert_eq!(host.min_percent(), 100.0);
        assert_eq!(host.frame_area(), Rect::default());
    }
}
