//! Scale-responsive sizing.
//!
//! Every pixel size the dialogs use comes from one of two base tables
//! (desktop, touch) defined at 1.0x and multiplied by the effective scale.
//! [`ScaledLayout`] caches the result and recomputes it only after the scale
//! or the mode actually changed.

#[cfg(feature = "tracing")]
use tracing::trace;

/// Per-mode base constants at 1.0x scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaseSizes {
    /// File list row height
    pub row_height: f32,
    /// Toolbar and dialog button height
    pub button_height: f32,
    /// Dialog button width
    pub button_width: f32,
    /// File/folder icon size
    pub icon_size: f32,
    /// Nominal font size
    pub font_size: f32,
    /// Breadcrumb bar height
    pub path_bar_height: f32,
    /// Text input height
    pub input_height: f32,
    /// Toolbar icon button width
    pub icon_button_width: f32,
    /// Size column width
    pub size_column_width: f32,
    /// Modified column width
    pub date_column_width: f32,
    /// Confirmation dialog icon diameter
    pub confirm_icon_size: f32,
    /// Drives combo width
    pub drives_combo_width: f32,
    /// Sort combo minimum width
    pub sort_combo_width: f32,
    /// Scrollbar width
    pub scrollbar_width: f32,
    /// Minimum scrollbar grab size
    pub grab_min_size: f32,
}

impl BaseSizes {
    /// Mouse and keyboard.
    pub const DESKTOP: BaseSizes = BaseSizes {
        row_height: 24.0,
        button_height: 28.0,
        button_width: 80.0,
        icon_size: 18.0,
        font_size: 14.0,
        path_bar_height: 32.0,
        input_height: 26.0,
        icon_button_width: 32.0,
        size_column_width: 80.0,
        date_column_width: 120.0,
        confirm_icon_size: 32.0,
        drives_combo_width: 90.0,
        sort_combo_width: 70.0,
        scrollbar_width: 16.0,
        grab_min_size: 16.0,
    };

    /// Finger-sized targets.
    pub const TOUCH: BaseSizes = BaseSizes {
        row_height: 52.0,
        button_height: 48.0,
        button_width: 120.0,
        icon_size: 28.0,
        font_size: 16.0,
        path_bar_height: 56.0,
        input_height: 48.0,
        icon_button_width: 100.0,
        size_column_width: 100.0,
        date_column_width: 150.0,
        confirm_icon_size: 48.0,
        drives_combo_width: 130.0,
        sort_combo_width: 100.0,
        scrollbar_width: 40.0,
        grab_min_size: 40.0,
    };

    /// Table for the given mode.
    pub fn for_mode(touch: bool) -> &'static BaseSizes {
        if touch { &Self::TOUCH } else { &Self::DESKTOP }
    }
}

/// Desktop dialog size at 1.0x.
pub const DIALOG_SIZE: [f32; 2] = [650.0, 450.0];
/// Desktop dialog minimum size at 1.0x.
pub const DIALOG_MIN_SIZE: [f32; 2] = [400.0, 300.0];
/// Confirmation dialog width bounds at 1.0x.
pub const CONFIRM_WIDTH_RANGE: (f32, f32) = (300.0, 500.0);
/// Gap between adjacent dialog buttons at 1.0x.
pub const BUTTON_SPACING: f32 = 8.0;
/// New-folder name input width at 1.0x.
pub const POPUP_INPUT_WIDTH: f32 = 300.0;
/// Touch dialogs cover this fraction of the display.
pub const TOUCH_VIEWPORT_FRACTION: [f32; 2] = [0.9, 0.85];

/// Pixel sizes for one (mode, scale, display) combination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Effective scale these metrics were computed for
    pub scale: f32,
    /// Touch table in use
    pub touch: bool,
    /// File list row height
    pub row_height: f32,
    /// Button height
    pub button_height: f32,
    /// Dialog button width
    pub button_width: f32,
    /// Icon size
    pub icon_size: f32,
    /// Font size
    pub font_size: f32,
    /// Path bar height
    pub path_bar_height: f32,
    /// Input height
    pub input_height: f32,
    /// Toolbar icon button width
    pub icon_button_width: f32,
    /// Dialog width
    pub dialog_width: f32,
    /// Dialog height
    pub dialog_height: f32,
    /// Dialog minimum size (desktop)
    pub dialog_min_size: [f32; 2],
    /// Scrollbar width
    pub scrollbar_width: f32,
    /// Minimum grab size
    pub grab_min_size: f32,
    /// Size column width
    pub size_column_width: f32,
    /// Modified column width
    pub date_column_width: f32,
    /// Confirmation icon diameter
    pub confirm_icon_size: f32,
    /// Drives combo width
    pub drives_combo_width: f32,
    /// Sort combo width
    pub sort_combo_width: f32,
    /// Gap between dialog buttons
    pub button_spacing: f32,
    /// New-folder input width
    pub popup_input_width: f32,
}

impl LayoutMetrics {
    /// Scale the base table for `touch` by `scale`.
    ///
    /// Desktop dialogs take their size from the base constants; touch
    /// dialogs cover a fixed fraction of `display_size` instead.
    pub fn compute(touch: bool, scale: f32, display_size: [f32; 2]) -> Self {
        let b = BaseSizes::for_mode(touch);
        let (dialog_width, dialog_height) = if touch {
            (
                display_size[0] * TOUCH_VIEWPORT_FRACTION[0],
                display_size[1] * TOUCH_VIEWPORT_FRACTION[1],
            )
        } else {
            (DIALOG_SIZE[0] * scale, DIALOG_SIZE[1] * scale)
        };
        Self {
            scale,
            touch,
            row_height: b.row_height * scale,
            button_height: b.button_height * scale,
            button_width: b.button_width * scale,
            icon_size: b.icon_size * scale,
            font_size: b.font_size * scale,
            path_bar_height: b.path_bar_height * scale,
            input_height: b.input_height * scale,
            icon_button_width: b.icon_button_width * scale,
            dialog_width,
            dialog_height,
            dialog_min_size: [DIALOG_MIN_SIZE[0] * scale, DIALOG_MIN_SIZE[1] * scale],
            scrollbar_width: b.scrollbar_width * scale,
            grab_min_size: b.grab_min_size * scale,
            size_column_width: b.size_column_width * scale,
            date_column_width: b.date_column_width * scale,
            confirm_icon_size: b.confirm_icon_size * scale,
            drives_combo_width: b.drives_combo_width * scale,
            sort_combo_width: b.sort_combo_width * scale,
            button_spacing: BUTTON_SPACING * scale,
            popup_input_width: POPUP_INPUT_WIDTH * scale,
        }
    }

    /// Confirmation width bounds at this scale.
    pub fn confirm_width_range(&self) -> (f32, f32) {
        (
            CONFIRM_WIDTH_RANGE.0 * self.scale,
            CONFIRM_WIDTH_RANGE.1 * self.scale,
        )
    }

    /// Row height rounded down to whole pixels so the list clipper sees a
    /// stable value from frame to frame.
    pub fn floored_row_height(&self) -> f32 {
        self.row_height.floor()
    }
}

/// Lower and upper bound of the user zoom factor.
pub const USER_SCALE_RANGE: (f32, f32) = (0.5, 3.0);

/// Device density times a user zoom clamped to [`USER_SCALE_RANGE`] and
/// snapped to 0.1 steps.
pub fn effective_scale(dpi_scale: f32, user_scale: f32) -> f32 {
    let user = user_scale.clamp(USER_SCALE_RANGE.0, USER_SCALE_RANGE.1);
    let snapped = (user * 10.0).round() / 10.0;
    let dpi = if dpi_scale > 0.0 { dpi_scale } else { 1.0 };
    dpi * snapped
}

/// Cached [`LayoutMetrics`] with explicit invalidation.
#[derive(Clone, Debug)]
pub struct ScaledLayout {
    scale: f32,
    touch: bool,
    dirty: bool,
    resized: bool,
    metrics: LayoutMetrics,
}

impl Default for ScaledLayout {
    fn default() -> Self {
        Self::new(false, 1.0)
    }
}

impl ScaledLayout {
    /// Start with the given mode and scale.
    pub fn new(touch: bool, scale: f32) -> Self {
        let scale = sanitize_scale(scale);
        Self {
            scale,
            touch,
            dirty: true,
            resized: false,
            metrics: LayoutMetrics::compute(touch, scale, [0.0, 0.0]),
        }
    }

    /// Current effective scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether the touch table is in use.
    pub fn touch_mode(&self) -> bool {
        self.touch
    }

    /// Change the scale. Returns `true` (and marks the metrics stale) when
    /// it differs from the current one.
    pub fn set_scale(&mut self, scale: f32) -> bool {
        let scale = sanitize_scale(scale);
        if (scale - self.scale).abs() <= f32::EPSILON {
            return false;
        }
        self.scale = scale;
        self.dirty = true;
        self.resized = true;
        true
    }

    /// Switch between desktop and touch tables.
    pub fn set_touch_mode(&mut self, touch: bool) -> bool {
        if touch == self.touch {
            return false;
        }
        self.touch = touch;
        self.dirty = true;
        self.resized = true;
        true
    }

    /// Whether the next [`ScaledLayout::metrics`] call recomputes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Metrics for the current frame. Recomputes when stale, or in touch
    /// mode when the display size moved.
    pub fn metrics(&mut self, display_size: [f32; 2]) -> &LayoutMetrics {
        let display_moved = self.touch
            && (self.metrics.dialog_width
                != display_size[0] * TOUCH_VIEWPORT_FRACTION[0]
                || self.metrics.dialog_height != display_size[1] * TOUCH_VIEWPORT_FRACTION[1]);
        if self.dirty || display_moved {
            self.metrics = LayoutMetrics::compute(self.touch, self.scale, display_size);
            self.dirty = false;
            trace_layout_recomputed(self.touch, self.scale);
        }
        &self.metrics
    }

    /// Last computed metrics without recomputing.
    pub fn cached(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Reports a scale or mode change once, so a window can force its new
    /// size on the following frame.
    pub fn take_resized(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }
}

fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

#[cfg(feature = "tracing")]
fn trace_layout_recomputed(touch: bool, scale: f32) {
    trace!(event = "layout.recomputed", touch, scale, "layout metrics recomputed");
}

#[cfg(not(feature = "tracing"))]
fn trace_layout_recomputed(_touch: bool, _scale: f32) {}

#[cfg(test)]
mod tests {
    use super::*;

    const DISPLAY: [f32; 2] = [1000.0, 800.0];

    #[test]
    fn every_metric_scales_linearly() {
        let m = LayoutMetrics::compute(false, 2.0, DISPLAY);
        assert_eq!(m.row_height, 2.0 * BaseSizes::DESKTOP.row_height);
        assert_eq!(m.button_width, 160.0);
        assert_eq!(m.date_column_width, 240.0);
        assert_eq!(m.dialog_width, 1300.0);
        assert_eq!(m.dialog_height, 900.0);
        assert_eq!(m.dialog_min_size, [800.0, 600.0]);
        assert_eq!(m.button_spacing, 16.0);
        assert_eq!(m.confirm_width_range(), (600.0, 1000.0));
    }

    #[test]
    fn touch_dialog_follows_viewport() {
        let m = LayoutMetrics::compute(true, 2.0, DISPLAY);
        assert_eq!(m.row_height, 104.0);
        assert!((m.dialog_width - 900.0).abs() < 1e-3);
        assert!((m.dialog_height - 680.0).abs() < 1e-3);
        assert_eq!(m.scrollbar_width, 80.0);
    }

    #[test]
    fn set_scale_marks_dirty_only_on_change() {
        let mut layout = ScaledLayout::new(false, 1.0);
        let _ = layout.metrics(DISPLAY);
        assert!(!layout.is_dirty());
        assert!(!layout.set_scale(1.0));
        assert!(!layout.is_dirty());
        assert!(layout.set_scale(1.5));
        assert!(layout.is_dirty());
        assert_eq!(layout.metrics(DISPLAY).row_height, 36.0);
        assert!(!layout.is_dirty());
        assert!(layout.take_resized());
        assert!(!layout.take_resized());
    }

    #[test]
    fn mode_switch_recomputes() {
        let mut layout = ScaledLayout::new(false, 1.0);
        assert_eq!(layout.metrics(DISPLAY).row_height, 24.0);
        assert!(layout.set_touch_mode(true));
        assert_eq!(layout.metrics(DISPLAY).row_height, 52.0);
        assert!((layout.metrics([500.0, 400.0]).dialog_width - 450.0).abs() < 1e-3);
    }

    #[test]
    fn invalid_scale_falls_back_to_one() {
        let mut layout = ScaledLayout::new(false, 0.0);
        assert_eq!(layout.scale(), 1.0);
        assert!(!layout.set_scale(f32::NAN));
    }

    #[test]
    fn user_zoom_is_clamped_and_snapped() {
        assert_eq!(effective_scale(1.0, 10.0), 3.0);
        assert_eq!(effective_scale(1.0, 0.1), 0.5);
        assert!((effective_scale(2.0, 1.234) - 2.4).abs() < 1e-5);
        assert_eq!(effective_scale(0.0, 1.0), 1.0);
    }
}
