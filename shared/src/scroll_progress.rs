//! Scroll fraction of a pinned region.
//!
//! The pinned region is a track taller than the viewport; while the track
//! scrolls past, its sticky child stays in place and the scrolled distance
//! drives `progress = clamp(offset / extent, 0, 1)`.

/// Clamped scroll fraction. A non-positive or non-finite extent collapses the
/// region to a point: anything scrolled past it counts as complete.
pub fn scroll_fraction(offset: f64, extent: f64) -> f64 {
    if !offset.is_finite() {
        return if offset > 0.0 { 1.0 } else { 0.0 };
    }
    if !extent.is_finite() || extent <= 0.0 {
        return if offset > 0.0 { 1.0 } else { 0.0 };
    }
    (offset / extent).clamp(0.0, 1.0)
}

/// Scrollable extent of a pinned track: its height minus one viewport.
pub fn track_extent(track_height: f64, viewport_height: f64) -> f64 {
    (track_height - viewport_height).max(0.0)
}

/// Offset within the pinned region from the viewport-relative top of the
/// region's own spacer. Zero exactly when the pinned section reaches the
/// viewport top, whatever sits above it on the page.
pub fn region_offset(region_top: f64) -> f64 {
    -region_top
}

/// Offset equivalent of a progress value reported by an external pin.
pub fn offset_from_progress(progress: f64, extent: f64) -> f64 {
    progress.clamp(0.0, 1.0) * extent.max(0.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollProgressTracker {
    extent: f64,
    offset: f64,
    progress: f64,
}

impl ScrollProgressTracker {
    pub fn new(extent: f64) -> Self {
        Self {
            extent,
            offset: 0.0,
            progress: 0.0,
        }
    }

    /// Records a new scroll offset and returns the recomputed progress.
    ///
    /// `offset` is the distance the track's top edge has travelled above the
    /// viewport top (negative while the track is still below it).
    pub fn update(&mut self, offset: f64) -> f64 {
        self.offset = offset;
        self.progress = scroll_fraction(offset, self.extent);
        self.progress
    }

    /// Viewport resize: the extent may change under an unchanged offset.
    pub fn resize(&mut self, extent: f64) -> f64 {
        self.extent = extent;
        self.progress = scroll_fraction(self.offset, extent);
        self.progress
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped_to_unit_interval() {
        let mut tracker = ScrollProgressTracker::new(3000.0);
        assert_eq!(tracker.update(-250.0), 0.0);
        assert_eq!(tracker.update(1500.0), 0.5);
        assert_eq!(tracker.update(3000.0), 1.0);
        assert_eq!(tracker.update(9000.0), 1.0);
    }

    #[test]
    fn resize_recomputes_against_new_extent() {
        let mut tracker = ScrollProgressTracker::new(2000.0);
        tracker.update(1000.0);
        assert_eq!(tracker.progress(), 0.5);
        assert_eq!(tracker.resize(4000.0), 0.25);
        assert_eq!(tracker.extent(), 4000.0);
    }

    #[test]
    fn degenerate_extent_does_not_divide_by_zero() {
        assert_eq!(scroll_fraction(10.0, 0.0), 1.0);
        assert_eq!(scroll_fraction(0.0, 0.0), 0.0);
        assert_eq!(scroll_fraction(-5.0, f64::NAN), 0.0);
        assert_eq!(scroll_fraction(f64::INFINITY, 100.0), 1.0);
    }

    #[test]
    fn track_extent_subtracts_viewport() {
        assert_eq!(track_extent(3900.0, 900.0), 3000.0);
        assert_eq!(track_extent(500.0, 900.0), 0.0);
    }

    #[test]
    fn progress_starts_when_the_section_reaches_the_top() {
        // a 120 px header above the spacer
        let header = 120.0;
        let mut tracker = ScrollProgressTracker::new(3000.0);
        for scroll_y in [0.0, 60.0, 120.0] {
            assert_eq!(tracker.update(region_offset(header - scroll_y)), 0.0);
        }
        assert_eq!(tracker.update(region_offset(header - 1620.0)), 0.5);
        assert_eq!(tracker.update(region_offset(header - 3120.0)), 1.0);
    }

    #[test]
    fn external_pin_progress_maps_back_to_offset() {
        let mut tracker = ScrollProgressTracker::new(3000.0);
        assert_eq!(tracker.update(offset_from_progress(0.25, 3000.0)), 0.25);
        assert_eq!(offset_from_progress(1.4, 3000.0), 3000.0);
        assert_eq!(offset_from_progress(0.5, -10.0), 0.0);
    }
}
