use crate::foundation::core::{Rect, ScrollMetrics, clamp01};

/// Normalized scroll position of a scrollable area. Zero when nothing overflows.
pub fn page_progress(metrics: ScrollMetrics) -> f64 {
    let overflow = metrics.overflow();
    if overflow <= 0.0 {
        return 0.0;
    }
    clamp01(metrics.offset / overflow)
}

/// How far `element` has travelled up through `container`.
///
/// Both rects share one coordinate space. The element's vertical center is measured from the
/// container's top edge: an element entirely below the container reads `0`, one entirely above
/// reads `1`, anything in between `1 - center / height`.
pub fn element_visibility_progress(element: Rect, container: Rect) -> f64 {
    let height = container.height();
    if height <= 0.0 {
        return 0.0;
    }
    let top = element.y0 - container.y0;
    let bottom = element.y1 - container.y0;
    if top >= height {
        return 0.0;
    }
    if bottom <= 0.0 {
        return 1.0;
    }
    let center = (top + bottom) / 2.0;
    clamp01(1.0 - center / height)
}

/// Remap `raw` progress onto the window `[start_offset%, end_offset%]`.
///
/// At or below the window reads `0`, at or above it `1`, linear in between. An inverted window
/// collapses onto its start, turning the remap into a step.
pub fn ranged_progress(raw: f64, start_offset: f64, end_offset: f64) -> f64 {
    let raw = clamp01(raw);
    let start = clamp01(start_offset / 100.0);
    let end = clamp01(end_offset / 100.0).max(start);
    if raw <= start {
        return 0.0;
    }
    if raw >= end {
        return 1.0;
    }
    clamp01((raw - start) / (end - start))
}
