//! Column calculation: `n` items into `n` equal-width rectangles.

use splitview_common::types::ScreenRect;

/// Split `bounds` into `n` equal-width, full-height columns, left to right.
///
/// Column `i` starts at `bounds.left + i * floor(width / n)`. The last
/// column absorbs the division remainder so the widths always sum to
/// `bounds.width`. Returns an empty plan for `n == 0`.
pub fn plan(n: usize, bounds: ScreenRect) -> Vec<ScreenRect> {
    if n == 0 {
        return Vec::new();
    }

    let count = n as u64;
    let total = bounds.width as u64;
    let base = total / count;

    (0..count)
        .map(|i| {
            let width = if i + 1 == count {
                total - base * (count - 1)
            } else {
                base
            };
            ScreenRect {
                left: (bounds.left as i64 + (i * base) as i64) as i32,
                top: bounds.top,
                width: width as u32,
                height: bounds.height,
            }
        })
        .collect()
}
