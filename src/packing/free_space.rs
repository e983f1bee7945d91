//! Maximal-rectangles bookkeeping for a sheet under construction.
//!
//! The free space of a sheet is kept as a list of possibly overlapping
//! maximal empty rectangles. Placing a piece removes its kerf-grown
//! footprint: each free rectangle it touches is split into up to four
//! remainders, and any rectangle contained in another is dropped.

use crate::model::Rect;
use crate::validation::geometry::kerf_footprint;

/// A maximal empty region of a sheet.
pub type FreeRectangle = Rect;

/// Free regions of one sheet.
#[derive(Debug, Clone)]
pub struct FreeSpace {
    sheet_w: i64,
    sheet_h: i64,
    kerf: i64,
    free: Vec<FreeRectangle>,
}

impl FreeSpace {
    /// Free space of an empty sheet: one rectangle covering all of it.
    pub fn new(sheet_w: i64, sheet_h: i64, kerf: i64) -> Self {
        Self {
            sheet_w,
            sheet_h,
            kerf,
            free: vec![Rect::new(0, 0, sheet_w, sheet_h)],
        }
    }

    pub fn rects(&self) -> &[FreeRectangle] {
        &self.free
    }

    /// Footprint a piece of size `w x h` reserves when anchored at `(x, y)`.
    pub fn reserved(&self, x: i64, y: i64, w: i64, h: i64) -> Rect {
        kerf_footprint(self.sheet_w, self.sheet_h, self.kerf, &Rect::new(x, y, w, h))
    }

    /// Remove `used` from the free space.
    pub fn occupy(&mut self, used: &Rect) {
        let mut kept = Vec::with_capacity(self.free.len() + 4);
        let mut splits = Vec::new();

        for free in &self.free {
            if free.intersects(used) {
                split_free_rect(free, used, &mut splits);
            } else {
                kept.push(*free);
            }
        }

        kept.extend(splits);
        self.free = kept;
        self.prune();
    }

    /// Drop every rectangle contained in another; of two equal rectangles the
    /// earlier one survives.
    fn prune(&mut self) {
        let n = self.free.len();
        let mut keep = vec![true; n];

        for i in 0..n {
            for j in 0..n {
                if i == j || !keep[j] {
                    continue;
                }
                let (a, b) = (&self.free[i], &self.free[j]);
                if b.contains(a) && (a != b || j < i) {
                    keep[i] = false;
                    break;
                }
            }
        }

        let mut idx = 0;
        self.free.retain(|_| {
            let k = keep[idx];
            idx += 1;
            k
        });
    }
}

/// Push the parts of `free` not covered by `used`.
fn split_free_rect(free: &Rect, used: &Rect, out: &mut Vec<Rect>) {
    if used.x > free.x {
        out.push(Rect::new(free.x, free.y, used.x - free.x, free.height));
    }
    if used.x_max() < free.x_max() {
        out.push(Rect::new(
            used.x_max(),
            free.y,
            free.x_max() - used.x_max(),
            free.height,
        ));
    }
    if used.y > free.y {
        out.push(Rect::new(free.x, free.y, free.width, used.y - free.y));
    }
    if used.y_max() < free.y_max() {
        out.push(Rect::new(
            free.x,
            used.y_max(),
            free.width,
            free.y_max() - used.y_max(),
        ));
    }
}
