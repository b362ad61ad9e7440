//! Corner placement for watermarks.
//!
//! A watermark goes into one of four corners, offset from both edges by the
//! configured margin:
//!
//! ```text
//! TopLeft     -> (margin, margin)
//! TopRight    -> (img_w - (wm_w + margin), margin)
//! BottomLeft  -> (margin, img_h - (wm_h + margin))
//! BottomRight -> (img_w - (wm_w + margin), img_h - (wm_h + margin))
//! ```
//!
//! The result is clamped so the rectangle stays inside the image whenever
//! the watermark fits.

use rand::Rng;

use crate::image::{Rect, Size};

/// One of the four placement corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Pick a corner uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Corner {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    fn is_right(self) -> bool {
        matches!(self, Corner::TopRight | Corner::BottomRight)
    }

    fn is_bottom(self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::BottomRight)
    }
}

/// Rectangle covered by a `mark`-sized watermark in `corner` of `image`.
pub fn placement(corner: Corner, image: Size, mark: Size, margin: u32) -> Rect {
    let img_w = image.width as i64;
    let img_h = image.height as i64;
    let wm_w = mark.width as i64;
    let wm_h = mark.height as i64;
    let m = margin as i64;

    let x = if corner.is_right() {
        img_w - (wm_w + m)
    } else {
        m
    };
    let y = if corner.is_bottom() {
        img_h - (wm_h + m)
    } else {
        m
    };

    let max_x = (img_w - wm_w).max(0);
    let max_y = (img_h - wm_h).max(0);

    Rect::new(
        x.clamp(0, max_x) as u32,
        y.clamp(0, max_y) as u32,
        mark.width,
        mark.height,
    )
}
