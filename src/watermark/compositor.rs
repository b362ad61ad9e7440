//! Alpha compositing of a watermark onto the working image.
//!
//! The mark is blended with the Porter-Duff "over" operator at full opacity,
//! so transparent mark pixels leave the image untouched. Parts of the mark
//! outside the image are clipped.

use image::{Rgba, RgbaImage};

/// Blend `mark` onto `target` with its top-left corner at `(x, y)`.
pub fn overlay(target: &mut RgbaImage, mark: &RgbaImage, x: u32, y: u32) {
    let x_end = x.saturating_add(mark.width()).min(target.width());
    let y_end = y.saturating_add(mark.height()).min(target.height());

    for ty in y..y_end {
        for tx in x..x_end {
            let wm_pixel = mark.get_pixel(tx - x, ty - y);
            let target_pixel = target.get_pixel(tx, ty);

            let blended = blend_pixels(*target_pixel, *wm_pixel);
            target.put_pixel(tx, ty, blended);
        }
    }
}

/// Porter-Duff "over": result = foreground + background * (1 - foreground.alpha)
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    match foreground[3] {
        0 => return background,
        255 => return foreground,
        _ => {}
    }

    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
