//! 差分領域の枠描画（アンチエイリアス付き）

use super::BoundingBox;
use image::{Rgb, RgbImage};

/// 枠の色（赤）
pub const OUTLINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// 枠の太さ（px）
pub const OUTLINE_WIDTH: f64 = 2.0;

/// `(x, y)` から `(x + w, y + h)` までの矩形の枠を描く
///
/// 画素中心から枠線までの距離で被覆率を求め、元の色と混ぜる。
/// 画像外にはみ出す部分は切り捨てる。
pub fn draw_outline(image: &mut RgbImage, bbox: &BoundingBox, color: Rgb<u8>, thickness: f64) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let x0 = bbox.x as f64;
    let y0 = bbox.y as f64;
    let x1 = (bbox.x + bbox.width) as f64;
    let y1 = (bbox.y + bbox.height) as f64;

    let half = thickness / 2.0;
    let reach = half + 1.0;
    let first_x = (x0 - reach).floor().max(0.0) as u32;
    let first_y = (y0 - reach).floor().max(0.0) as u32;
    let last_x = ((x1 + reach).ceil() as u32).min(width - 1);
    let last_y = ((y1 + reach).ceil() as u32).min(height - 1);

    for py in first_y..=last_y {
        for px in first_x..=last_x {
            let d = distance_to_outline(px as f64, py as f64, x0, y0, x1, y1);
            let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let pixel = image.get_pixel_mut(px, py);
                *pixel = blend(*pixel, color, coverage);
            }
        }
    }
}

fn distance_to_outline(px: f64, py: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    let inside = px >= x0 && px <= x1 && py >= y0 && py <= y1;
    if inside {
        (px - x0).min(x1 - px).min(py - y0).min(y1 - py)
    } else {
        let dx = (x0 - px).max(px - x1).max(0.0);
        let dy = (y0 - py).max(py - y1).max(0.0);
        (dx * dx + dy * dy).sqrt()
    }
}

fn blend(base: Rgb<u8>, color: Rgb<u8>, alpha: f64) -> Rgb<u8> {
    let mix = |b: u8, c: u8| (c as f64 * alpha + b as f64 * (1.0 - alpha)).round() as u8;
    Rgb([
        mix(base[0], color[0]),
        mix(base[1], color[1]),
        mix(base[2], color[2]),
    ])
}
