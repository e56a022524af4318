//! 差分マップの2値化（大津の方法）

use super::ssim::SsimMap;
use image::{GrayImage, Luma};

/// 類似度マップを8bitの非類似度画像に変換（0=同一, 255=完全に異なる）
pub fn dissimilarity_image(map: &SsimMap) -> GrayImage {
    let width = map.width as usize;
    GrayImage::from_fn(map.width, map.height, |x, y| {
        let s = map.values[y as usize * width + x as usize];
        Luma([((1.0 - s.clamp(0.0, 1.0)) * 255.0).round() as u8])
    })
}

/// クラス間分散が最大になる閾値
///
/// 画素値が1種類しかない場合はその値を返す（`> level` で前景が空になる）。
pub fn otsu_level(image: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for p in image.pixels() {
        histogram[p[0] as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut best: Option<(f64, u8)> = None;
    let mut weight_bg = 0u64;
    let mut sum_bg = 0.0;

    for (level, &count) in histogram.iter().enumerate() {
        weight_bg += count;
        sum_bg += level as f64 * count as f64;
        if weight_bg == 0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0 {
            break;
        }

        let mean_bg = sum_bg / weight_bg as f64;
        let mean_fg = (sum_all - sum_bg) / weight_fg as f64;
        let variance = weight_bg as f64 * weight_fg as f64 * (mean_bg - mean_fg).powi(2);

        if best.map_or(true, |(v, _)| variance > v) {
            best = Some((variance, level as u8));
        }
    }

    match best {
        Some((_, level)) => level,
        None => histogram
            .iter()
            .rposition(|&c| c > 0)
            .map(|l| l as u8)
            .unwrap_or(0),
    }
}

/// 閾値より大きい画素を前景（255）とするマスク
pub fn binarize(image: &GrayImage, level: u8) -> GrayImage {
    let mut mask = GrayImage::new(image.width(), image.height());
    for (x, y, p) in image.enumerate_pixels() {
        if p[0] > level {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    mask
}
