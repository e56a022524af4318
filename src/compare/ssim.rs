//! SSIM（構造的類似度）計算
//!
//! 7x7の一様窓で平均・分散・共分散を求め、画素ごとの類似度マップを作る。
//! 分散は標本分散（N/(N-1)）で正規化し、画像端は反射で補う。
//! スコアは窓半径ぶんの外周を除いたマップの平均値。

use super::CompareError;
use image::GrayImage;

const WINDOW: usize = 7;
const RADIUS: usize = WINDOW / 2;
const K1: f64 = 0.01;
const K2: f64 = 0.03;
const DATA_RANGE: f64 = 255.0;

/// 画素ごとの類似度マップ
#[derive(Debug, Clone)]
pub struct SsimMap {
    pub width: u32,
    pub height: u32,
    /// 行優先、値域は -1..1
    pub values: Vec<f64>,
    /// 平均類似度
    pub score: f64,
}

pub fn structural_similarity(a: &GrayImage, b: &GrayImage) -> Result<SsimMap, CompareError> {
    if a.dimensions() != b.dimensions() {
        return Err(CompareError::DimensionMismatch {
            first_width: a.width(),
            first_height: a.height(),
            second_width: b.width(),
            second_height: b.height(),
        });
    }

    let (width, height) = a.dimensions();
    let (w, h) = (width as usize, height as usize);
    if w < WINDOW || h < WINDOW {
        return Err(CompareError::TooSmall { width, height, window: WINDOW });
    }

    let x: Vec<f64> = a.as_raw().iter().map(|&v| v as f64).collect();
    let y: Vec<f64> = b.as_raw().iter().map(|&v| v as f64).collect();
    let xx: Vec<f64> = x.iter().map(|v| v * v).collect();
    let yy: Vec<f64> = y.iter().map(|v| v * v).collect();
    let xy: Vec<f64> = x.iter().zip(&y).map(|(p, q)| p * q).collect();

    let ux = uniform_filter(&x, w, h);
    let uy = uniform_filter(&y, w, h);
    let uxx = uniform_filter(&xx, w, h);
    let uyy = uniform_filter(&yy, w, h);
    let uxy = uniform_filter(&xy, w, h);

    let np = (WINDOW * WINDOW) as f64;
    let cov_norm = np / (np - 1.0);
    let c1 = (K1 * DATA_RANGE).powi(2);
    let c2 = (K2 * DATA_RANGE).powi(2);

    let mut values = Vec::with_capacity(w * h);
    for i in 0..w * h {
        let vx = cov_norm * (uxx[i] - ux[i] * ux[i]);
        let vy = cov_norm * (uyy[i] - uy[i] * uy[i]);
        let vxy = cov_norm * (uxy[i] - ux[i] * uy[i]);

        let numerator = (2.0 * ux[i] * uy[i] + c1) * (2.0 * vxy + c2);
        let denominator = (ux[i] * ux[i] + uy[i] * uy[i] + c1) * (vx + vy + c2);
        let s = numerator / denominator;

        if !s.is_finite() {
            return Err(CompareError::NonFinite {
                x: (i % w) as u32,
                y: (i / w) as u32,
            });
        }
        values.push(s);
    }

    // 外周（窓がはみ出す部分）を除いた平均
    let mut sum = 0.0;
    let mut count = 0usize;
    for row in RADIUS..h - RADIUS {
        for col in RADIUS..w - RADIUS {
            sum += values[row * w + col];
            count += 1;
        }
    }
    let score = sum / count as f64;

    Ok(SsimMap { width, height, values, score })
}

/// 反射境界（d c b a | a b c d | d c b a）でのインデックス
fn reflect(i: isize, n: usize) -> usize {
    let n = n as isize;
    let r = if i < 0 {
        -i - 1
    } else if i >= n {
        2 * n - i - 1
    } else {
        i
    };
    r as usize
}

/// 7x7一様窓の平均（横→縦の分離フィルタ）
fn uniform_filter(src: &[f64], w: usize, h: usize) -> Vec<f64> {
    let scale = 1.0 / WINDOW as f64;
    let radius = RADIUS as isize;

    let mut horizontal = vec![0.0; w * h];
    for row in 0..h {
        let line = &src[row * w..(row + 1) * w];
        for col in 0..w {
            let c = col as isize;
            let sum: f64 = (-radius..=radius).map(|k| line[reflect(c + k, w)]).sum();
            horizontal[row * w + col] = sum * scale;
        }
    }

    let mut out = vec![0.0; w * h];
    for row in 0..h {
        let r = row as isize;
        for col in 0..w {
            let sum: f64 = (-radius..=radius)
                .map(|k| horizontal[reflect(r + k, h) * w + col])
                .sum();
            out[row * w + col] = sum * scale;
        }
    }

    out
}
