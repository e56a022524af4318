//! 画像比較モジュール
//!
//! 同じレイヤーを別々に描画した2枚の画像をSSIMで比較し、
//! 差分のある領域を3枚の画像（Gerber 1, Gerber 2, 合成）に枠で示す。
//!
//! ## 処理フロー
//! 1. 解像度チェック（不一致なら何もしない）
//! 2. 輝度画像に変換してSSIMマップを計算
//! 3. 非類似度を8bit化し、大津の方法で2値化
//! 4. 外側輪郭ごとの外接矩形を求め、3枚すべてに同じ座標で枠を描く

mod contours;
mod draw;
mod ssim;
mod threshold;

pub use draw::{OUTLINE_COLOR, OUTLINE_WIDTH};
pub use ssim::{structural_similarity, SsimMap};

use image::{GrayImage, Luma, RgbImage};
use serde::Serialize;
use thiserror::Error;

/// 差分領域の外接矩形
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// 比較パイプライン内部の失敗（メッセージはそのままレポートに載る）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("images have different dimensions ({first_width}x{first_height} vs {second_width}x{second_height})")]
    DimensionMismatch {
        first_width: u32,
        first_height: u32,
        second_width: u32,
        second_height: u32,
    },

    #[error("image is {width}x{height}, smaller than the {window}x{window} similarity window")]
    TooSmall { width: u32, height: u32, window: usize },

    #[error("similarity is not a finite number at ({x}, {y})")]
    NonFinite { x: u32, y: u32 },
}

/// レイヤーごとの比較状態
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ComparisonStatus {
    /// 比較成功（0..1、1が同一）
    Ok { score: f64 },
    /// Gerber 1 と 2 で画像サイズが違う
    ResolutionMismatch,
    /// どちらかの入力にレイヤーがない
    Unavailable,
    /// 比較処理中の失敗
    CompareFailed { message: String },
    /// gerbvでの画像出力に失敗
    RenderFailed { message: String },
}

impl ComparisonStatus {
    /// レポート1行分の文言
    pub fn summary(&self) -> String {
        match self {
            ComparisonStatus::Ok { score } => {
                format!("OK. Images are {}% equal.", format_percent(*score))
            }
            ComparisonStatus::ResolutionMismatch => {
                "Image 1 and 2 has different resolutions.".to_string()
            }
            ComparisonStatus::Unavailable => "not available in both inputs".to_string(),
            ComparisonStatus::CompareFailed { message } => {
                format!("Failed to compare images. Error: {}.", message)
            }
            ComparisonStatus::RenderFailed { message } => {
                format!("Failed to export images. Error: {}.", message)
            }
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            ComparisonStatus::Ok { score } => Some(*score),
            _ => None,
        }
    }
}

/// スコアを百分率（小数点以下2桁で丸め、最低1桁の小数）で表示
pub fn format_percent(score: f64) -> String {
    let percent = (score * 100.0 * 100.0).round() / 100.0;
    let text = percent.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

/// 比較結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageComparison {
    pub status: ComparisonStatus,
    pub bounding_boxes: Vec<BoundingBox>,
}

impl ImageComparison {
    fn without_boxes(status: ComparisonStatus) -> Self {
        Self {
            status,
            bounding_boxes: Vec::new(),
        }
    }
}

/// 2枚の画像を比較し、差分領域を3枚の画像に描き込む
///
/// 失敗時（解像度不一致を含む）は画像を一切変更しない。
pub fn compare(
    image_a: &mut RgbImage,
    image_b: &mut RgbImage,
    image_combined: &mut RgbImage,
) -> ImageComparison {
    if image_a.dimensions() != image_b.dimensions() {
        return ImageComparison::without_boxes(ComparisonStatus::ResolutionMismatch);
    }

    let (score, boxes) = match find_differences(image_a, image_b) {
        Ok(found) => found,
        Err(e) => {
            return ImageComparison::without_boxes(ComparisonStatus::CompareFailed {
                message: e.to_string(),
            })
        }
    };

    for bbox in &boxes {
        for image in [&mut *image_a, &mut *image_b, &mut *image_combined] {
            draw::draw_outline(image, bbox, OUTLINE_COLOR, OUTLINE_WIDTH);
        }
    }

    ImageComparison {
        status: ComparisonStatus::Ok { score },
        bounding_boxes: boxes,
    }
}

/// 輝度画像への変換（ITU-R BT.601 の重み 0.299 / 0.587 / 0.114）
fn luma601(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
        Luma([luma.round().clamp(0.0, 255.0) as u8])
    })
}

/// 類似度スコアと差分領域を求める（画像は変更しない）
pub fn find_differences(
    image_a: &RgbImage,
    image_b: &RgbImage,
) -> Result<(f64, Vec<BoundingBox>), CompareError> {
    let gray_a = luma601(image_a);
    let gray_b = luma601(image_b);

    let map = ssim::structural_similarity(&gray_a, &gray_b)?;
    let dissimilarity = threshold::dissimilarity_image(&map);
    let level = threshold::otsu_level(&dissimilarity);
    let mask = threshold::binarize(&dissimilarity, level);
    let boxes = contours::external_bounding_boxes(&mask);

    Ok((map.score.clamp(0.0, 1.0), boxes))
}
