//! gerbv用カラーテンプレート
//!
//! - 表示テンプレート: 基板全体をgerbvで表示するときの色と重ね順
//! - PNG出力テンプレート: 比較用PNGを出力するときの色
//! - 差分テンプレート: 1レイヤーの差分をgerbvで表示するときの色

use crate::color::Color;
use crate::layers::*;
use serde::Serialize;

/// 基板全体表示用テンプレート
///
/// `layers` の並び順がgerbvでの重ね順になる（先頭が最前面）。
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ViewTemplate {
    pub name: &'static str,
    pub background: Color,
    /// (色, レイヤーインデックス)
    pub layers: &'static [(Color, usize)],
}

/// PNG出力用テンプレート
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PngTemplate {
    pub name: &'static str,
    pub background: Color,
    /// Gerber 1 単体の色
    pub side1: Color,
    /// Gerber 2 単体の色
    pub side2: Color,
    /// 合成画像でのGerber 1の色
    pub combined1: Color,
    /// 合成画像でのGerber 2の色
    pub combined2: Color,
}

/// 1レイヤー差分表示用テンプレート
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DiffTemplate {
    pub name: &'static str,
    pub background: Color,
    pub side1: Color,
    pub side2: Color,
}

pub static VIEW_TEMPLATES: &[ViewTemplate] = &[
    ViewTemplate {
        name: "Green Copper Layers on Black background",
        background: Color::hex("#000000"),
        layers: &[
            (Color::hex("#CAFD34FF"), OUTLINE),
            (Color::hex("#00C3C3B1"), ECO1),
            (Color::hex("#FFFF00C8"), PLATED_DRILL),
            (Color::hex("#FF00E4C8"), NON_PLATED_DRILL),
            (Color::hex("#FCFCFCB1"), TOP_SILK_SCREEN),
            (Color::hex("#B6000B64"), TOP_SOLDER_PASTE),
            (Color::hex("#00027EA6"), TOP_SOLDER_MASK),
            (Color::hex("#FCFCFCB1"), BOTTOM_SILK_SCREEN),
            (Color::hex("#B6000B64"), BOTTOM_SOLDER_PASTE),
            (Color::hex("#00027EA6"), BOTTOM_SOLDER_MASK),
            (Color::hex("#00690BAF"), COPPER_L1),
            (Color::hex("#00690BAF"), COPPER_L2),
            (Color::hex("#00690BAF"), COPPER_L3),
            (Color::hex("#00690BAF"), COPPER_L4),
            (Color::hex("#00690BAF"), COPPER_L5),
            (Color::hex("#00690BAF"), COPPER_L6),
        ],
    },
    ViewTemplate {
        name: "Pastel Colors on Black background",
        background: Color::hex("#000000"),
        layers: &[
            (Color::hex("#CAFD34FF"), OUTLINE),
            (Color::hex("#00C3C3B1"), ECO1),
            (Color::hex("#F1FFB7B1"), PLATED_DRILL),
            (Color::hex("#FFCAE1B1"), NON_PLATED_DRILL),
            (Color::hex("#FCFCFCB1"), TOP_SILK_SCREEN),
            (Color::hex("#B6000B64"), TOP_SOLDER_PASTE),
            (Color::hex("#00027EA6"), TOP_SOLDER_MASK),
            (Color::hex("#FCFCFCB1"), BOTTOM_SILK_SCREEN),
            (Color::hex("#B6000B64"), BOTTOM_SOLDER_PASTE),
            (Color::hex("#00027EA6"), BOTTOM_SOLDER_MASK),
            (Color::hex("#FF7F73B1"), COPPER_L1),
            (Color::hex("#C100E0B1"), COPPER_L2),
            (Color::hex("#75F267B1"), COPPER_L3),
            (Color::hex("#00C3C3B1"), COPPER_L4),
            (Color::hex("#D11B68B1"), COPPER_L5),
            (Color::hex("#FFC533B1"), COPPER_L6),
        ],
    },
];

pub static PNG_TEMPLATES: &[PngTemplate] = &[
    PngTemplate {
        name: "Green Copper Layers on White background",
        background: Color::hex("#FFFFFF"),
        side1: Color::hex("#00690B"),
        side2: Color::hex("#00690B"),
        combined1: Color::hex("#00FF0880"),
        combined2: Color::hex("#0000A7FF"),
    },
    PngTemplate {
        name: "Green and Blue Copper Layers on White background",
        background: Color::hex("#FFFFFF"),
        side1: Color::hex("#00690B"),
        side2: Color::hex("#000080"),
        combined1: Color::hex("#00FF0880"),
        combined2: Color::hex("#0000A7FF"),
    },
];

pub static DIFF_TEMPLATES: &[DiffTemplate] = &[
    DiffTemplate {
        name: "Red and Blue on Black",
        background: Color::hex("#000000"),
        side1: Color::hex("#FF000055"),
        side2: Color::hex("#0000FF"),
    },
    DiffTemplate {
        name: "Yellow and Blue on White",
        background: Color::hex("#FFFFFF"),
        side1: Color::hex("#FFFF0064"),
        side2: Color::hex("#0000FF64"),
    },
];

/// インデックスでテンプレートを取得（範囲外は先頭）
pub fn pick<T>(templates: &'static [T], index: usize) -> &'static T {
    templates.get(index).unwrap_or(&templates[0])
}
