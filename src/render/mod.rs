//! gerbv描画リクエスト
//!
//! 描画内容は `RenderRequest` で表し、gerbvの引数列への変換は
//! ここ（境界）だけで行う。

mod gerbv;

pub use gerbv::{locate_gerbv, GerbvRenderer};

use crate::error::Result;
use grbdiff_common::Color;
use std::path::PathBuf;

/// 描画する1レイヤー（ファイルと前景色）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSpec {
    pub path: PathBuf,
    pub color: Color,
}

/// PNG出力の指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpec {
    pub dpi: u32,
    pub output: PathBuf,
}

/// gerbvへの描画リクエスト
///
/// `layers` は先頭ほど手前に描かれる。
/// `export` が `None` なら対話表示（gerbvを起動したまま戻る）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub background: Color,
    pub layers: Vec<LayerSpec>,
    pub export: Option<ExportSpec>,
    pub antialias: bool,
}

impl RenderRequest {
    pub fn view(background: Color) -> Self {
        Self {
            background,
            layers: Vec::new(),
            export: None,
            antialias: false,
        }
    }

    pub fn export(background: Color, dpi: u32, output: impl Into<PathBuf>) -> Self {
        Self {
            background,
            layers: Vec::new(),
            export: Some(ExportSpec {
                dpi,
                output: output.into(),
            }),
            antialias: true,
        }
    }

    pub fn layer(mut self, path: impl Into<PathBuf>, color: Color) -> Self {
        self.layers.push(LayerSpec {
            path: path.into(),
            color,
        });
        self
    }

    pub fn is_export(&self) -> bool {
        self.export.is_some()
    }

    /// gerbvのコマンドライン引数に変換
    ///
    /// `--foreground` はファイルの並び順に対応して割り当てられる。
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.antialias {
            args.push("-a".to_string());
        }
        args.push(format!("--background={}", self.background));
        for layer in &self.layers {
            args.push(format!("--foreground={}", layer.color));
        }
        for layer in &self.layers {
            args.push(layer.path.display().to_string());
        }
        if let Some(export) = &self.export {
            args.push("--export=png".to_string());
            args.push(format!("--dpi={}", export.dpi));
            args.push(format!("-o{}", export.output.display()));
        }

        args
    }
}

/// 描画処理の差し替え口（テストでは偽物を使う）
pub trait Renderer {
    /// 出力モードでは完了まで待ち、出力ファイルが書かれたことを保証する。
    /// 表示モードでは起動だけして戻る。
    fn render(&self, request: &RenderRequest) -> Result<()>;
}
