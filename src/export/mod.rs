//! PNG出力・比較の実行
//!
//! レイヤーごとに gerbv で3枚（Gerber 1, Gerber 2, 合成）のPNGを出力し、
//! 比較して差分に枠を描き込み、結果をレポートにまとめる。

mod report;

pub use report::{Report, RoleResult, REPORT_FILE_NAME, REPORT_HEADER};

use crate::compare::{self, ComparisonStatus};
use crate::error::{GrbDiffError, Result};
use crate::render::{RenderRequest, Renderer};
use crate::scanner::GerberInput;
use grbdiff_common::{classify, CaseSensitivity, ClassifiedSet, Color, LayerRule, PngTemplate};
use image::RgbImage;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 出力設定（実行中は変更しない）
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub export_dir: PathBuf,
    pub dpi: u32,
    pub template: &'static PngTemplate,
}

/// 判別済みの入力（片側分）
#[derive(Debug, Clone)]
pub struct ClassifiedInput {
    pub dir: PathBuf,
    pub classified: ClassifiedSet,
}

impl ClassifiedInput {
    pub fn new(dir: impl Into<PathBuf>, classified: ClassifiedSet) -> Self {
        Self {
            dir: dir.into(),
            classified,
        }
    }

    /// 入力フォルダのファイルをカタログで判別する
    pub fn from_input(input: &GerberInput, rules: &[LayerRule], case: CaseSensitivity) -> Self {
        Self::new(&input.dir, classify(rules, input.filenames.as_slice(), case))
    }

    /// レイヤーに割り当てられたファイルのフルパス
    pub fn path(&self, role: usize) -> Option<PathBuf> {
        self.classified.get(role).map(|name| self.dir.join(name))
    }

    /// 外形ファイル（描画中のレイヤー自身が外形なら重ねない）
    fn outline_for(&self, role: usize) -> Option<PathBuf> {
        if role + 1 == self.classified.len() {
            return None;
        }
        self.classified.outline().map(|name| self.dir.join(name))
    }
}

/// レイヤー1つ分の出力ファイル名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub side1: PathBuf,
    pub side2: PathBuf,
    pub combined: PathBuf,
}

impl OutputFiles {
    pub fn for_rule(dir: &Path, rule: &LayerRule) -> Self {
        let stem = rule.file_stem();
        Self {
            side1: dir.join(format!("{}-1.png", stem)),
            side2: dir.join(format!("{}-2.png", stem)),
            combined: dir.join(format!("{}-combined.png", stem)),
        }
    }
}

/// 1レイヤー分の描画リクエスト（Gerber 1, Gerber 2, 合成の順）
pub fn render_requests(
    role: usize,
    a: &ClassifiedInput,
    b: &ClassifiedInput,
    settings: &ExportSettings,
    files: &OutputFiles,
) -> Option<[RenderRequest; 3]> {
    let layer_a = a.path(role)?;
    let layer_b = b.path(role)?;
    let outline_a = a.outline_for(role);
    let outline_b = b.outline_for(role);
    let template = settings.template;

    let single = |layer: &PathBuf, outline: &Option<PathBuf>, color: Color, output: &PathBuf| {
        let mut request = RenderRequest::export(template.background, settings.dpi, output)
            .layer(layer, color);
        if let Some(outline) = outline {
            request = request.layer(outline, color);
        }
        request
    };

    let side1 = single(&layer_a, &outline_a, template.side1, &files.side1);
    let side2 = single(&layer_b, &outline_b, template.side2, &files.side2);

    let mut combined = RenderRequest::export(template.background, settings.dpi, &files.combined)
        .layer(&layer_a, template.combined1)
        .layer(&layer_b, template.combined2);
    if let Some(outline) = &outline_a {
        combined = combined.layer(outline, template.combined1);
    }
    if let Some(outline) = &outline_b {
        combined = combined.layer(outline, template.combined2);
    }

    Some([side1, side2, combined])
}

/// 全レイヤーを出力・比較してレポートを返す
///
/// どちらかの入力にないレイヤーは描画しない。
/// レイヤー単位の失敗はレポートに記録して次へ進む。
pub fn run_export(
    rules: &[LayerRule],
    a: &ClassifiedInput,
    b: &ClassifiedInput,
    settings: &ExportSettings,
    renderer: &dyn Renderer,
    progress: &ProgressBar,
) -> Result<Report> {
    std::fs::create_dir_all(&settings.export_dir)?;
    debug!(
        "出力先: {} ({} dpi, {})",
        settings.export_dir.display(),
        settings.dpi,
        settings.template.name
    );

    progress.set_length(rules.len() as u64);
    let mut report = Report::default();

    for (role, rule) in rules.iter().enumerate() {
        progress.set_message(rule.name);
        let files = OutputFiles::for_rule(&settings.export_dir, rule);

        let result = match render_requests(role, a, b, settings, &files) {
            None => {
                debug!("{}: どちらかの入力にありません", rule.name);
                RoleResult::new(role, rule.name, ComparisonStatus::Unavailable)
            }
            Some(requests) => {
                progress.set_message(format!("{} (gerbv)", rule.name));
                match render_all(renderer, &requests) {
                    Err(message) => {
                        warn!("{}: 出力失敗: {}", rule.name, message);
                        RoleResult::new(role, rule.name, ComparisonStatus::RenderFailed { message })
                    }
                    Ok(()) => {
                        progress.set_message(format!("{} (比較)", rule.name));
                        compare_files(role, rule, &files)
                    }
                }
            }
        };

        debug!("{}", result.line());
        report.push(result);
        progress.inc(1);
    }

    Ok(report)
}

fn render_all(renderer: &dyn Renderer, requests: &[RenderRequest]) -> std::result::Result<(), String> {
    for request in requests {
        renderer.render(request).map_err(|e| match e {
            GrbDiffError::Render(message) => message,
            other => other.to_string(),
        })?;
    }
    Ok(())
}

fn load_rgb(path: &Path) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// 出力済みの3枚を比較し、枠を描いた画像で上書きする
fn compare_files(role: usize, rule: &LayerRule, files: &OutputFiles) -> RoleResult {
    let loaded = load_rgb(&files.side1).and_then(|a| {
        let b = load_rgb(&files.side2)?;
        let combined = load_rgb(&files.combined)?;
        Ok((a, b, combined))
    });
    let (mut image_a, mut image_b, mut image_combined) = match loaded {
        Ok(images) => images,
        Err(e) => {
            let message = match e {
                GrbDiffError::Image(inner) => inner.to_string(),
                other => other.to_string(),
            };
            return RoleResult::new(role, rule.name, ComparisonStatus::CompareFailed { message });
        }
    };

    let comparison = compare::compare(&mut image_a, &mut image_b, &mut image_combined);

    if !comparison.bounding_boxes.is_empty() {
        let saved = image_a
            .save(&files.side1)
            .and_then(|_| image_b.save(&files.side2))
            .and_then(|_| image_combined.save(&files.combined));
        if let Err(e) = saved {
            return RoleResult::new(
                role,
                rule.name,
                ComparisonStatus::CompareFailed { message: e.to_string() },
            );
        }
        debug!("{}: 差分 {}箇所", rule.name, comparison.bounding_boxes.len());
    }

    RoleResult {
        role_index: role,
        role_name: rule.name.to_string(),
        status: comparison.status,
        bounding_boxes: comparison.bounding_boxes,
    }
}
