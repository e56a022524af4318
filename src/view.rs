//! gerbvでの対話表示（基板全体 / 1レイヤー差分）

use crate::error::{GrbDiffError, Result};
use crate::export::ClassifiedInput;
use crate::render::RenderRequest;
use crate::scanner::Side;
use dialoguer::Select;
use grbdiff_common::{DiffTemplate, LayerRule, ViewTemplate};

/// 基板全体表示のリクエスト（テンプレートの重ね順、未割り当てレイヤーは省く）
pub fn view_request(input: &ClassifiedInput, template: &ViewTemplate) -> RenderRequest {
    template
        .layers
        .iter()
        .filter_map(|(color, role)| input.path(*role).map(|path| (path, *color)))
        .fold(RenderRequest::view(template.background), |request, (path, color)| {
            request.layer(path, color)
        })
}

/// 1レイヤー差分表示のリクエスト
///
/// どちらかの入力にレイヤーがなければエラー（gerbvは起動しない）。
pub fn diff_request(
    rules: &[LayerRule],
    a: &ClassifiedInput,
    b: &ClassifiedInput,
    role: usize,
    template: &DiffTemplate,
) -> Result<RenderRequest> {
    let layer = rules
        .get(role)
        .map(|r| r.name.to_string())
        .unwrap_or_else(|| role.to_string());
    let missing = |side: Side| GrbDiffError::LayerUnavailable {
        layer: layer.clone(),
        side: side.to_string(),
    };

    let path_a = a.path(role).ok_or_else(|| missing(Side::One))?;
    let path_b = b.path(role).ok_or_else(|| missing(Side::Two))?;

    Ok(RenderRequest::view(template.background)
        .layer(path_a, template.side1)
        .layer(path_b, template.side2))
}

/// 選択肢の表示用文字列（両方にあるレイヤーには印を付ける）
fn layer_items(rules: &[LayerRule], a: &ClassifiedInput, b: &ClassifiedInput) -> Vec<String> {
    rules
        .iter()
        .enumerate()
        .map(|(role, rule)| {
            let mark = match (a.classified.get(role), b.classified.get(role)) {
                (Some(_), Some(_)) => "✔",
                (Some(_), None) | (None, Some(_)) => "△",
                (None, None) => " ",
            };
            format!("{} {:>2}: {}", mark, role, rule.name)
        })
        .collect()
}

/// 差分表示するレイヤーを対話的に選ぶ
pub fn choose_layer(rules: &[LayerRule], a: &ClassifiedInput, b: &ClassifiedInput) -> Result<usize> {
    let items = layer_items(rules, a, b);
    let default = (0..rules.len())
        .find(|&role| a.classified.is_assigned(role) && b.classified.is_assigned(role))
        .unwrap_or(0);

    Select::new()
        .with_prompt("差分を表示するレイヤー（✔: 両方にあり）")
        .items(&items)
        .default(default)
        .interact()
        .map_err(|e| GrbDiffError::Prompt(e.to_string()))
}
