//! レイヤー定義カタログ
//!
//! 認識対象のレイヤー（役割）ごとに、照合パターンの配列と除外パターンを1つ持つ。
//! 判別は先頭レイヤーの先頭パターンから順に行い、一度レイヤーに割り当てられた
//! ファイルは後続レイヤーのパターンに一致しても再割り当てされない。
//! 銅箔レイヤー間では同じ拡張子が複数回現れるため、並び順そのものが意味を持つ。
//!
//! 最後のレイヤーは必ず基板外形とする（PNG出力時に全レイヤーへ重ねるため）。
//!
//! 拡張子の出典:
//! <https://www.pcbway.com/helpcenter/technical_support/Gerber_File_Extention_from_Different_Software.html>

use crate::error::{Error, Result};
use crate::glob::check_pattern;
use serde::Serialize;

/// レイヤー判別ルール
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LayerRule {
    /// レイヤー名
    pub name: &'static str,
    /// 照合パターン（優先順）
    pub patterns: &'static [&'static str],
    /// 除外パターン（空文字列は除外なし）
    pub exclusion: &'static str,
}

impl LayerRule {
    /// 出力ファイル名などに使うスペースなしの名前
    pub fn file_stem(&self) -> String {
        self.name.replace(' ', "_")
    }
}

pub const TOP_SOLDER_PASTE: usize = 0;
pub const TOP_SILK_SCREEN: usize = 1;
pub const TOP_SOLDER_MASK: usize = 2;
pub const COPPER_L1: usize = 3;
pub const COPPER_L2: usize = 4;
pub const COPPER_L3: usize = 5;
pub const COPPER_L4: usize = 6;
pub const COPPER_L5: usize = 7;
pub const COPPER_L6: usize = 8;
pub const BOTTOM_SOLDER_MASK: usize = 9;
pub const BOTTOM_SILK_SCREEN: usize = 10;
pub const BOTTOM_SOLDER_PASTE: usize = 11;
pub const PLATED_DRILL: usize = 12;
pub const NON_PLATED_DRILL: usize = 13;
pub const ECO1: usize = 14;
pub const OUTLINE: usize = 15;

/// 標準カタログ（16レイヤー）
pub static LAYER_RULES: &[LayerRule] = &[
    LayerRule {
        name: "Top Solder Paste",
        patterns: &["*.gtp", "*-F?Paste.*", "*.crc", "*.tsp", "*.stp", "*.toppaste.gbr", "*.creammask_top.gbr", "*.tcream.ger"],
        exclusion: "",
    },
    LayerRule {
        name: "Top Silk Screen",
        patterns: &["*.gto", "*-F?SilkS.*", "*.plc", "*.tsk", "*.sst", "*.silkscreen_top.gbr", "*.topsilk.gbr", "*.topsilkscreen.ger", "to"],
        exclusion: "",
    },
    LayerRule {
        name: "Top Solder Mask",
        patterns: &["*.gts", "*-F?Mask.*", "*.stc", "*.tsm", "*.smt", "*.topmask.gbr", "*.soldermask_top.gbr", "*.topsoldermask.ger", "ts"],
        exclusion: "",
    },
    LayerRule {
        name: "Copper Layer L1",
        patterns: &["*.gtl", "*-L1.*", "*.g1", "*-F?Cu*", "*.cmp", "*.top", "*.top.gbr", "*.copper_l1.gbr", "*.toplayer.ger", "tl"],
        exclusion: "*.pos",
    },
    LayerRule {
        name: "Copper Layer L2",
        patterns: &["*.g1", "*.g2", "*-L2.*", "*-In1?Cu*", "*-Inner1?Cu*", "*.ly1", "*.ly2", "*.in1", "*.internalplane1.ger", "*.gbl", "*-B?Cu*", "*.sol", "*.bot", "*.copper_l2.gbr", "*.bottomlayer.ger", "l2", "bl"],
        exclusion: "*.pos",
    },
    LayerRule {
        name: "Copper Layer L3",
        patterns: &["*.g2", "*.g3", "*-L3.*", "*-In2?Cu*", "*-Inner2?Cu*", "*.ly2", "*.ly3", "*.in2", "*.internalplane2.ger", "*.gbl", "*-B?Cu*", "*.sol", "*.bot", "*.copper_l3.gbr", "*.bottomlayer.ger", "l3", "bl"],
        exclusion: "*.pos",
    },
    LayerRule {
        name: "Copper Layer L4",
        patterns: &["*.g3", "*.g4", "*-L4.*", "*-In3?Cu*", "*-Inner3?Cu*", "*.ly3", "*.ly4", "*.in3", "*.internalplane3.ger", "*.gbl", "*-B?Cu*", "*.sol", "*.bot", "*.copper_l4.gbr", "*.bottomlayer.ger", "l4", "bl"],
        exclusion: "*.pos",
    },
    LayerRule {
        name: "Copper Layer L5",
        patterns: &["*.g4", "*.g5", "*-L5.*", "*-In4?Cu*", "*-Inner4?Cu*", "*.ly4", "*.ly5", "*.in4", "*.internalplane4.ger", "*.gbl", "*-B?Cu*", "*.sol", "*.bot", "*.copper_l5.gbr", "*.bottomlayer.ger", "l5", "bl"],
        exclusion: "*.pos",
    },
    LayerRule {
        name: "Copper Layer L6",
        patterns: &["*.g5", "*.g6", "*-L6.*", "*.gbl", "*-B?Cu*", "*.sol", "*.bot", "*.bottom.gbr", "*.copper_l6.gbr", "*.bottomlayer.ger", "bl"],
        exclusion: "*.pos",
    },
    LayerRule {
        name: "Bottom Solder Mask",
        patterns: &["*.gbs", "*-B?Mask.*", "*.sts", "*.bsm", "*.smb", "*.bottommask.gbr", "*.soldermask_bottom.gbr", "*.bottomsoldermask.ger", "bs"],
        exclusion: "",
    },
    LayerRule {
        name: "Bottom Silk Screen",
        patterns: &["*.gbo", "*-B?SilkS.*", "*.pls", "*.bsk", "*.ssb", "*.silkscreen_bottom.gbr", "*.bottomsilk.gbr", "*.bottomsilkscreen.ger"],
        exclusion: "",
    },
    LayerRule {
        name: "Bottom Solder Paste",
        patterns: &["*.gbp", "*-B?Paste.*", "*.crs", "*.bsp", "*.spb", "*.bottompaste.gbr", "*.creammask_bottom.gbr", "*.bcream.ger"],
        exclusion: "",
    },
    LayerRule {
        name: "Plated Drill File",
        patterns: &["*-PTH.drl", "*.drl", "*.txt", "*.xln", "*.exc", "*.drd", "*.tap", "*.fab.gbr", "*.plated-drill.cnc", "drl"],
        exclusion: "*NPTH*",
    },
    LayerRule {
        name: "Non-Plated Drill File",
        patterns: &["*NPTH.drl", "*.holes_npth.xln"],
        exclusion: "",
    },
    LayerRule {
        name: "Eco1 Layer",
        patterns: &["*-User?Eco1.*", "*-Eco1?User.*", "vcut"],
        exclusion: "",
    },
    LayerRule {
        name: "Outline of PCB",
        patterns: &["*.gm1", "*-Edge?Cuts.*", "*.gko", "*.gm3", "*.dim", "*.gml", "*.fab", "*.out.gbr", "*.board_outline.gbr", "*.boardout.ger", "ko"],
        exclusion: "",
    },
];

/// カタログの検証（起動時に呼ぶ）
///
/// パターンの不備はここで検出し、判別処理中には発生させない。
pub fn validate_catalogue(rules: &[LayerRule]) -> Result<()> {
    if rules.is_empty() {
        return Err(Error::Catalogue("catalogue has no layers".into()));
    }

    for (index, rule) in rules.iter().enumerate() {
        if rule.name.trim().is_empty() {
            return Err(Error::Catalogue(format!("layer #{} has no name", index)));
        }
        if rules[..index].iter().any(|r| r.name == rule.name) {
            return Err(Error::Catalogue(format!("duplicate layer name '{}'", rule.name)));
        }
        if rule.patterns.is_empty() {
            return Err(Error::Catalogue(format!("layer '{}' has no patterns", rule.name)));
        }

        let exclusion = (!rule.exclusion.is_empty()).then_some(rule.exclusion);
        for pattern in rule.patterns.iter().copied().chain(exclusion) {
            if let Some(reason) = check_pattern(pattern) {
                return Err(Error::Pattern {
                    layer: rule.name.to_string(),
                    pattern: pattern.to_string(),
                    reason: reason.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// 基板外形レイヤーのインデックス（慣例として最後）
pub fn outline_index(rules: &[LayerRule]) -> usize {
    rules.len().saturating_sub(1)
}

/// 名前またはインデックス文字列からレイヤーを特定
///
/// 名前は大文字小文字・空白/アンダースコアの違いを無視して比較する。
pub fn find_layer(rules: &[LayerRule], query: &str) -> Result<usize> {
    let query = query.trim();
    if let Ok(index) = query.parse::<usize>() {
        if index < rules.len() {
            return Ok(index);
        }
        return Err(Error::UnknownLayer(query.to_string()));
    }

    let normalize = |s: &str| s.to_lowercase().replace('_', " ");
    let wanted = normalize(query);
    rules
        .iter()
        .position(|r| normalize(r.name) == wanted)
        .ok_or_else(|| Error::UnknownLayer(query.to_string()))
}
