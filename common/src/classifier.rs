//! ファイル判別モジュール
//!
//! フラットなファイル名集合をレイヤーカタログに照らして、
//! レイヤー（役割）→ファイル名の対応を決める。I/Oは行わない。

use crate::glob::{matches, CaseSensitivity};
use crate::layers::LayerRule;
use serde::Serialize;
use std::collections::BTreeSet;

/// 判別結果（レイヤーインデックス → ファイル名）
///
/// 1つのファイル名が複数のレイヤーに現れることはない。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ClassifiedSet {
    slots: Vec<Option<String>>,
}

impl ClassifiedSet {
    /// 全レイヤー未割り当ての結果を作成
    pub fn unassigned(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// レイヤーに割り当てられたファイル名
    pub fn get(&self, role: usize) -> Option<&str> {
        self.slots.get(role).and_then(|s| s.as_deref())
    }

    pub fn is_assigned(&self, role: usize) -> bool {
        self.get(role).is_some()
    }

    /// 割り当て済みの (レイヤーインデックス, ファイル名) を順に返す
    pub fn assigned(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_deref().map(|name| (i, name)))
    }

    pub fn assigned_count(&self) -> usize {
        self.assigned().count()
    }

    /// 基板外形（最後のレイヤー）のファイル名
    pub fn outline(&self) -> Option<&str> {
        self.slots.last().and_then(|s| s.as_deref())
    }

    /// どのレイヤーにも割り当てられなかったファイル名（名前順）
    pub fn unclaimed<'a>(&self, filenames: &'a [String]) -> Vec<&'a str> {
        let claimed: BTreeSet<&str> = self.assigned().map(|(_, name)| name).collect();
        let mut rest: Vec<&str> = filenames
            .iter()
            .map(String::as_str)
            .filter(|f| !claimed.contains(f))
            .collect();
        rest.sort_unstable();
        rest.dedup();
        rest
    }

    fn assign(&mut self, role: usize, filename: String) {
        self.slots[role] = Some(filename);
    }
}

/// ファイル名集合をレイヤーに振り分ける
///
/// 「先のレイヤー・先のパターン・名前順で先のファイル」が優先される。
/// 入力の列挙順は結果に影響しない（内部で名前順に並べ替える）。
pub fn classify<S: AsRef<str>>(
    rules: &[LayerRule],
    filenames: &[S],
    case: CaseSensitivity,
) -> ClassifiedSet {
    let mut remaining: BTreeSet<&str> = filenames.iter().map(|f| f.as_ref()).collect();
    let mut result = ClassifiedSet::unassigned(rules.len());

    for (role, rule) in rules.iter().enumerate() {
        for pattern in rule.patterns {
            // BTreeSetは名前順なので最初に見つかった候補が最小
            let candidate = remaining.iter().copied().find(|name| {
                matches(name, pattern, case) && !matches(name, rule.exclusion, case)
            });

            if let Some(name) = candidate {
                remaining.remove(name);
                result.assign(role, name.to_string());
                break;
            }
        }
    }

    result
}
