//! 比較結果レポート

use crate::compare::{BoundingBox, ComparisonStatus};
use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const REPORT_HEADER: &str = "Png Export Result:";
pub const REPORT_FILE_NAME: &str = "report.txt";

/// 1レイヤー分の結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResult {
    pub role_index: usize,
    pub role_name: String,
    pub status: ComparisonStatus,
    pub bounding_boxes: Vec<BoundingBox>,
}

impl RoleResult {
    pub fn new(role_index: usize, role_name: &str, status: ComparisonStatus) -> Self {
        Self {
            role_index,
            role_name: role_name.to_string(),
            status,
            bounding_boxes: Vec::new(),
        }
    }

    /// `"<レイヤー名>: <状態>"`
    pub fn line(&self) -> String {
        format!("{}: {}", self.role_name, self.status.summary())
    }
}

/// 出力実行1回分のレポート（レイヤー順）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub results: Vec<RoleResult>,
}

impl Report {
    pub fn push(&mut self, result: RoleResult) {
        self.results.push(result);
    }

    /// 比較できたレイヤー数
    pub fn compared_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status.score().is_some())
            .count()
    }

    /// 差分が見つかったレイヤー
    pub fn changed(&self) -> impl Iterator<Item = &RoleResult> {
        self.results.iter().filter(|r| !r.bounding_boxes.is_empty())
    }

    pub fn to_text(&self) -> String {
        std::iter::once(REPORT_HEADER.to_string())
            .chain(self.results.iter().map(RoleResult::line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 出力先フォルダに `report.txt` を書き出す
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(REPORT_FILE_NAME);
        let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let content = format!("grbdiff {}\n\n{}\n", generated, self.to_text());
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        let mut report = Report::default();
        report.push(RoleResult::new(0, "Top Solder Paste", ComparisonStatus::Unavailable));
        let mut copper = RoleResult::new(3, "Copper Layer L1", ComparisonStatus::Ok { score: 0.987654 });
        copper.bounding_boxes.push(BoundingBox { x: 1, y: 2, width: 3, height: 4 });
        report.push(copper);
        report.push(RoleResult::new(15, "Outline of PCB", ComparisonStatus::ResolutionMismatch));
        report
    }

    #[test]
    fn test_report_text() {
        assert_eq!(
            sample_report().to_text(),
            "Png Export Result:\n\
             Top Solder Paste: not available in both inputs\n\
             Copper Layer L1: OK. Images are 98.77% equal.\n\
             Outline of PCB: Image 1 and 2 has different resolutions."
        );
    }

    #[test]
    fn test_empty_report_is_header_only() {
        assert_eq!(Report::default().to_text(), REPORT_HEADER);
    }

    #[test]
    fn test_counts() {
        let report = sample_report();
        assert_eq!(report.compared_count(), 1);
        assert_eq!(report.changed().count(), 1);
    }

    #[test]
    fn test_save_writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample_report().save(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("report.txt"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("grbdiff "));
        assert!(content.contains("Png Export Result:\nTop Solder Paste: not available in both inputs\n"));
    }
}
