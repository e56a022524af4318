//! 入力解決の統合テスト
//!
//! ZIP・フォルダ・ファイル指定から判別までを通しで確認

use grbdiff::export::ClassifiedInput;
use grbdiff::scanner::{extraction_dir, resolve_input, Side};
use grbdiff_common::layers::{COPPER_L1, COPPER_L2, NON_PLATED_DRILL, OUTLINE, PLATED_DRILL};
use grbdiff_common::{CaseSensitivity, LAYER_RULES};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn touch(dir: &std::path::Path, names: &[&str]) {
    for name in names {
        File::create(dir.join(name)).unwrap();
    }
}

/// KiCad出力のZIPを展開して判別する
#[test]
fn test_zip_input_is_extracted_and_classified() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("kicad.zip");
    {
        let mut zip = ZipWriter::new(File::create(&archive).unwrap());
        let options = SimpleFileOptions::default();
        for name in ["proj-F_Cu.gbr", "proj-B_Cu.gbr", "proj-Edge_Cuts.gm1", "proj-PTH.drl", "proj-NPTH.drl"] {
            zip.start_file(name, options).unwrap();
            zip.write_all(b"G04 test*").unwrap();
        }
        zip.finish().unwrap();
    }

    let input = resolve_input(&archive, Side::Two, false).unwrap();
    assert_eq!(input.dir, extraction_dir(Side::Two));
    assert_eq!(input.filenames.len(), 5);
    assert!(input.path_of("proj-F_Cu.gbr").is_file());

    let classified = ClassifiedInput::from_input(&input, LAYER_RULES, CaseSensitivity::Insensitive);
    assert_eq!(classified.classified.get(COPPER_L1), Some("proj-F_Cu.gbr"));
    assert_eq!(classified.classified.get(COPPER_L2), Some("proj-B_Cu.gbr"));
    assert_eq!(classified.classified.get(OUTLINE), Some("proj-Edge_Cuts.gm1"));
    assert_eq!(classified.classified.get(PLATED_DRILL), Some("proj-PTH.drl"));
    assert_eq!(classified.classified.get(NON_PLATED_DRILL), Some("proj-NPTH.drl"));
}

/// フォルダ指定（シナリオ: 典型的な4ファイル）
#[test]
fn test_folder_input_classification() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["board.gtl", "board.gbl", "board.gko", "board.drl", "readme.md"]);
    fs::create_dir(dir.path().join("old")).unwrap();
    touch(&dir.path().join("old"), &["board.gts"]);

    let input = resolve_input(dir.path(), Side::One, false).unwrap();
    assert_eq!(input.filenames.len(), 5);

    let classified = ClassifiedInput::from_input(&input, LAYER_RULES, CaseSensitivity::Insensitive);
    assert_eq!(classified.classified.assigned_count(), 4);
    assert_eq!(classified.path(COPPER_L1), Some(dir.path().join("board.gtl")));
    assert_eq!(classified.classified.unclaimed(&input.filenames), vec!["readme.md"]);
}

/// 大文字の拡張子は区別する設定では判別されない
#[test]
fn test_case_sensitive_classification() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["BOARD.GTL"]);

    let input = resolve_input(dir.path(), Side::One, false).unwrap();
    let insensitive = ClassifiedInput::from_input(&input, LAYER_RULES, CaseSensitivity::Insensitive);
    let sensitive = ClassifiedInput::from_input(&input, LAYER_RULES, CaseSensitivity::Sensitive);

    assert_eq!(insensitive.classified.get(COPPER_L1), Some("BOARD.GTL"));
    assert_eq!(sensitive.classified.assigned_count(), 0);
}
