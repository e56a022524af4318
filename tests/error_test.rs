//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use grbdiff::config::Config;
use grbdiff::error::GrbDiffError;
use grbdiff::render::GerbvRenderer;
use grbdiff::scanner::{resolve_input, Side};
use grbdiff_common::{find_layer, LAYER_RULES};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 存在しない入力
#[test]
fn test_missing_input() {
    let result = resolve_input(Path::new("/nonexistent/path/12345"), Side::One, false);
    assert!(matches!(result, Err(GrbDiffError::InputNotFound(_))));
}

/// 壊れたZIP
#[test]
fn test_broken_zip_input() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("broken.zip");
    std::fs::write(&archive, b"PK but not really").unwrap();

    let result = resolve_input(&archive, Side::One, false);
    assert!(matches!(result, Err(GrbDiffError::Archive(_))));
}

/// gerbvが見つからない場合は描画器を作らない
#[test]
fn test_missing_renderer() {
    let err = GerbvRenderer::new(Some(Path::new("/nonexistent/gerbv"))).unwrap_err();
    assert!(matches!(err, GrbDiffError::RendererNotFound(_)));
    assert!(err.to_string().contains("--set-gerbv"));
}

/// 出力先未設定
#[test]
fn test_missing_export_dir() {
    let config = Config::default();
    let err = config.export_settings(None, None, None).unwrap_err();
    assert!(matches!(err, GrbDiffError::MissingExportDir));
}

/// 壊れた設定ファイル
#[test]
fn test_invalid_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(GrbDiffError::JsonParse(_))));
}

/// 存在しないレイヤー名
#[test]
fn test_unknown_layer() {
    let err: GrbDiffError = find_layer(LAYER_RULES, "Copper Layer L9").unwrap_err().into();
    assert!(matches!(err, GrbDiffError::Common(_)));
    assert!(err.to_string().contains("Copper Layer L9"));
}

/// IOエラーの変換
#[test]
fn test_io_error_conversion() {
    let io = std::fs::read_to_string(PathBuf::from("/nonexistent/report.txt")).unwrap_err();
    let err: GrbDiffError = io.into();
    assert!(err.to_string().starts_with("IOエラー"));
}
