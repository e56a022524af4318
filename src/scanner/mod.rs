mod archive;

pub use archive::extract_zip;

use crate::error::{GrbDiffError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// 比較する入力の区別（Gerber 1 / Gerber 2）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn number(self) -> u8 {
        match self {
            Side::One => 1,
            Side::Two => 2,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gerber {}", self.number())
    }
}

/// 解決済みの入力（ファイルを探すフォルダと、そのファイル名一覧）
#[derive(Debug, Clone)]
pub struct GerberInput {
    /// ユーザーが指定したパス
    pub source: PathBuf,
    /// ファイルが置かれているフォルダ（ZIPなら展開先）
    pub dir: PathBuf,
    /// フォルダ直下のファイル名（名前順）
    pub filenames: Vec<String>,
}

impl GerberInput {
    /// ファイル名からフルパスを得る
    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

/// ZIP展開先（入力ごとに固定）
pub fn extraction_dir(side: Side) -> PathBuf {
    std::env::temp_dir().join(format!("grbdiff-zip{}", side.number()))
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

/// 入力パスを解決する
///
/// - `.zip`: 一時フォルダに展開し、その直下のファイル
/// - フォルダ: 直下のファイル
/// - ファイル: 同じフォルダのファイル（`single` なら指定ファイルのみ）
pub fn resolve_input(path: &Path, side: Side, single: bool) -> Result<GerberInput> {
    if !path.exists() {
        return Err(GrbDiffError::InputNotFound(path.display().to_string()));
    }

    let (dir, filenames) = if path.is_file() && is_zip(path) {
        let dir = extraction_dir(side);
        debug!("{} を {} に展開", path.display(), dir.display());
        extract_zip(path, &dir)?;
        let files = list_files(&dir)?;
        (dir, files)
    } else if path.is_dir() {
        (path.to_path_buf(), list_files(path)?)
    } else {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let files = if single {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            vec![name]
        } else {
            list_files(&dir)?
        };
        (dir, files)
    };

    debug!("{}: {} ({}件)", side, dir.display(), filenames.len());

    Ok(GerberInput {
        source: path.to_path_buf(),
        dir,
        filenames,
    })
}

/// フォルダ直下のファイル名一覧（サブフォルダは含めない）
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(GrbDiffError::InputNotFound(dir.display().to_string()));
    }

    let mut files: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();

    // ファイル名でソート
    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    #[test]
    fn test_side_display() {
        assert_eq!(Side::One.to_string(), "Gerber 1");
        assert_eq!(Side::Two.number(), 2);
    }

    #[test]
    fn test_is_zip() {
        assert!(is_zip(Path::new("gerbers.zip")));
        assert!(is_zip(Path::new("GERBERS.ZIP")));
        assert!(!is_zip(Path::new("board.gtl")));
        assert!(!is_zip(Path::new("zip")));
    }

    #[test]
    fn test_resolve_not_found() {
        let result = resolve_input(Path::new("/nonexistent/board.gtl"), Side::One, false);
        assert!(matches!(result, Err(GrbDiffError::InputNotFound(_))));
    }

    #[test]
    fn test_list_files_skips_subfolders() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("b.gbl")).unwrap();
        File::create(dir.path().join("a.gtl")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("c.gko")).unwrap();

        let files = list_files(dir.path()).unwrap();
        assert_eq!(files, vec!["a.gtl", "b.gbl"]);
    }

    #[test]
    fn test_resolve_file_uses_parent_folder() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("board.gtl")).unwrap();
        File::create(dir.path().join("board.gko")).unwrap();

        let input = resolve_input(&dir.path().join("board.gtl"), Side::One, false).unwrap();
        assert_eq!(input.dir, dir.path());
        assert_eq!(input.filenames, vec!["board.gko", "board.gtl"]);
        assert_eq!(input.path_of("board.gko"), dir.path().join("board.gko"));
    }

    #[test]
    fn test_resolve_single_file() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("board.gtl")).unwrap();
        File::create(dir.path().join("board.gko")).unwrap();

        let input = resolve_input(&dir.path().join("board.gtl"), Side::Two, true).unwrap();
        assert_eq!(input.filenames, vec!["board.gtl"]);
    }

    #[test]
    fn test_resolve_directory() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("board.drl")).unwrap();

        let input = resolve_input(dir.path(), Side::One, false).unwrap();
        assert_eq!(input.dir, dir.path());
        assert_eq!(input.filenames, vec!["board.drl"]);
    }
}
