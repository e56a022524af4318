//! gerbv外部プロセス呼び出し

use super::{RenderRequest, Renderer};
use crate::error::{GrbDiffError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

#[cfg(windows)]
const GERBV_BINARY: &str = "gerbv.exe";
#[cfg(not(windows))]
const GERBV_BINARY: &str = "gerbv";

/// 実行可能なファイルか（unixでは実行ビットも見る）
fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = path.metadata() else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// gerbv実行ファイルを探す
///
/// 設定済みのパスがあればそれを使い（実行できなければエラー）、
/// 未設定なら PATH から探す。
pub fn locate_gerbv(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        return if is_executable(path) {
            Ok(path.to_path_buf())
        } else {
            Err(GrbDiffError::RendererNotFound(path.display().to_string()))
        };
    }

    std::env::var_os("PATH")
        .and_then(|paths| {
            std::env::split_paths(&paths)
                .map(|dir| dir.join(GERBV_BINARY))
                .find(|candidate| is_executable(candidate))
        })
        .ok_or_else(|| GrbDiffError::RendererNotFound(format!("{} (PATH)", GERBV_BINARY)))
}

/// gerbvを使った描画
#[derive(Debug, Clone)]
pub struct GerbvRenderer {
    binary: PathBuf,
}

impl GerbvRenderer {
    /// 実行ファイルを確認してから作成（見つからなければ描画を始めない）
    pub fn new(configured: Option<&Path>) -> Result<Self> {
        let binary = locate_gerbv(configured)?;
        info!("gerbv: {}", binary.display());
        Ok(Self { binary })
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Renderer for GerbvRenderer {
    fn render(&self, request: &RenderRequest) -> Result<()> {
        let args = request.to_args();
        debug!("gerbv {:?}", args);

        let mut command = Command::new(&self.binary);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let Some(export) = &request.export else {
            command
                .spawn()
                .map_err(|e| GrbDiffError::Render(format!("起動できません: {}", e)))?;
            return Ok(());
        };

        // 前回の出力が残っていると失敗を見逃す
        match std::fs::remove_file(&export.output) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }

        let status = command
            .status()
            .map_err(|e| GrbDiffError::Render(format!("起動できません: {}", e)))?;
        debug!("gerbv exited with {:?}", status.code());

        if !status.success() {
            return Err(GrbDiffError::Render(format!(
                "gerbv failed (code {:?})",
                status.code()
            )));
        }
        if !export.output.is_file() {
            return Err(GrbDiffError::Render(format!(
                "出力ファイルが作成されていません: {}",
                export.output.display()
            )));
        }

        Ok(())
    }
}
