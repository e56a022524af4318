use crate::error::{GrbDiffError, Result};
use crate::export::ExportSettings;
use grbdiff_common::templates::pick;
use grbdiff_common::{
    CaseSensitivity, DiffTemplate, PngTemplate, ViewTemplate, DIFF_TEMPLATES, PNG_TEMPLATES,
    VIEW_TEMPLATES,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DPI: u32 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// gerbv実行ファイル（未設定なら PATH から探す）
    pub gerbv_path: Option<PathBuf>,
    /// 前回使った入力
    pub input1: Option<PathBuf>,
    pub input2: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub export_dpi: u32,
    pub png_template: usize,
    pub view_template: usize,
    pub diff_template: usize,
    pub case_sensitive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GrbDiffError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("grbdiff").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            gerbv_path: None,
            input1: None,
            input2: None,
            export_dir: None,
            export_dpi: DEFAULT_DPI,
            png_template: 0,
            view_template: 0,
            diff_template: 0,
            case_sensitive: false,
        }
    }

    /// 大文字小文字の扱い（コマンドラインの指定が優先）
    pub fn case_sensitivity(&self, force_sensitive: bool) -> CaseSensitivity {
        CaseSensitivity::from_flag(force_sensitive || self.case_sensitive)
    }

    pub fn png_template(&self) -> &'static PngTemplate {
        pick(PNG_TEMPLATES, self.png_template)
    }

    pub fn view_template(&self) -> &'static ViewTemplate {
        pick(VIEW_TEMPLATES, self.view_template)
    }

    pub fn diff_template(&self) -> &'static DiffTemplate {
        pick(DIFF_TEMPLATES, self.diff_template)
    }

    /// 出力設定を確定する（引数で渡した値が設定より優先）
    pub fn export_settings(
        &self,
        export_dir: Option<PathBuf>,
        dpi: Option<u32>,
        template: Option<usize>,
    ) -> Result<ExportSettings> {
        let export_dir = export_dir
            .or_else(|| self.export_dir.clone())
            .ok_or(GrbDiffError::MissingExportDir)?;
        let dpi = dpi.unwrap_or(self.export_dpi);
        if dpi == 0 {
            return Err(GrbDiffError::Config("DPIは1以上を指定してください".into()));
        }

        Ok(ExportSettings {
            export_dir,
            dpi,
            template: pick(PNG_TEMPLATES, template.unwrap_or(self.png_template)),
        })
    }

    /// 入力パス（省略時は前回の入力）
    pub fn input_or_last(&self, given: Option<PathBuf>, slot: u8) -> Result<PathBuf> {
        let last = match slot {
            1 => self.input1.clone(),
            _ => self.input2.clone(),
        };
        given.or(last).ok_or_else(|| {
            GrbDiffError::Config(format!("Gerber {} の入力が指定されていません", slot))
        })
    }

    /// 使った入力を記録する（保存は呼び出し側）
    pub fn remember_inputs(&mut self, input1: Option<&Path>, input2: Option<&Path>) -> bool {
        let mut changed = false;
        if let Some(path) = input1 {
            changed |= self.input1.as_deref() != Some(path);
            self.input1 = Some(path.to_path_buf());
        }
        if let Some(path) = input2 {
            changed |= self.input2.as_deref() != Some(path);
            self.input2 = Some(path.to_path_buf());
        }
        changed
    }

    pub fn set_gerbv_path(&mut self, path: PathBuf) -> Result<()> {
        if !path.is_file() {
            return Err(GrbDiffError::RendererNotFound(path.display().to_string()));
        }
        self.gerbv_path = Some(path);
        self.save()
    }

    pub fn set_export_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.export_dir = Some(dir);
        self.save()
    }

    pub fn set_dpi(&mut self, dpi: u32) -> Result<()> {
        if dpi == 0 {
            return Err(GrbDiffError::Config("DPIは1以上を指定してください".into()));
        }
        self.export_dpi = dpi;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.export_dpi, 300);
        assert!(config.gerbv_path.is_none());
        assert_eq!(config.case_sensitivity(false), CaseSensitivity::Insensitive);
        assert_eq!(config.case_sensitivity(true), CaseSensitivity::Sensitive);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"export_dir": "/tmp/out"}"#).unwrap();
        assert_eq!(config.export_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.export_dpi, DEFAULT_DPI);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.export_dpi = 600;
        config.case_sensitive = true;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_export_settings_requires_dir() {
        let config = Config::default();
        assert!(matches!(
            config.export_settings(None, None, None),
            Err(GrbDiffError::MissingExportDir)
        ));

        let settings = config
            .export_settings(Some(PathBuf::from("/out")), Some(150), Some(1))
            .unwrap();
        assert_eq!(settings.export_dir, PathBuf::from("/out"));
        assert_eq!(settings.dpi, 150);
        assert_eq!(settings.template.name, PNG_TEMPLATES[1].name);
    }

    #[test]
    fn test_export_settings_rejects_zero_dpi() {
        let config = Config::default();
        assert!(config.export_settings(Some(PathBuf::from("/out")), Some(0), None).is_err());
    }

    #[test]
    fn test_input_or_last() {
        let mut config = Config::default();
        assert!(config.input_or_last(None, 1).is_err());

        assert!(config.remember_inputs(Some(Path::new("/a.zip")), None));
        assert!(!config.remember_inputs(Some(Path::new("/a.zip")), None));
        assert_eq!(config.input_or_last(None, 1).unwrap(), PathBuf::from("/a.zip"));
        assert_eq!(
            config.input_or_last(Some(PathBuf::from("/b")), 1).unwrap(),
            PathBuf::from("/b")
        );
    }
}
