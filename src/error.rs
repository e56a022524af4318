use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrbDiffError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力が見つかりません: {0}")]
    InputNotFound(String),

    #[error("Gerberファイルが見つかりません: {0}")]
    NoGerberFiles(String),

    #[error("ZIP展開エラー: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("ZIP内のパスが不正です: {0}")]
    UnsafeArchiveEntry(String),

    #[error("gerbvが見つかりません: {0}。`grbdiff config --set-gerbv PATH` で設定してください")]
    RendererNotFound(String),

    #[error("gerbv実行エラー: {0}")]
    Render(String),

    #[error("出力先フォルダが設定されていません。`--output` か `grbdiff config --set-export-dir DIR` で指定してください")]
    MissingExportDir,

    #[error("レイヤー '{layer}' は {side} に存在しません")]
    LayerUnavailable { layer: String, side: String },

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("画像エラー: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] grbdiff_common::Error),
}

pub type Result<T> = std::result::Result<T, GrbDiffError>;
