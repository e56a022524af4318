use clap::{Parser, Subcommand};
use grbdiff_common::Color;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grbdiff")]
#[command(about = "Gerberファイル差分可視化ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ファイル名の大文字小文字を区別して判別する
    #[arg(long, global = true)]
    pub case_sensitive: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ファイルをレイヤーに振り分けて表示
    Classify {
        /// Gerber 1（フォルダ / ファイル / ZIP、省略時は前回の入力）
        input1: Option<PathBuf>,

        /// Gerber 2（省略時は前回の入力、なければ Gerber 1 のみ）
        input2: Option<PathBuf>,

        /// ファイル指定時にそのファイルだけを対象にする
        #[arg(long)]
        single: bool,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 全レイヤーをPNG出力して比較
    Export {
        /// Gerber 1（省略時は前回の入力）
        input1: Option<PathBuf>,

        /// Gerber 2（省略時は前回の入力）
        input2: Option<PathBuf>,

        /// 出力フォルダ（省略時は設定値）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力解像度
        #[arg(long)]
        dpi: Option<u32>,

        /// PNGテンプレート番号（`grbdiff templates` で確認）
        #[arg(short, long)]
        template: Option<usize>,

        /// ファイル指定時にそのファイルだけを対象にする
        #[arg(long)]
        single: bool,
    },

    /// 基板全体をgerbvで表示
    View {
        /// 表示する入力（省略時は前回の入力）
        input: Option<PathBuf>,

        /// 入力省略時にどちらの前回入力を使うか (1/2)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=2))]
        side: u8,

        /// 表示テンプレート番号
        #[arg(short, long)]
        template: Option<usize>,

        /// 背景色（`#RRGGBB` / `#RRGGBBAA`、テンプレートの背景を上書き）
        #[arg(long)]
        background: Option<Color>,
    },

    /// 1レイヤーの差分をgerbvで表示
    Diff {
        /// Gerber 1（省略時は前回の入力）
        input1: Option<PathBuf>,

        /// Gerber 2（省略時は前回の入力）
        input2: Option<PathBuf>,

        /// レイヤー（番号または名前、省略時は選択）
        #[arg(short, long)]
        layer: Option<String>,

        /// 差分テンプレート番号
        #[arg(short, long)]
        template: Option<usize>,

        /// 背景色（`#RRGGBB` / `#RRGGBBAA`、テンプレートの背景を上書き）
        #[arg(long)]
        background: Option<Color>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// gerbv実行ファイルのパスを設定
        #[arg(long)]
        set_gerbv: Option<PathBuf>,

        /// PNG出力フォルダを設定
        #[arg(long)]
        set_export_dir: Option<PathBuf>,

        /// PNG出力の解像度を設定
        #[arg(long)]
        set_dpi: Option<u32>,
    },

    /// カラーテンプレート一覧
    Templates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_override_parses_color() {
        let cli = Cli::try_parse_from(["grbdiff", "view", "board", "--background", "#102030"]).unwrap();
        match cli.command {
            Commands::View { background, .. } => {
                assert_eq!(background, Some(Color::rgb(0x10, 0x20, 0x30)));
            }
            _ => panic!("view expected"),
        }
    }

    #[test]
    fn test_background_override_rejects_invalid_color() {
        let result = Cli::try_parse_from(["grbdiff", "diff", "a", "b", "--background", "red"]);
        assert!(result.is_err());
    }
}
