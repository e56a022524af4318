//! grbdiff
//!
//! 2つのGerberデータを比較するCLIツール。
//! ファイルをレイヤーに振り分け（`grbdiff-common`）、gerbvで描画したPNGを
//! SSIMで比較して差分箇所に枠を描く。

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod export;
pub mod render;
pub mod scanner;
pub mod view;
