//! grbdiff Common Library
//!
//! レイヤー判別（カタログ・グロブ照合・振り分け）とカラーテンプレート。
//! ファイルI/Oや外部プロセスは扱わない。

pub mod error;
pub mod glob;
pub mod layers;
pub mod classifier;
pub mod color;
pub mod templates;

pub use error::{Error, Result};
pub use glob::{matches, CaseSensitivity};
pub use layers::{find_layer, outline_index, validate_catalogue, LayerRule, LAYER_RULES};
pub use classifier::{classify, ClassifiedSet};
pub use color::Color;
pub use templates::{DiffTemplate, PngTemplate, ViewTemplate, DIFF_TEMPLATES, PNG_TEMPLATES, VIEW_TEMPLATES};
