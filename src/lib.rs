//! courseplay-tools
//!
//! Courseplay リポジトリのメンテナンス用ツール群
//! (翻訳ファイルの同期、ヘルプメニューの書き出し、ログ解析、Issue テンプレート更新)

pub mod config;
pub mod error;
pub mod help_menu;
pub mod log_info;
pub mod templates;
pub mod translation;
pub mod types;
pub mod xml;

mod test_utils;

pub use error::ToolError;
