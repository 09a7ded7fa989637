//! 共通型定義
//!
//! エラー型などレイヤー横断で使う型

pub mod error;
