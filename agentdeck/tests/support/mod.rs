//! 統合テスト用のサポートユーティリティ

pub mod deck;
pub mod http;
