//! Fan-out（配信）の実装
//!
//! `BroadcastRouter` trait の具体的な実装を提供します。
//!
//! - `websocket`: 接続ごとの送信チャンネルを使った実装

pub mod websocket;

pub use websocket::WebSocketBroadcastRouter;
