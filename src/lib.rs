//! ImSteg terminal client
//!
//! ブラウザ版と同じコントローラを、コンソール上のページとHTTP送信で動かす。

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod session;
pub mod transport;
