//! 配置管理
//!
//! 配置来源优先级（由低到高）：内置默认值、`config` 文件、`config.{APP_ENV}` 文件、环境变量。

#[path = "impl.rs"]
mod config_impl;
mod structs;

pub use structs::*;
