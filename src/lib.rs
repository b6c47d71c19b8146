//! Courseware 学生状态持久层
//!
//! 保存学生在课程模块上的状态、离线计算的成绩以及带时间调整的限时活动窗口。
//!
//! # 架构
//! - `cache`: 学生模块批量预取缓存
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 业务模型定义
//! - `runtime`: 运行时生命周期管理
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod storage;
pub mod utils;
