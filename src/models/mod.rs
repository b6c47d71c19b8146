//! 业务模型
//!
//! 与 `entity` 中的数据库实体分离，枚举字段在这里以封闭类型表示。

pub mod grades;
pub mod student_modules;
pub mod timed_modules;
pub mod users;
