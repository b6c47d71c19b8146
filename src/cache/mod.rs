//! 缓存层
//!
//! `StudentModuleCache` 在一次请求内预取学生模块状态，避免逐个模块查询数据库。

pub mod descriptor;
pub mod student_module_cache;

pub use descriptor::{ModuleDescriptor, collect_descendants};
pub use student_module_cache::{STUDENT_MODULE_CHUNK_SIZE, StudentModuleCache};
