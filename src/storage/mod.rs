use std::sync::Arc;

use crate::models::{
    grades::{
        entities::{OfflineComputedGrade, OfflineComputedGradeLog},
        requests::{CreateGradeLogRequest, UpsertOfflineGradeRequest},
    },
    student_modules::{
        entities::StudentModule,
        requests::{CreateStudentModuleRequest, UpdateStudentModuleRequest},
    },
    timed_modules::{entities::TimedModule, requests::CreateTimedModuleRequest},
};

use crate::errors::Result;

#[cfg(test)]
pub(crate) mod memory_storage;
pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学生模块状态方法
    // 按 (course, student, key ∈ state_keys) 批量读取，lock_for_update 时加行锁直到事务结束
    async fn find_student_modules(
        &self,
        course_id: &str,
        student_id: i64,
        state_keys: &[String],
        lock_for_update: bool,
    ) -> Result<Vec<StudentModule>>;
    // 读取单个学生模块状态
    async fn get_student_module(
        &self,
        student_id: i64,
        course_id: &str,
        state_key: &str,
    ) -> Result<Option<StudentModule>>;
    // 首次交互时创建
    async fn create_student_module(&self, req: CreateStudentModuleRequest)
    -> Result<StudentModule>;
    // 更新状态、成绩和完成情况
    async fn update_student_module(
        &self,
        id: i64,
        update: UpdateStudentModuleRequest,
    ) -> Result<Option<StudentModule>>;

    /// 离线成绩方法
    // 按 (user, course) 插入或覆盖
    async fn upsert_offline_computed_grade(
        &self,
        req: UpsertOfflineGradeRequest,
    ) -> Result<OfflineComputedGrade>;
    async fn get_offline_computed_grade(
        &self,
        user_id: i64,
        course_id: &str,
    ) -> Result<Option<OfflineComputedGrade>>;
    // 追加计算日志
    async fn create_offline_grade_log(
        &self,
        req: CreateGradeLogRequest,
    ) -> Result<OfflineComputedGradeLog>;
    // 按创建时间倒序列出课程的计算日志
    async fn list_offline_grade_logs(&self, course_id: &str)
    -> Result<Vec<OfflineComputedGradeLog>>;
    // 最近一次计算日志
    async fn latest_offline_grade_log(
        &self,
        course_id: &str,
    ) -> Result<Option<OfflineComputedGradeLog>>;

    /// 限时模块方法
    async fn create_timed_module(&self, req: CreateTimedModuleRequest) -> Result<TimedModule>;
    async fn get_timed_module(
        &self,
        student_id: i64,
        course_id: &str,
        state_key: &str,
    ) -> Result<Option<TimedModule>>;
    // 保存 begin() 之后的时间窗口，库中已开始的记录不会被覆盖
    async fn save_timed_module_window(&self, module: &TimedModule) -> Result<Option<TimedModule>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
