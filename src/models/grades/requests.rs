use serde::Deserialize;

use crate::errors::Result;
use crate::utils::validate::validate_course_id;

/// 批量评分任务写入的成绩
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertOfflineGradeRequest {
    pub user_id: i64,
    pub course_id: String,
    pub gradeset: Option<String>,
}

impl UpsertOfflineGradeRequest {
    pub fn validate(&self) -> Result<()> {
        validate_course_id(&self.course_id)
    }
}

/// 一次批量评分的记录
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGradeLogRequest {
    pub course_id: String,
    #[serde(default)]
    pub seconds: i32,
    #[serde(default)]
    pub nstudents: i32,
}

impl CreateGradeLogRequest {
    pub fn validate(&self) -> Result<()> {
        validate_course_id(&self.course_id)
    }
}
