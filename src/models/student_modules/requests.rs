use serde::Deserialize;

use super::entities::{DoneStatus, ModuleType};
use crate::errors::Result;
use crate::utils::validate::{validate_course_id, validate_state_key};

/// 首次交互时创建学生模块状态
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentModuleRequest {
    pub student_id: i64,
    pub course_id: String,
    pub module_state_key: String,
    #[serde(default)]
    pub module_type: ModuleType,
    pub state: Option<String>,
    pub grade: Option<f64>,
    pub max_grade: Option<f64>,
    #[serde(default)]
    pub done: DoneStatus,
}

impl CreateStudentModuleRequest {
    pub fn new<C: Into<String>, K: Into<String>>(
        student_id: i64,
        course_id: C,
        module_type: ModuleType,
        module_state_key: K,
    ) -> Self {
        Self {
            student_id,
            course_id: course_id.into(),
            module_state_key: module_state_key.into(),
            module_type,
            state: None,
            grade: None,
            max_grade: None,
            done: DoneStatus::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_course_id(&self.course_id)?;
        validate_state_key(&self.module_state_key)
    }
}

/// 后续交互更新状态，None 字段保持不变
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentModuleRequest {
    pub state: Option<String>,
    pub grade: Option<f64>,
    pub max_grade: Option<f64>,
    pub done: Option<DoneStatus>,
}
