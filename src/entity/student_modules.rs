//! 学生模块状态实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courseware_studentmodule")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub module_type: String,
    #[sea_orm(column_name = "module_id")]
    pub module_state_key: String,
    pub student_id: i64,
    pub course_id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub state: Option<String>,
    pub grade: Option<f64>,
    pub max_grade: Option<f64>,
    pub done: String,
    pub created: i64,
    pub modified: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_student_module(self) -> crate::models::student_modules::entities::StudentModule {
        use crate::models::student_modules::entities::{DoneStatus, ModuleType, StudentModule};
        use chrono::{DateTime, Utc};

        StudentModule {
            id: self.id,
            module_type: self.module_type.parse::<ModuleType>().unwrap_or_default(),
            module_state_key: self.module_state_key,
            student_id: self.student_id,
            course_id: self.course_id,
            state: self.state,
            grade: self.grade,
            max_grade: self.max_grade,
            done: self.done.parse::<DoneStatus>().unwrap_or_default(),
            created: DateTime::<Utc>::from_timestamp(self.created, 0).unwrap_or_default(),
            modified: DateTime::<Utc>::from_timestamp(self.modified, 0).unwrap_or_default(),
        }
    }
}
