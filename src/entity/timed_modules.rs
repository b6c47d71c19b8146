//! 限时模块实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courseware_timedmodule")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "module_id")]
    pub module_state_key: String,
    pub student_id: i64,
    pub course_id: String,
    pub accommodation_code: String,
    pub beginning_at: Option<i64>,
    pub ending_at: Option<i64>,
    pub created_at: i64,
    pub modified_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_timed_module(self) -> crate::models::timed_modules::entities::TimedModule {
        use crate::models::timed_modules::entities::{AccommodationCode, TimedModule};
        use chrono::{DateTime, Utc};

        TimedModule {
            id: self.id,
            module_state_key: self.module_state_key,
            student_id: self.student_id,
            course_id: self.course_id,
            accommodation_code: self
                .accommodation_code
                .parse::<AccommodationCode>()
                .unwrap_or_default(),
            beginning_at: self
                .beginning_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            ending_at: self
                .ending_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            modified_at: DateTime::<Utc>::from_timestamp(self.modified_at, 0).unwrap_or_default(),
        }
    }
}
