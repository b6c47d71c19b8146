//! 离线成绩计算日志实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courseware_offlinecomputedgradelog")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: String,
    pub created: Option<i64>,
    pub seconds: i32,
    pub nstudents: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade_log(self) -> crate::models::grades::entities::OfflineComputedGradeLog {
        use crate::models::grades::entities::OfflineComputedGradeLog;
        use chrono::{DateTime, Utc};

        OfflineComputedGradeLog {
            id: self.id,
            course_id: self.course_id,
            created: self
                .created
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            seconds: self.seconds,
            nstudents: self.nstudents,
        }
    }
}
