//! 离线成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courseware_offlinecomputedgrade")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub course_id: String,
    pub created: Option<i64>,
    pub updated: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub gradeset: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_offline_grade(self) -> crate::models::grades::entities::OfflineComputedGrade {
        use crate::models::grades::entities::OfflineComputedGrade;
        use chrono::{DateTime, Utc};

        OfflineComputedGrade {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            created: self
                .created
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            updated: DateTime::<Utc>::from_timestamp(self.updated, 0).unwrap_or_default(),
            gradeset: self.gradeset,
        }
    }
}
