//! 离线成绩与计算日志存储操作

use super::SeaOrmStorage;
use crate::entity::offline_computed_grade_logs::{
    ActiveModel as GradeLogActiveModel, Column as GradeLogColumn, Entity as GradeLogs,
};
use crate::entity::offline_computed_grades::{
    ActiveModel as GradeActiveModel, Column as GradeColumn, Entity as OfflineGrades,
};
use crate::errors::{CoursewareError, Result};
use crate::models::grades::{
    entities::{OfflineComputedGrade, OfflineComputedGradeLog},
    requests::{CreateGradeLogRequest, UpsertOfflineGradeRequest},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 插入或覆盖离线成绩，created 只在首次插入时写入
    pub async fn upsert_offline_computed_grade_impl(
        &self,
        req: UpsertOfflineGradeRequest,
    ) -> Result<OfflineComputedGrade> {
        req.validate()?;
        let now = chrono::Utc::now().timestamp();
        let user_id = req.user_id;
        let course_id = req.course_id.clone();

        let model = GradeActiveModel {
            user_id: Set(req.user_id),
            course_id: Set(req.course_id),
            created: Set(Some(now)),
            updated: Set(now),
            gradeset: Set(req.gradeset),
            ..Default::default()
        };

        OfflineGrades::insert(model)
            .on_conflict(
                OnConflict::columns([GradeColumn::UserId, GradeColumn::CourseId])
                    .update_columns([GradeColumn::Gradeset, GradeColumn::Updated])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("写入离线成绩失败: {e}")))?;

        self.get_offline_computed_grade_impl(user_id, &course_id)
            .await?
            .ok_or_else(|| {
                CoursewareError::not_found(format!("离线成绩不存在: {user_id}/{course_id}"))
            })
    }

    /// 通过 (user, course) 获取离线成绩
    pub async fn get_offline_computed_grade_impl(
        &self,
        user_id: i64,
        course_id: &str,
    ) -> Result<Option<OfflineComputedGrade>> {
        let result = OfflineGrades::find()
            .filter(
                Condition::all()
                    .add(GradeColumn::UserId.eq(user_id))
                    .add(GradeColumn::CourseId.eq(course_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("查询离线成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_offline_grade()))
    }

    /// 追加计算日志
    pub async fn create_offline_grade_log_impl(
        &self,
        req: CreateGradeLogRequest,
    ) -> Result<OfflineComputedGradeLog> {
        req.validate()?;
        let now = chrono::Utc::now().timestamp();

        let model = GradeLogActiveModel {
            course_id: Set(req.course_id),
            created: Set(Some(now)),
            seconds: Set(req.seconds),
            nstudents: Set(req.nstudents),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("创建计算日志失败: {e}")))?;

        Ok(result.into_grade_log())
    }

    /// 按创建时间倒序列出计算日志
    pub async fn list_offline_grade_logs_impl(
        &self,
        course_id: &str,
    ) -> Result<Vec<OfflineComputedGradeLog>> {
        let logs = GradeLogs::find()
            .filter(GradeLogColumn::CourseId.eq(course_id))
            .order_by_desc(GradeLogColumn::Created)
            .order_by_desc(GradeLogColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("查询计算日志失败: {e}")))?;

        Ok(logs.into_iter().map(|m| m.into_grade_log()).collect())
    }

    /// 最近一次计算日志
    pub async fn latest_offline_grade_log_impl(
        &self,
        course_id: &str,
    ) -> Result<Option<OfflineComputedGradeLog>> {
        let log = GradeLogs::find()
            .filter(GradeLogColumn::CourseId.eq(course_id))
            .order_by_desc(GradeLogColumn::Created)
            .order_by_desc(GradeLogColumn::Id)
            .one(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("查询计算日志失败: {e}")))?;

        Ok(log.map(|m| m.into_grade_log()))
    }
}
