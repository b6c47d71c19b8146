//! 限时模块存储操作

use super::SeaOrmStorage;
use crate::entity::timed_modules::{ActiveModel, Column, Entity as TimedModules};
use crate::errors::{CoursewareError, Result};
use crate::models::timed_modules::{entities::TimedModule, requests::CreateTimedModuleRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建限时模块
    pub async fn create_timed_module_impl(
        &self,
        req: CreateTimedModuleRequest,
    ) -> Result<TimedModule> {
        req.validate()?;
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            module_state_key: Set(req.module_state_key),
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            accommodation_code: Set(req.accommodation_code.to_string()),
            beginning_at: Set(None),
            ending_at: Set(None),
            created_at: Set(now),
            modified_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("创建限时模块失败: {e}")))?;

        Ok(result.into_timed_module())
    }

    /// 通过 (student, course, key) 获取限时模块
    pub async fn get_timed_module_impl(
        &self,
        student_id: i64,
        course_id: &str,
        state_key: &str,
    ) -> Result<Option<TimedModule>> {
        let result = TimedModules::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::ModuleStateKey.eq(state_key)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("查询限时模块失败: {e}")))?;

        Ok(result.map(|m| m.into_timed_module()))
    }

    /// 保存开始和结束时间
    ///
    /// 只有库中尚未开始的记录会被写入，已开始时返回校验错误，保证时间窗口只设置一次。
    pub async fn save_timed_module_window_impl(
        &self,
        module: &TimedModule,
    ) -> Result<Option<TimedModule>> {
        let Some(beginning_at) = module.beginning_at else {
            return Err(CoursewareError::validation(format!(
                "限时活动尚未开始: {module}"
            )));
        };

        let result = TimedModules::update_many()
            .col_expr(
                Column::BeginningAt,
                sea_orm::sea_query::Expr::value(Some(beginning_at.timestamp())),
            )
            .col_expr(
                Column::EndingAt,
                sea_orm::sea_query::Expr::value(module.ending_at.map(|t| t.timestamp())),
            )
            .col_expr(
                Column::ModifiedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(module.id))
            .filter(Column::BeginningAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("更新限时模块失败: {e}")))?;

        let stored = TimedModules::find_by_id(module.id)
            .one(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("查询限时模块失败: {e}")))?;

        let Some(stored) = stored else {
            return Ok(None);
        };

        if result.rows_affected == 0 {
            return Err(CoursewareError::validation(format!(
                "限时活动已开始: {module}"
            )));
        }

        Ok(Some(stored.into_timed_module()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use crate::models::timed_modules::{
        entities::AccommodationCode, requests::CreateTimedModuleRequest,
    };
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    const COURSE: &str = "MITx/6.002x/2012_Fall";
    const EXAM: &str = "i4x://MITx/6.002x/timelimit/midterm";

    #[tokio::test]
    async fn test_begin_and_persist_window() {
        let storage = memory_storage().await;
        let mut module = storage
            .create_timed_module_impl(CreateTimedModuleRequest {
                student_id: 7,
                course_id: COURSE.to_string(),
                module_state_key: EXAM.to_string(),
                accommodation_code: AccommodationCode::Add30Min,
            })
            .await
            .unwrap();
        assert!(!module.has_begun());

        module.begin(3600).unwrap();
        let saved = storage
            .save_timed_module_window_impl(&module)
            .await
            .unwrap()
            .unwrap();

        let fetched = storage
            .get_timed_module_impl(7, COURSE, EXAM)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, saved);
        assert_eq!(fetched.accommodation_code, AccommodationCode::Add30Min);
        assert_eq!(fetched.beginning_at, module.beginning_at);
        assert_eq!(
            (fetched.ending_at.unwrap() - fetched.beginning_at.unwrap()).num_seconds(),
            5400
        );
        assert!(!fetched.has_ended());
    }

    #[tokio::test]
    async fn test_default_accommodation_and_uniqueness() {
        let storage = memory_storage().await;
        let req: CreateTimedModuleRequest = serde_json::from_value(serde_json::json!({
            "student_id": 7,
            "course_id": COURSE,
            "module_state_key": EXAM,
        }))
        .unwrap();

        let module = storage.create_timed_module_impl(req.clone()).await.unwrap();
        assert_eq!(module.accommodation_code, AccommodationCode::None);
        assert_eq!(module.beginning_at, None);

        let err = storage.create_timed_module_impl(req).await.unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[tokio::test]
    async fn test_stale_copy_cannot_restart_window() {
        let storage = memory_storage().await;
        let created = storage
            .create_timed_module_impl(CreateTimedModuleRequest {
                student_id: 7,
                course_id: COURSE.to_string(),
                module_state_key: EXAM.to_string(),
                accommodation_code: AccommodationCode::None,
            })
            .await
            .unwrap();

        // 两个请求在任何一方保存前都读到了未开始的记录
        let mut first = created.clone();
        let mut second = created;
        let t1 = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let t2 = DateTime::<Utc>::from_timestamp(1_700_005_000, 0).unwrap();

        first.begin_at(600, t1).unwrap();
        storage
            .save_timed_module_window_impl(&first)
            .await
            .unwrap()
            .unwrap();

        second.begin_at(600, t2).unwrap();
        let err = storage
            .save_timed_module_window_impl(&second)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E004");

        let stored = storage
            .get_timed_module_impl(7, COURSE, EXAM)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.beginning_at, Some(t1));
        assert_eq!(stored.ending_at, Some(t1 + chrono::Duration::seconds(600)));
    }

    #[tokio::test]
    async fn test_save_requires_begun_window_and_existing_row() {
        let storage = memory_storage().await;
        let mut module = storage
            .create_timed_module_impl(CreateTimedModuleRequest {
                student_id: 7,
                course_id: COURSE.to_string(),
                module_state_key: EXAM.to_string(),
                accommodation_code: AccommodationCode::None,
            })
            .await
            .unwrap();

        let err = storage
            .save_timed_module_window_impl(&module)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E004");

        module.id += 100;
        module.begin(60).unwrap();
        assert!(
            storage
                .save_timed_module_window_impl(&module)
                .await
                .unwrap()
                .is_none()
        );
    }
}
