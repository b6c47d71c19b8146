//! 学生模块状态存储操作

use super::SeaOrmStorage;
use crate::entity::student_modules::{ActiveModel, Column, Entity as StudentModules};
use crate::errors::{CoursewareError, Result};
use crate::models::student_modules::{
    entities::StudentModule,
    requests::{CreateStudentModuleRequest, UpdateStudentModuleRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    /// 批量读取学生模块
    pub async fn find_student_modules_impl(
        &self,
        course_id: &str,
        student_id: i64,
        state_keys: &[String],
        lock_for_update: bool,
    ) -> Result<Vec<StudentModule>> {
        if state_keys.is_empty() {
            return Ok(vec![]);
        }

        let mut select = StudentModules::find()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::ModuleStateKey.is_in(state_keys.iter().cloned())),
            )
            .order_by_asc(Column::Id);

        // SELECT ... FOR UPDATE，SQLite 不支持行锁，由方言忽略
        if lock_for_update {
            select = select.lock_exclusive();
        }

        let modules = select
            .all(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("批量查询学生模块失败: {e}")))?;

        Ok(modules.into_iter().map(|m| m.into_student_module()).collect())
    }

    /// 通过 (student, course, key) 获取学生模块
    pub async fn get_student_module_impl(
        &self,
        student_id: i64,
        course_id: &str,
        state_key: &str,
    ) -> Result<Option<StudentModule>> {
        let result = StudentModules::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::ModuleStateKey.eq(state_key)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("查询学生模块失败: {e}")))?;

        Ok(result.map(|m| m.into_student_module()))
    }

    /// 创建学生模块
    pub async fn create_student_module_impl(
        &self,
        req: CreateStudentModuleRequest,
    ) -> Result<StudentModule> {
        req.validate()?;
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            module_type: Set(req.module_type.to_string()),
            module_state_key: Set(req.module_state_key),
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            state: Set(req.state),
            grade: Set(req.grade),
            max_grade: Set(req.max_grade),
            done: Set(req.done.to_string()),
            created: Set(now),
            modified: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("创建学生模块失败: {e}")))?;

        Ok(result.into_student_module())
    }

    /// 更新学生模块
    pub async fn update_student_module_impl(
        &self,
        id: i64,
        update: UpdateStudentModuleRequest,
    ) -> Result<Option<StudentModule>> {
        // 先检查是否存在
        let existing = StudentModules::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("查询学生模块失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.modified = Set(chrono::Utc::now().timestamp());

        if let Some(state) = update.state {
            model.state = Set(Some(state));
        }

        if let Some(grade) = update.grade {
            model.grade = Set(Some(grade));
        }

        if let Some(max_grade) = update.max_grade {
            model.max_grade = Set(Some(max_grade));
        }

        if let Some(done) = update.done {
            model.done = Set(done.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("更新学生模块失败: {e}")))?;

        Ok(Some(result.into_student_module()))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::student_modules::{
        entities::{DoneStatus, ModuleType},
        requests::{CreateStudentModuleRequest, UpdateStudentModuleRequest},
    };
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    const COURSE: &str = "MITx/6.002x/2012_Fall";

    #[tokio::test]
    async fn test_create_and_find_student_modules() {
        let storage = memory_storage().await;
        for key in ["p1", "p2", "p3"] {
            storage
                .create_student_module_impl(CreateStudentModuleRequest::new(
                    7,
                    COURSE,
                    ModuleType::Problem,
                    key,
                ))
                .await
                .unwrap();
        }
        // 其他学生、其他课程的记录不应被读到
        storage
            .create_student_module_impl(CreateStudentModuleRequest::new(
                8,
                COURSE,
                ModuleType::Problem,
                "p1",
            ))
            .await
            .unwrap();
        storage
            .create_student_module_impl(CreateStudentModuleRequest::new(
                7,
                "other/course/run",
                ModuleType::Problem,
                "p1",
            ))
            .await
            .unwrap();

        let keys = vec!["p1".to_string(), "p3".to_string(), "missing".to_string()];
        let found = storage
            .find_student_modules_impl(COURSE, 7, &keys, false)
            .await
            .unwrap();
        let mut found_keys: Vec<_> = found.iter().map(|m| m.module_state_key.as_str()).collect();
        found_keys.sort();
        assert_eq!(found_keys, vec!["p1", "p3"]);
        assert!(found.iter().all(|m| m.done == DoneStatus::NotApplicable));

        let locked = storage
            .find_student_modules_impl(COURSE, 7, &keys, true)
            .await
            .unwrap();
        assert_eq!(locked.len(), 2);
    }

    #[tokio::test]
    async fn test_unique_student_key_course() {
        let storage = memory_storage().await;
        let req = CreateStudentModuleRequest::new(7, COURSE, ModuleType::Video, "v1");
        storage.create_student_module_impl(req.clone()).await.unwrap();

        let err = storage.create_student_module_impl(req).await.unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[tokio::test]
    async fn test_update_student_module() {
        let storage = memory_storage().await;
        let created = storage
            .create_student_module_impl(CreateStudentModuleRequest::new(
                7,
                COURSE,
                ModuleType::Problem,
                "p1",
            ))
            .await
            .unwrap();

        let updated = storage
            .update_student_module_impl(
                created.id,
                UpdateStudentModuleRequest {
                    state: Some(r#"{"attempts": 1}"#.to_string()),
                    grade: Some(1.0),
                    max_grade: Some(2.0),
                    done: Some(DoneStatus::Finished),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.grade, Some(1.0));
        assert_eq!(updated.done, DoneStatus::Finished);
        assert_eq!(updated.state_json().unwrap()["attempts"], 1);
        assert!(updated.modified >= created.modified);

        let fetched = storage
            .get_student_module_impl(7, COURSE, "p1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, updated);

        assert!(
            storage
                .update_student_module_impl(9999, UpdateStudentModuleRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_create_rejects_long_course_id() {
        let storage = memory_storage().await;
        let err = storage
            .create_student_module_impl(CreateStudentModuleRequest::new(
                7,
                "c".repeat(256),
                ModuleType::Html,
                "h1",
            ))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E004");
    }
}
