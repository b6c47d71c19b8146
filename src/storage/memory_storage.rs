//! 测试用内存存储，记录每次批量读取

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::Storage;
use crate::errors::{CoursewareError, Result};
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

/// 一次 find_student_modules 调用
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BatchRead {
    pub state_keys: Vec<String>,
    pub lock_for_update: bool,
}

#[derive(Default)]
pub(crate) struct MemoryStorage {
    student_modules: Mutex<Vec<StudentModule>>,
    offline_grades: Mutex<Vec<OfflineComputedGrade>>,
    grade_logs: Mutex<Vec<OfflineComputedGradeLog>>,
    timed_modules: Mutex<Vec<TimedModule>>,
    batch_reads: Mutex<Vec<BatchRead>>,
}

impl MemoryStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn batch_reads(&self) -> Vec<BatchRead> {
        self.batch_reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn find_student_modules(
        &self,
        course_id: &str,
        student_id: i64,
        state_keys: &[String],
        lock_for_update: bool,
    ) -> Result<Vec<StudentModule>> {
        self.batch_reads.lock().unwrap().push(BatchRead {
            state_keys: state_keys.to_vec(),
            lock_for_update,
        });

        Ok(self
            .student_modules
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                m.course_id == course_id
                    && m.student_id == student_id
                    && state_keys.contains(&m.module_state_key)
            })
            .cloned()
            .collect())
    }

    async fn get_student_module(
        &self,
        student_id: i64,
        course_id: &str,
        state_key: &str,
    ) -> Result<Option<StudentModule>> {
        Ok(self
            .student_modules
            .lock()
            .unwrap()
            .iter()
            .find(|m| {
                m.student_id == student_id
                    && m.course_id == course_id
                    && m.module_state_key == state_key
            })
            .cloned())
    }

    async fn create_student_module(
        &self,
        req: CreateStudentModuleRequest,
    ) -> Result<StudentModule> {
        req.validate()?;
        let mut modules = self.student_modules.lock().unwrap();
        if modules.iter().any(|m| {
            m.student_id == req.student_id
                && m.course_id == req.course_id
                && m.module_state_key == req.module_state_key
        }) {
            return Err(CoursewareError::database_operation(
                "UNIQUE constraint failed: courseware_studentmodule",
            ));
        }

        let now = Utc::now();
        let module = StudentModule {
            id: modules.len() as i64 + 1,
            module_type: req.module_type,
            module_state_key: req.module_state_key,
            student_id: req.student_id,
            course_id: req.course_id,
            state: req.state,
            grade: req.grade,
            max_grade: req.max_grade,
            done: req.done,
            created: now,
            modified: now,
        };
        modules.push(module.clone());
        Ok(module)
    }

    async fn update_student_module(
        &self,
        id: i64,
        update: UpdateStudentModuleRequest,
    ) -> Result<Option<StudentModule>> {
        let mut modules = self.student_modules.lock().unwrap();
        let Some(module) = modules.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(state) = update.state {
            module.state = Some(state);
        }
        if let Some(grade) = update.grade {
            module.grade = Some(grade);
        }
        if let Some(max_grade) = update.max_grade {
            module.max_grade = Some(max_grade);
        }
        if let Some(done) = update.done {
            module.done = done;
        }
        module.modified = Utc::now();
        Ok(Some(module.clone()))
    }

    async fn upsert_offline_computed_grade(
        &self,
        req: UpsertOfflineGradeRequest,
    ) -> Result<OfflineComputedGrade> {
        req.validate()?;
        let mut grades = self.offline_grades.lock().unwrap();
        let now = Utc::now();
        if let Some(grade) = grades
            .iter_mut()
            .find(|g| g.user_id == req.user_id && g.course_id == req.course_id)
        {
            grade.gradeset = req.gradeset;
            grade.updated = now;
            return Ok(grade.clone());
        }

        let grade = OfflineComputedGrade {
            id: grades.len() as i64 + 1,
            user_id: req.user_id,
            course_id: req.course_id,
            created: Some(now),
            updated: now,
            gradeset: req.gradeset,
        };
        grades.push(grade.clone());
        Ok(grade)
    }

    async fn get_offline_computed_grade(
        &self,
        user_id: i64,
        course_id: &str,
    ) -> Result<Option<OfflineComputedGrade>> {
        Ok(self
            .offline_grades
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.user_id == user_id && g.course_id == course_id)
            .cloned())
    }

    async fn create_offline_grade_log(
        &self,
        req: CreateGradeLogRequest,
    ) -> Result<OfflineComputedGradeLog> {
        req.validate()?;
        let mut logs = self.grade_logs.lock().unwrap();
        let log = OfflineComputedGradeLog {
            id: logs.len() as i64 + 1,
            course_id: req.course_id,
            created: Some(Utc::now()),
            seconds: req.seconds,
            nstudents: req.nstudents,
        };
        logs.push(log.clone());
        Ok(log)
    }

    async fn list_offline_grade_logs(
        &self,
        course_id: &str,
    ) -> Result<Vec<OfflineComputedGradeLog>> {
        let mut logs: Vec<_> = self
            .grade_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.course_id == course_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        Ok(logs)
    }

    async fn latest_offline_grade_log(
        &self,
        course_id: &str,
    ) -> Result<Option<OfflineComputedGradeLog>> {
        Ok(self
            .list_offline_grade_logs(course_id)
            .await?
            .into_iter()
            .next())
    }

    async fn create_timed_module(&self, req: CreateTimedModuleRequest) -> Result<TimedModule> {
        req.validate()?;
        let mut modules = self.timed_modules.lock().unwrap();
        if modules.iter().any(|m| {
            m.student_id == req.student_id
                && m.course_id == req.course_id
                && m.module_state_key == req.module_state_key
        }) {
            return Err(CoursewareError::database_operation(
                "UNIQUE constraint failed: courseware_timedmodule",
            ));
        }

        let now = Utc::now();
        let module = TimedModule {
            id: modules.len() as i64 + 1,
            module_state_key: req.module_state_key,
            student_id: req.student_id,
            course_id: req.course_id,
            accommodation_code: req.accommodation_code,
            beginning_at: None,
            ending_at: None,
            created_at: now,
            modified_at: now,
        };
        modules.push(module.clone());
        Ok(module)
    }

    async fn get_timed_module(
        &self,
        student_id: i64,
        course_id: &str,
        state_key: &str,
    ) -> Result<Option<TimedModule>> {
        Ok(self
            .timed_modules
            .lock()
            .unwrap()
            .iter()
            .find(|m| {
                m.student_id == student_id
                    && m.course_id == course_id
                    && m.module_state_key == state_key
            })
            .cloned())
    }

    async fn save_timed_module_window(&self, module: &TimedModule) -> Result<Option<TimedModule>> {
        if !module.has_begun() {
            return Err(CoursewareError::validation(format!(
                "限时活动尚未开始: {module}"
            )));
        }

        let mut modules = self.timed_modules.lock().unwrap();
        let Some(stored) = modules.iter_mut().find(|m| m.id == module.id) else {
            return Ok(None);
        };
        if stored.has_begun() {
            return Err(CoursewareError::validation(format!(
                "限时活动已开始: {module}"
            )));
        }
        stored.beginning_at = module.beginning_at;
        stored.ending_at = module.ending_at;
        stored.modified_at = Utc::now();
        Ok(Some(stored.clone()))
    }
}
