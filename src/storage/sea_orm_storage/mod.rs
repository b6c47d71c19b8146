//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod offline_grades;
mod student_modules;
mod timed_modules;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{CoursewareError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CoursewareError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CoursewareError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| CoursewareError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CoursewareError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CoursewareError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学生模块
    async fn find_student_modules(
        &self,
        course_id: &str,
        student_id: i64,
        state_keys: &[String],
        lock_for_update: bool,
    ) -> Result<Vec<StudentModule>> {
        self.find_student_modules_impl(course_id, student_id, state_keys, lock_for_update)
            .await
    }

    async fn get_student_module(
        &self,
        student_id: i64,
        course_id: &str,
        state_key: &str,
    ) -> Result<Option<StudentModule>> {
        self.get_student_module_impl(student_id, course_id, state_key)
            .await
    }

    async fn create_student_module(
        &self,
        req: CreateStudentModuleRequest,
    ) -> Result<StudentModule> {
        self.create_student_module_impl(req).await
    }

    async fn update_student_module(
        &self,
        id: i64,
        update: UpdateStudentModuleRequest,
    ) -> Result<Option<StudentModule>> {
        self.update_student_module_impl(id, update).await
    }

    // 离线成绩
    async fn upsert_offline_computed_grade(
        &self,
        req: UpsertOfflineGradeRequest,
    ) -> Result<OfflineComputedGrade> {
        self.upsert_offline_computed_grade_impl(req).await
    }

    async fn get_offline_computed_grade(
        &self,
        user_id: i64,
        course_id: &str,
    ) -> Result<Option<OfflineComputedGrade>> {
        self.get_offline_computed_grade_impl(user_id, course_id)
            .await
    }

    async fn create_offline_grade_log(
        &self,
        req: CreateGradeLogRequest,
    ) -> Result<OfflineComputedGradeLog> {
        self.create_offline_grade_log_impl(req).await
    }

    async fn list_offline_grade_logs(
        &self,
        course_id: &str,
    ) -> Result<Vec<OfflineComputedGradeLog>> {
        self.list_offline_grade_logs_impl(course_id).await
    }

    async fn latest_offline_grade_log(
        &self,
        course_id: &str,
    ) -> Result<Option<OfflineComputedGradeLog>> {
        self.latest_offline_grade_log_impl(course_id).await
    }

    // 限时模块
    async fn create_timed_module(&self, req: CreateTimedModuleRequest) -> Result<TimedModule> {
        self.create_timed_module_impl(req).await
    }

    async fn get_timed_module(
        &self,
        student_id: i64,
        course_id: &str,
        state_key: &str,
    ) -> Result<Option<TimedModule>> {
        self.get_timed_module_impl(student_id, course_id, state_key)
            .await
    }

    async fn save_timed_module_window(&self, module: &TimedModule) -> Result<Option<TimedModule>> {
        self.save_timed_module_window_impl(module).await
    }
}
