use serde::{Deserialize, Serialize};

/// 离线计算的成绩，每个 (user, course) 一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineComputedGrade {
    pub id: i64,
    pub user_id: i64,
    pub course_id: String,
    pub created: Option<chrono::DateTime<chrono::Utc>>,
    pub updated: chrono::DateTime<chrono::Utc>,
    pub gradeset: Option<String>, // JSON
}

impl OfflineComputedGrade {
    /// 解析 gradeset JSON
    pub fn gradeset_json(&self) -> crate::errors::Result<serde_json::Value> {
        match &self.gradeset {
            Some(gradeset) => Ok(serde_json::from_str(gradeset)?),
            None => Ok(serde_json::Value::Null),
        }
    }
}

impl std::fmt::Display for OfflineComputedGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[OfflineComputedGrade] {}: {} ({}) = {}",
            self.user_id,
            self.course_id,
            self.created.map(|c| c.to_rfc3339()).unwrap_or_default(),
            self.gradeset.as_deref().unwrap_or("None")
        )
    }
}

/// 离线成绩计算日志，只追加
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineComputedGradeLog {
    pub id: i64,
    pub course_id: String,
    pub created: Option<chrono::DateTime<chrono::Utc>>,
    pub seconds: i32,   // 计算耗时（秒）
    pub nstudents: i32, // 参与计算的学生数
}

impl std::fmt::Display for OfflineComputedGradeLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[OCGLog] {}: {}",
            self.course_id,
            self.created.map(|c| c.to_rfc3339()).unwrap_or_default()
        )
    }
}
