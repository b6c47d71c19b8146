use serde::{Deserialize, Serialize};

// 模块类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    #[default]
    Problem, // 习题
    Video, // 视频
    Html,  // 图文
}

impl ModuleType {
    pub const PROBLEM: &'static str = "problem";
    pub const VIDEO: &'static str = "video";
    pub const HTML: &'static str = "html";

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Problem => Self::PROBLEM,
            ModuleType::Video => Self::VIDEO,
            ModuleType::Html => Self::HTML,
        }
    }
}

impl<'de> Deserialize<'de> for ModuleType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ModuleType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的模块类型: '{s}'. 支持的类型: problem, video, html"
            ))
        })
    }
}

impl std::fmt::Display for ModuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "problem" => Ok(ModuleType::Problem),
            "video" => Ok(ModuleType::Video),
            "html" => Ok(ModuleType::Html),
            _ => Err(format!("Invalid module type: {s}")),
        }
    }
}

// 完成状态，存储为短代码
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum DoneStatus {
    #[default]
    #[serde(rename = "na")]
    NotApplicable,
    #[serde(rename = "f")]
    Finished,
    #[serde(rename = "i")]
    Incomplete,
}

impl DoneStatus {
    pub const NOT_APPLICABLE: &'static str = "na";
    pub const FINISHED: &'static str = "f";
    pub const INCOMPLETE: &'static str = "i";

    pub fn as_str(&self) -> &'static str {
        match self {
            DoneStatus::NotApplicable => Self::NOT_APPLICABLE,
            DoneStatus::Finished => Self::FINISHED,
            DoneStatus::Incomplete => Self::INCOMPLETE,
        }
    }

    /// 可读标签
    pub fn label(&self) -> &'static str {
        match self {
            DoneStatus::NotApplicable => "NOT_APPLICABLE",
            DoneStatus::Finished => "FINISHED",
            DoneStatus::Incomplete => "INCOMPLETE",
        }
    }
}

impl<'de> Deserialize<'de> for DoneStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DoneStatus>().map_err(|_| {
            serde::de::Error::custom(format!("无效的完成状态: '{s}'. 支持的状态: na, f, i"))
        })
    }
}

impl std::fmt::Display for DoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DoneStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "na" => Ok(DoneStatus::NotApplicable),
            "f" => Ok(DoneStatus::Finished),
            "i" => Ok(DoneStatus::Incomplete),
            _ => Err(format!("Invalid done status: {s}")),
        }
    }
}

/// 学生在某课程某模块上的状态
///
/// `module_state_key` 默认是模块自身的 location，A/B 测试等场景下可被多个模块实例共享。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentModule {
    pub id: i64,
    pub module_type: ModuleType,
    pub module_state_key: String,
    pub student_id: i64,
    pub course_id: String,
    pub state: Option<String>,
    pub grade: Option<f64>,
    pub max_grade: Option<f64>,
    pub done: DoneStatus,
    pub created: chrono::DateTime<chrono::Utc>,
    pub modified: chrono::DateTime<chrono::Utc>,
}

impl StudentModule {
    /// 解析状态 JSON，未保存状态时返回 `Value::Null`
    pub fn state_json(&self) -> crate::errors::Result<serde_json::Value> {
        match &self.state {
            Some(state) => Ok(serde_json::from_str(state)?),
            None => Ok(serde_json::Value::Null),
        }
    }
}

impl std::fmt::Display for StudentModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state: String = self
            .state
            .as_deref()
            .unwrap_or("None")
            .chars()
            .take(20)
            .collect();
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.course_id, self.module_type, self.student_id, self.module_state_key, state
        )
    }
}
