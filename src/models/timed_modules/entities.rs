use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CoursewareError, Result};

/// 测试用的时长：一周
pub const TESTING_DURATION_SECS: i64 = 3600 * 24 * 7;

/// 加时 30 分钟
pub const ADD_30_MIN_SECS: i64 = 30 * 60;

// 限时活动的时间调整，互斥
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum AccommodationCode {
    #[default]
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "ADDHALFTIME")]
    AddHalfTime,
    #[serde(rename = "ADD30MIN")]
    Add30Min,
    #[serde(rename = "DOUBLE")]
    Double,
    #[serde(rename = "TESTING")]
    Testing,
}

impl AccommodationCode {
    pub const NONE: &'static str = "NONE";
    pub const ADD_HALF_TIME: &'static str = "ADDHALFTIME";
    pub const ADD_30_MIN: &'static str = "ADD30MIN";
    pub const DOUBLE: &'static str = "DOUBLE";
    pub const TESTING: &'static str = "TESTING";

    pub fn as_str(&self) -> &'static str {
        match self {
            AccommodationCode::None => Self::NONE,
            AccommodationCode::AddHalfTime => Self::ADD_HALF_TIME,
            AccommodationCode::Add30Min => Self::ADD_30_MIN,
            AccommodationCode::Double => Self::DOUBLE,
            AccommodationCode::Testing => Self::TESTING,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AccommodationCode::None => "No Time Accommodation",
            AccommodationCode::AddHalfTime => "Extra Time - 1 1/2 Time",
            AccommodationCode::Add30Min => "Extra Time - 30 Minutes",
            AccommodationCode::Double => "Extra Time - Double Time",
            AccommodationCode::Testing => "Extra Time -- Large amount for testing purposes",
        }
    }

    pub fn all_codes() -> &'static [AccommodationCode] {
        &[
            AccommodationCode::None,
            AccommodationCode::AddHalfTime,
            AccommodationCode::Add30Min,
            AccommodationCode::Double,
            AccommodationCode::Testing,
        ]
    }

    /// 按时间调整计算活动时长，输入输出均为秒
    ///
    /// 1.5 倍时向零截断；TESTING 忽略输入，固定为一周。
    /// 超出 i64 范围时饱和到 `i64::MAX`/`i64::MIN`，这样的时长随后会被 `begin_at` 拒绝。
    pub fn accommodated_duration(&self, duration: i64) -> i64 {
        match self {
            AccommodationCode::None => duration,
            // base + base / 2 与 trunc(base * 1.5) 相同，且不经过浮点
            AccommodationCode::AddHalfTime => duration.saturating_add(duration / 2),
            AccommodationCode::Add30Min => duration.saturating_add(ADD_30_MIN_SECS),
            AccommodationCode::Double => duration.saturating_mul(2),
            AccommodationCode::Testing => TESTING_DURATION_SECS,
        }
    }
}

impl<'de> Deserialize<'de> for AccommodationCode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AccommodationCode>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的时间调整代码: '{s}'. 支持的代码: NONE, ADDHALFTIME, ADD30MIN, DOUBLE, TESTING"
            ))
        })
    }
}

impl std::fmt::Display for AccommodationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AccommodationCode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(AccommodationCode::None),
            "ADDHALFTIME" => Ok(AccommodationCode::AddHalfTime),
            "ADD30MIN" => Ok(AccommodationCode::Add30Min),
            "DOUBLE" => Ok(AccommodationCode::Double),
            "TESTING" => Ok(AccommodationCode::Testing),
            _ => Err(format!("Invalid accommodation code: {s}")),
        }
    }
}

/// 学生在某个限时活动上的时间窗口
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedModule {
    pub id: i64,
    pub module_state_key: String,
    pub student_id: i64,
    pub course_id: String,
    pub accommodation_code: AccommodationCode,
    pub beginning_at: Option<DateTime<Utc>>,
    pub ending_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl TimedModule {
    pub fn has_begun(&self) -> bool {
        self.beginning_at.is_some()
    }

    pub fn has_ended(&self) -> bool {
        self.has_ended_at(Utc::now())
    }

    /// 结束时间已设置且早于 `now`
    pub fn has_ended_at(&self, now: DateTime<Utc>) -> bool {
        self.ending_at.is_some_and(|ending_at| ending_at < now)
    }

    /// 开始活动，以当前时间为起点
    pub fn begin(&mut self, duration: i64) -> Result<()> {
        self.begin_at(duration, Utc::now())
    }

    /// 以 `now` 为起点开始活动，结束时间 = 起点 + 调整后的时长
    ///
    /// 只能开始一次，已开始时返回错误且不修改时间。
    pub fn begin_at(&mut self, duration: i64, now: DateTime<Utc>) -> Result<()> {
        if self.has_begun() {
            return Err(CoursewareError::validation(format!(
                "限时活动已开始: {}/{}/{}",
                self.course_id, self.student_id, self.module_state_key
            )));
        }

        // 存储精度为秒
        let beginning_at = now.trunc_subsecs(0);
        let seconds = self.accommodation_code.accommodated_duration(duration);
        let ending_at = Duration::try_seconds(seconds)
            .and_then(|duration| beginning_at.checked_add_signed(duration))
            .ok_or_else(|| CoursewareError::validation(format!("活动时长超出范围: {seconds}s")))?;

        self.beginning_at = Some(beginning_at);
        self.ending_at = Some(ending_at);
        Ok(())
    }

    /// 结束时间的毫秒时间戳
    pub fn end_time_in_ms(&self) -> Option<i64> {
        self.ending_at.map(|ending_at| ending_at.timestamp() * 1000)
    }
}

impl std::fmt::Display for TimedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.course_id, self.student_id, self.module_state_key
        )
    }
}
