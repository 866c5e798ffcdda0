//! 月份粒度日期类型
//!
//! 订阅的起止时间只精确到月，对外使用 MM-YYYY 格式。
//! 内部以当月第一天的 NaiveDate 表示，持久化为 DATE 列。

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// 月份解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("无效的月份格式，期望 MM-YYYY: {0}")]
pub struct ParseMonthError(String);

/// 月份粒度日期
///
/// 始终规范化为当月第一天，保证比较和存储的一致性。
/// 序列化为 MM-YYYY 字符串（如 "01-2025"）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct MonthDate(NaiveDate);

impl MonthDate {
    /// 由年和月构造，月份非法时返回 None
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// 由任意日期构造，截断到当月第一天
    pub fn from_date(date: NaiveDate) -> Self {
        match NaiveDate::from_ymd_opt(date.year(), date.month(), 1) {
            Some(first) => Self(first),
            // 同年同月的第一天必然存在，此分支不可达
            None => Self(date),
        }
    }

    /// 取内部日期（当月第一天）
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl fmt::Display for MonthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.0.month(), self.0.year())
    }
}

impl FromStr for MonthDate {
    type Err = ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (month_part, year_part) = s
            .split_once('-')
            .ok_or_else(|| ParseMonthError(s.to_string()))?;

        if month_part.len() != 2 || year_part.len() != 4 {
            return Err(ParseMonthError(s.to_string()));
        }

        let month: u32 = month_part
            .parse()
            .map_err(|_| ParseMonthError(s.to_string()))?;
        let year: i32 = year_part
            .parse()
            .map_err(|_| ParseMonthError(s.to_string()))?;

        MonthDate::new(year, month).ok_or_else(|| ParseMonthError(s.to_string()))
    }
}

impl Serialize for MonthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
