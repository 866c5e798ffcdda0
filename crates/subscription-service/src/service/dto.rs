//! 服务层数据传输对象

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::models::MonthDate;

/// 创建订阅输入
#[derive(Debug, Clone)]
pub struct CreateSubscriptionInput {
    pub service_name: String,
    pub user_id: Uuid,
    pub start_date: MonthDate,
    pub end_date: Option<MonthDate>,
    pub price: i32,
}

/// 部分更新输入
///
/// Option 字段为 None 表示不修改；end_date 可被清除，
/// 用三态 Patch 区分「不修改」和「清除」
#[derive(Debug, Clone, Default)]
pub struct UpdateSubscriptionInput {
    pub service_name: Option<String>,
    pub price: Option<i32>,
    pub start_date: Option<MonthDate>,
    pub end_date: Patch<MonthDate>,
}

impl UpdateSubscriptionInput {
    /// 是否未携带任何变更
    pub fn is_empty(&self) -> bool {
        self.service_name.is_none()
            && self.price.is_none()
            && self.start_date.is_none()
            && self.end_date.is_unchanged()
    }
}

/// 可清除字段的三态补丁
///
/// JSON 中字段缺失表示 Unchanged（需配合 `#[serde(default)]`），
/// 显式 null 表示 Clear，给定值表示 Set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// 将补丁应用到当前值
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Unchanged => current,
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // 只有字段出现时才会走到这里：null -> Clear，值 -> Set；
        // 字段缺失由 #[serde(default)] 落到 Unchanged
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => Patch::Clear,
            Some(value) => Patch::Set(value),
        })
    }
}
