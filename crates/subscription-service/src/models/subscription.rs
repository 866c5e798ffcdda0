//! 订阅实体定义

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::month::MonthDate;

/// 用户订阅记录
///
/// id 和 user_id 在创建后不可变更；end_date 为空表示开放式订阅（仍在生效）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    /// 服务名称（非空）
    pub service_name: String,
    /// 价格（最小货币单位，非负）
    pub price: i32,
    /// 所属用户 ID
    pub user_id: Uuid,
    /// 订阅开始月份
    pub start_date: MonthDate,
    /// 订阅结束月份（null 表示开放式订阅）
    #[sqlx(default)]
    pub end_date: Option<MonthDate>,
}

impl Subscription {
    /// 判断订阅生效区间是否与给定月份区间重叠
    ///
    /// 开放式订阅（end_date 为空）视为无限延伸
    pub fn overlaps(&self, period_start: MonthDate, period_end: MonthDate) -> bool {
        self.start_date <= period_end && self.end_date.is_none_or(|end| end >= period_start)
    }
}
