//! 请求 DTO 定义
//!
//! 所有 REST API 的请求参数和请求体结构。
//! 月份字段使用 MM-YYYY 格式的字符串，反序列化为 MonthDate。

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use subscription_service::service::dto::{
    CreateSubscriptionInput, Patch, UpdateSubscriptionInput,
};
use subscription_service::MonthDate;

/// 创建订阅请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    #[validate(length(min = 1, max = 200, message = "服务名称长度必须在1-200个字符之间"))]
    pub service_name: String,
    pub user_id: Uuid,
    /// 开始月份，格式 MM-YYYY
    pub start_date: MonthDate,
    /// 结束月份，可选，格式 MM-YYYY
    pub end_date: Option<MonthDate>,
    #[validate(range(min = 0, message = "价格不能为负数"))]
    pub price: i32,
}

impl From<CreateSubscriptionRequest> for CreateSubscriptionInput {
    fn from(req: CreateSubscriptionRequest) -> Self {
        Self {
            service_name: req.service_name,
            user_id: req.user_id,
            start_date: req.start_date,
            end_date: req.end_date,
            price: req.price,
        }
    }
}

/// 更新订阅请求
///
/// 所有字段可选，缺省字段不修改；
/// endDate 显式传 null 表示清除结束月份（转为开放式订阅）
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    #[validate(length(min = 1, max = 200, message = "服务名称长度必须在1-200个字符之间"))]
    pub service_name: Option<String>,
    #[validate(range(min = 0, message = "价格不能为负数"))]
    pub price: Option<i32>,
    pub start_date: Option<MonthDate>,
    #[serde(default)]
    pub end_date: Patch<MonthDate>,
}

impl From<UpdateSubscriptionRequest> for UpdateSubscriptionInput {
    fn from(req: UpdateSubscriptionRequest) -> Self {
        Self {
            service_name: req.service_name,
            price: req.price,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// 列表查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubscriptionsQuery {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

/// 费用聚合查询参数
///
/// 月份区间必填，用户和服务名称可选
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCostQuery {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
    pub start_period: MonthDate,
    pub end_period: MonthDate,
}
