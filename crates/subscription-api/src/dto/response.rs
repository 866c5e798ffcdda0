//! 响应 DTO 定义
//!
//! 所有 REST API 的响应体结构

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use subscription_service::{MonthDate, Subscription};

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（无数据）
    pub fn success_empty() -> ApiResponse<()> {
        ApiResponse {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: None,
        }
    }
}

/// 订阅响应 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDto {
    pub id: Uuid,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    /// 开始月份，格式 MM-YYYY
    pub start_date: MonthDate,
    /// 结束月份，null 表示开放式订阅
    pub end_date: Option<MonthDate>,
}

impl From<Subscription> for SubscriptionDto {
    fn from(sub: Subscription) -> Self {
        Self {
            id: sub.id,
            service_name: sub.service_name,
            price: sub.price,
            user_id: sub.user_id,
            start_date: sub.start_date,
            end_date: sub.end_date,
        }
    }
}

/// 费用聚合响应 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummaryDto {
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_subscription() -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            service_name: "Netflix".to_string(),
            price: 999,
            user_id: Uuid::new_v4(),
            start_date: "01-2025".parse().unwrap(),
            end_date: None,
        }
    }

    #[test]
    fn test_subscription_dto_conversion() {
        let sub = create_test_subscription();
        let dto: SubscriptionDto = sub.clone().into();

        assert_eq!(dto.id, sub.id);
        assert_eq!(dto.service_name, "Netflix");
        assert_eq!(dto.price, 999);
        assert_eq!(dto.end_date, None);
    }

    #[test]
    fn test_api_response_shape() {
        let dto: SubscriptionDto = create_test_subscription().into();
        let response = ApiResponse::success(dto);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], serde_json::json!(true));
        assert_eq!(json["code"], serde_json::json!("SUCCESS"));
        assert_eq!(json["data"]["serviceName"], serde_json::json!("Netflix"));
        assert_eq!(json["data"]["startDate"], serde_json::json!("01-2025"));
    }

    #[test]
    fn test_empty_response_omits_data() {
        let response = ApiResponse::<()>::success_empty();
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("data").is_none());
        assert_eq!(json["success"], serde_json::json!(true));
    }
}
