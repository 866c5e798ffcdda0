//! 订阅 API 处理器
//!
//! 实现订阅的 CRUDL 操作及费用聚合查询

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use subscription_service::repository::{CostFilter, ListFilter};

use crate::{
    dto::{
        AggregateCostQuery, ApiResponse, CostSummaryDto, CreateSubscriptionRequest,
        ListSubscriptionsQuery, SubscriptionDto, UpdateSubscriptionRequest,
    },
    error::ApiError,
    state::AppState,
};

/// 创建订阅
///
/// POST /subscriptions
pub async fn create_subscription(
    State(state): State<AppState>,
    Json(req): Json<CreateSubscriptionRequest>,
) -> Result<Json<ApiResponse<SubscriptionDto>>, ApiError> {
    req.validate()?;

    let sub = state.service.create(req.into()).await?;

    info!(subscription_id = %sub.id, user_id = %sub.user_id, "Subscription created");
    Ok(Json(ApiResponse::success(sub.into())))
}

/// 获取订阅详情
///
/// GET /subscriptions/{id}
pub async fn get_subscription(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SubscriptionDto>>, ApiError> {
    let sub = state.service.get(id).await?;
    Ok(Json(ApiResponse::success(sub.into())))
}

/// 获取订阅列表
///
/// GET /subscriptions
///
/// 可选按 userId 精确过滤、按 serviceName 大小写不敏感子串过滤
pub async fn list_subscriptions(
    State(state): State<AppState>,
    Query(query): Query<ListSubscriptionsQuery>,
) -> Result<Json<ApiResponse<Vec<SubscriptionDto>>>, ApiError> {
    let filter = ListFilter {
        user_id: query.user_id,
        // 空字符串视为未提供过滤条件
        service_name: query.service_name.filter(|s| !s.is_empty()),
    };

    let subs = state.service.list(filter).await?;

    let items: Vec<SubscriptionDto> = subs.into_iter().map(Into::into).collect();
    info!(count = items.len(), "Subscriptions listed");
    Ok(Json(ApiResponse::success(items)))
}

/// 更新订阅
///
/// PUT /subscriptions/{id}
///
/// 部分更新：缺省字段不修改，endDate 显式传 null 表示清除
pub async fn update_subscription(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSubscriptionRequest>,
) -> Result<Json<ApiResponse<SubscriptionDto>>, ApiError> {
    req.validate()?;

    let sub = state.service.update(id, req.into()).await?;

    info!(subscription_id = %id, "Subscription updated");
    Ok(Json(ApiResponse::success(sub.into())))
}

/// 删除订阅
///
/// DELETE /subscriptions/{id}
///
/// 幂等操作：删除不存在的订阅同样返回成功
pub async fn delete_subscription(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.service.delete(id).await?;

    info!(subscription_id = %id, "Subscription deleted");
    Ok(Json(ApiResponse::<()>::success_empty()))
}

/// 聚合订阅费用
///
/// GET /subscriptions/aggregate
///
/// 统计月份区间内匹配订阅的价格总和，区间与订阅生效期做重叠判定
pub async fn aggregate_cost(
    State(state): State<AppState>,
    Query(query): Query<AggregateCostQuery>,
) -> Result<Json<ApiResponse<CostSummaryDto>>, ApiError> {
    let filter = CostFilter {
        user_id: query.user_id,
        service_name: query.service_name.filter(|s| !s.is_empty()),
        period_start: query.start_period,
        period_end: query.end_period,
    };

    let total = state.service.aggregate_cost(filter).await?;

    info!(total, "Subscription cost aggregated");
    Ok(Json(ApiResponse::success(CostSummaryDto { total })))
}
