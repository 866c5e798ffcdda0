//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{handlers, state::AppState};

/// 构建订阅相关的路由
///
/// 包含订阅的 CRUDL 操作和费用聚合查询
pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/subscriptions",
            post(handlers::subscription::create_subscription),
        )
        .route(
            "/subscriptions",
            get(handlers::subscription::list_subscriptions),
        )
        // 静态段须先于参数段注册，避免 "aggregate" 被当作订阅 ID
        .route(
            "/subscriptions/aggregate",
            get(handlers::subscription::aggregate_cost),
        )
        .route(
            "/subscriptions/{id}",
            get(handlers::subscription::get_subscription),
        )
        .route(
            "/subscriptions/{id}",
            put(handlers::subscription::update_subscription),
        )
        .route(
            "/subscriptions/{id}",
            delete(handlers::subscription::delete_subscription),
        )
}

/// 构建完整的 API 路由
///
/// 返回所有 API 路由（不含前缀，由调用方在 main.rs 中挂载）
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(subscription_routes())
}
