//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use sqlx::PgPool;
use std::sync::Arc;

use subscription_service::{SubscriptionRepository, SubscriptionService};

/// Axum 应用共享状态
///
/// 持有订阅服务实例，通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    /// 订阅服务
    pub service: Arc<SubscriptionService<SubscriptionRepository>>,
}

impl AppState {
    /// 由连接池装配仓储和服务
    pub fn new(pool: PgPool) -> Self {
        let repo = Arc::new(SubscriptionRepository::new(pool));
        Self {
            service: Arc::new(SubscriptionService::new(repo)),
        }
    }
}
