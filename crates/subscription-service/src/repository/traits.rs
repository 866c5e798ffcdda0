//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;
use uuid::Uuid;

use super::filter::{CostFilter, ListFilter};
use crate::error::Result;
use crate::models::Subscription;

/// 订阅仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepositoryTrait: Send + Sync {
    /// 插入新订阅
    async fn create(&self, sub: &Subscription) -> Result<()>;

    /// 按 ID 查询，不存在时返回 None（不是错误）
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Subscription>>;

    /// 按过滤条件列出订阅，无条件时返回全部
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Subscription>>;

    /// 按 ID 覆盖可变字段，影响零行时返回 NotFound
    async fn update(&self, sub: &Subscription) -> Result<()>;

    /// 按 ID 删除，删除不存在的记录不是错误
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// 统计匹配订阅的费用总和，无匹配时返回 0
    async fn aggregate_cost(&self, filter: &CostFilter) -> Result<i64>;
}
