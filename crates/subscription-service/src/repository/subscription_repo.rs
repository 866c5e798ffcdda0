//! 订阅仓储
//!
//! 提供订阅记录的数据访问，List 和 AggregateCost 的过滤条件
//! 通过谓词构建器动态拼接

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::filter::{CostFilter, ListFilter, PredicateBuilder, SqlParam};
use super::traits::SubscriptionRepositoryTrait;
use crate::error::{Result, SubscriptionError};
use crate::models::Subscription;

/// 订阅查询的列清单（复用于按 ID 查询和列表查询）
const SELECT_COLUMNS: &str =
    "SELECT id, service_name, price, user_id, start_date, end_date FROM subscriptions";

/// 订阅仓储
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 插入新订阅
    pub async fn create(&self, sub: &Subscription) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (id, service_name, price, user_id, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(sub.id)
        .bind(&sub.service_name)
        .bind(sub.price)
        .bind(sub.user_id)
        .bind(sub.start_date)
        .bind(sub.end_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 按 ID 查询订阅
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Subscription>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = $1");

        let sub = sqlx::query_as::<_, Subscription>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sub)
    }

    /// 按过滤条件列出订阅
    ///
    /// 结果顺序由数据库决定，调用方不应依赖
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<Subscription>> {
        let mut builder = PredicateBuilder::new();
        filter.apply(&mut builder);

        let sql = format!("{SELECT_COLUMNS}{}", builder.where_clause());

        let mut query = sqlx::query_as::<_, Subscription>(&sql);
        for param in builder.into_params() {
            query = match param {
                SqlParam::Uuid(v) => query.bind(v),
                SqlParam::Text(v) => query.bind(v),
                SqlParam::Month(v) => query.bind(v),
            };
        }

        let subs = query.fetch_all(&self.pool).await?;
        Ok(subs)
    }

    /// 按 ID 覆盖可变字段
    ///
    /// id 和 user_id 不参与更新；影响零行说明记录不存在
    pub async fn update(&self, sub: &Subscription) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions
            SET service_name = $2, price = $3, start_date = $4, end_date = $5
            WHERE id = $1
            "#,
        )
        .bind(sub.id)
        .bind(&sub.service_name)
        .bind(sub.price)
        .bind(sub.start_date)
        .bind(sub.end_date)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(SubscriptionError::NotFound(sub.id));
        }

        Ok(())
    }

    /// 按 ID 删除订阅（幂等）
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// 统计匹配订阅的费用总和
    ///
    /// COALESCE 保证无匹配时返回 0 而不是 NULL
    pub async fn aggregate_cost(&self, filter: &CostFilter) -> Result<i64> {
        let mut builder = PredicateBuilder::new();
        filter.apply(&mut builder);

        let sql = format!(
            "SELECT COALESCE(SUM(price), 0) FROM subscriptions{}",
            builder.where_clause()
        );

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for param in builder.into_params() {
            query = match param {
                SqlParam::Uuid(v) => query.bind(v),
                SqlParam::Text(v) => query.bind(v),
                SqlParam::Month(v) => query.bind(v),
            };
        }

        let total = query.fetch_one(&self.pool).await?;
        Ok(total)
    }
}

#[async_trait]
impl SubscriptionRepositoryTrait for SubscriptionRepository {
    async fn create(&self, sub: &Subscription) -> Result<()> {
        self.create(sub).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Subscription>> {
        self.get_by_id(id).await
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Subscription>> {
        self.list(filter).await
    }

    async fn update(&self, sub: &Subscription) -> Result<()> {
        self.update(sub).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.delete(id).await
    }

    async fn aggregate_cost(&self, filter: &CostFilter) -> Result<i64> {
        self.aggregate_cost(filter).await
    }
}
