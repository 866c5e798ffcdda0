//! 订阅服务
//!
//! 在仓储之上实现领域规则：输入校验在任何持久化调用之前完成（快速失败），
//! 部分更新先取现有记录、合并后按创建时的完整约束重新校验。
//!
//! 并发说明：同一订阅的并发更新为「后写覆盖」语义，没有乐观并发控制。

use std::sync::Arc;

use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::error::{Result, SubscriptionError};
use crate::models::{MonthDate, Subscription};
use crate::repository::{CostFilter, ListFilter, SubscriptionRepositoryTrait};
use crate::service::dto::{CreateSubscriptionInput, UpdateSubscriptionInput};

/// 订阅服务
///
/// 泛型仓储参数便于单元测试注入 mock 实现
pub struct SubscriptionService<R>
where
    R: SubscriptionRepositoryTrait,
{
    repo: Arc<R>,
}

impl<R> SubscriptionService<R>
where
    R: SubscriptionRepositoryTrait,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// 创建订阅
    ///
    /// 校验通过后由服务端分配 ID
    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    pub async fn create(&self, input: CreateSubscriptionInput) -> Result<Subscription> {
        validate_service_name(&input.service_name)?;
        validate_price(input.price)?;
        validate_date_range(input.start_date, input.end_date)?;

        let sub = Subscription {
            id: Uuid::new_v4(),
            service_name: input.service_name,
            price: input.price,
            user_id: input.user_id,
            start_date: input.start_date,
            end_date: input.end_date,
        };

        self.repo.create(&sub).await.map_err(|e| {
            error!(subscription_id = %sub.id, error = %e, "Failed to persist subscription");
            e
        })?;

        info!(subscription_id = %sub.id, "Subscription created");
        Ok(sub)
    }

    /// 按 ID 查询订阅
    ///
    /// 不存在时返回 NotFound，读取路径上这是正常结果而非异常
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Subscription> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(SubscriptionError::NotFound(id))
    }

    /// 按过滤条件列出订阅
    ///
    /// 无匹配时返回空列表，不是错误
    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: ListFilter) -> Result<Vec<Subscription>> {
        let subs = self.repo.list(&filter).await?;
        info!(count = subs.len(), "Subscriptions listed");
        Ok(subs)
    }

    /// 部分更新订阅
    ///
    /// 只覆盖输入中出现的字段，合并结果需重新满足与创建相同的约束
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: UpdateSubscriptionInput) -> Result<Subscription> {
        let mut sub = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(SubscriptionError::NotFound(id))?;

        if let Some(service_name) = input.service_name {
            validate_service_name(&service_name)?;
            sub.service_name = service_name;
        }
        if let Some(price) = input.price {
            validate_price(price)?;
            sub.price = price;
        }
        if let Some(start_date) = input.start_date {
            sub.start_date = start_date;
        }
        sub.end_date = input.end_date.apply(sub.end_date);

        validate_date_range(sub.start_date, sub.end_date)?;

        self.repo.update(&sub).await.map_err(|e| {
            error!(subscription_id = %id, error = %e, "Failed to update subscription");
            e
        })?;

        info!(subscription_id = %id, "Subscription updated");
        Ok(sub)
    }

    /// 删除订阅
    ///
    /// 幂等操作：删除不存在的记录同样成功
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repo.delete(id).await.map_err(|e| {
            error!(subscription_id = %id, error = %e, "Failed to delete subscription");
            e
        })?;

        info!(subscription_id = %id, "Subscription deleted");
        Ok(())
    }

    /// 统计月份区间内匹配订阅的费用总和
    #[instrument(skip(self, filter))]
    pub async fn aggregate_cost(&self, filter: CostFilter) -> Result<i64> {
        if filter.period_start > filter.period_end {
            return Err(SubscriptionError::invalid_input(
                "period",
                format!(
                    "起始月份 {} 晚于结束月份 {}",
                    filter.period_start, filter.period_end
                ),
            ));
        }

        let total = self.repo.aggregate_cost(&filter).await?;
        info!(total, "Subscription cost aggregated");
        Ok(total)
    }
}

fn validate_service_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SubscriptionError::invalid_input(
            "service_name",
            "服务名称不能为空",
        ));
    }
    Ok(())
}

fn validate_price(price: i32) -> Result<()> {
    if price < 0 {
        return Err(SubscriptionError::invalid_input(
            "price",
            format!("价格不能为负数: {price}"),
        ));
    }
    Ok(())
}

fn validate_date_range(start: MonthDate, end: Option<MonthDate>) -> Result<()> {
    if let Some(end) = end {
        if end < start {
            return Err(SubscriptionError::invalid_input(
                "end_date",
                format!("结束月份 {end} 早于开始月份 {start}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockSubscriptionRepositoryTrait;
    use crate::service::dto::Patch;

    fn month(s: &str) -> MonthDate {
        s.parse().unwrap()
    }

    fn create_input() -> CreateSubscriptionInput {
        CreateSubscriptionInput {
            service_name: "Netflix".to_string(),
            user_id: Uuid::new_v4(),
            start_date: month("01-2025"),
            end_date: None,
            price: 999,
        }
    }

    fn existing_subscription() -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            service_name: "Netflix".to_string(),
            price: 999,
            user_id: Uuid::new_v4(),
            start_date: month("01-2025"),
            end_date: Some(month("06-2025")),
        }
    }

    fn service_with(repo: MockSubscriptionRepositoryTrait) -> SubscriptionService<MockSubscriptionRepositoryTrait> {
        SubscriptionService::new(Arc::new(repo))
    }

    // ---- Create ----

    #[tokio::test]
    async fn test_create_assigns_id_and_persists() {
        let input = create_input();
        let user_id = input.user_id;

        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_create()
            .withf(move |sub| {
                sub.service_name == "Netflix"
                    && sub.price == 999
                    && sub.user_id == user_id
                    && sub.end_date.is_none()
            })
            .times(1)
            .returning(|_| Ok(()));

        let sub = service_with(repo).create(input).await.unwrap();
        assert_eq!(sub.service_name, "Netflix");
        assert_eq!(sub.price, 999);
        assert!(!sub.id.is_nil());
    }

    #[tokio::test]
    async fn test_create_rejects_empty_service_name() {
        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_create().never();

        let input = CreateSubscriptionInput {
            service_name: "   ".to_string(),
            ..create_input()
        };

        let err = service_with(repo).create(input).await.unwrap_err();
        match err {
            SubscriptionError::InvalidInput { field, .. } => assert_eq!(field, "service_name"),
            other => panic!("期望 InvalidInput，实际: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_create().never();

        let input = CreateSubscriptionInput {
            price: -1,
            ..create_input()
        };

        let err = service_with(repo).create(input).await.unwrap_err();
        match err {
            SubscriptionError::InvalidInput { field, .. } => assert_eq!(field, "price"),
            other => panic!("期望 InvalidInput，实际: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_end_before_start() {
        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_create().never();

        let input = CreateSubscriptionInput {
            start_date: month("06-2025"),
            end_date: Some(month("01-2025")),
            ..create_input()
        };

        let err = service_with(repo).create(input).await.unwrap_err();
        match err {
            SubscriptionError::InvalidInput { field, .. } => assert_eq!(field, "end_date"),
            other => panic!("期望 InvalidInput，实际: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_accepts_equal_start_and_end() {
        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_create().times(1).returning(|_| Ok(()));

        let input = CreateSubscriptionInput {
            start_date: month("03-2025"),
            end_date: Some(month("03-2025")),
            ..create_input()
        };

        assert!(service_with(repo).create(input).await.is_ok());
    }

    // ---- Get ----

    #[tokio::test]
    async fn test_get_maps_absent_to_not_found() {
        let id = Uuid::new_v4();

        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let err = service_with(repo).get(id).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::NotFound(found) if found == id));
    }

    #[tokio::test]
    async fn test_get_returns_existing() {
        let existing = existing_subscription();
        let id = existing.id;
        let expected = existing.clone();

        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));

        let sub = service_with(repo).get(id).await.unwrap();
        assert_eq!(sub, expected);
    }

    // ---- List ----

    #[tokio::test]
    async fn test_list_returns_empty_vec_when_nothing_matches() {
        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_list().returning(|_| Ok(vec![]));

        let subs = service_with(repo).list(ListFilter::default()).await.unwrap();
        assert!(subs.is_empty());
    }

    #[tokio::test]
    async fn test_list_passes_filter_through() {
        let user_id = Uuid::new_v4();

        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_list()
            .withf(move |filter| {
                filter.user_id == Some(user_id)
                    && filter.service_name.as_deref() == Some("flix")
            })
            .times(1)
            .returning(|_| Ok(vec![]));

        let filter = ListFilter {
            user_id: Some(user_id),
            service_name: Some("flix".to_string()),
        };
        service_with(repo).list(filter).await.unwrap();
    }

    // ---- Update ----

    #[tokio::test]
    async fn test_update_price_only_keeps_other_fields() {
        let existing = existing_subscription();
        let id = existing.id;
        let fetched = existing.clone();

        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(fetched.clone())));
        repo.expect_update()
            .withf(move |sub| {
                sub.id == id
                    && sub.price == 1099
                    && sub.service_name == "Netflix"
                    && sub.start_date == month("01-2025")
                    && sub.end_date == Some(month("06-2025"))
            })
            .times(1)
            .returning(|_| Ok(()));

        let input = UpdateSubscriptionInput {
            price: Some(1099),
            ..Default::default()
        };

        let updated = service_with(repo).update(id, input).await.unwrap();
        assert_eq!(updated.price, 1099);
        assert_eq!(updated.service_name, "Netflix");
    }

    #[tokio::test]
    async fn test_update_clears_end_date_with_explicit_null() {
        let existing = existing_subscription();
        let id = existing.id;
        let fetched = existing.clone();

        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(fetched.clone())));
        repo.expect_update()
            .withf(|sub| sub.end_date.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let input = UpdateSubscriptionInput {
            end_date: Patch::Clear,
            ..Default::default()
        };

        let updated = service_with(repo).update(id, input).await.unwrap();
        assert_eq!(updated.end_date, None);
    }

    #[tokio::test]
    async fn test_update_missing_record_returns_not_found() {
        let id = Uuid::new_v4();

        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let err = service_with(repo)
            .update(id, UpdateSubscriptionInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubscriptionError::NotFound(found) if found == id));
    }

    #[tokio::test]
    async fn test_update_revalidates_merged_record() {
        // 现有记录 start=01-2025；补丁把 end 设到更早的月份，
        // 合并后违反 end >= start，必须在持久化之前拒绝
        let existing = existing_subscription();
        let id = existing.id;
        let fetched = existing.clone();

        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(fetched.clone())));
        repo.expect_update().never();

        let input = UpdateSubscriptionInput {
            end_date: Patch::Set(month("12-2024")),
            ..Default::default()
        };

        let err = service_with(repo).update(id, input).await.unwrap_err();
        match err {
            SubscriptionError::InvalidInput { field, .. } => assert_eq!(field, "end_date"),
            other => panic!("期望 InvalidInput，实际: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_rejects_empty_service_name() {
        let existing = existing_subscription();
        let id = existing.id;
        let fetched = existing.clone();

        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(fetched.clone())));
        repo.expect_update().never();

        let input = UpdateSubscriptionInput {
            service_name: Some(String::new()),
            ..Default::default()
        };

        let err = service_with(repo).update(id, input).await.unwrap_err();
        match err {
            SubscriptionError::InvalidInput { field, .. } => assert_eq!(field, "service_name"),
            other => panic!("期望 InvalidInput，实际: {other:?}"),
        }
    }

    // ---- Delete ----

    #[tokio::test]
    async fn test_delete_delegates_and_is_idempotent() {
        let id = Uuid::new_v4();

        // 仓储对不存在的 ID 也返回 Ok，服务层不做存在性检查
        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_delete()
            .withf(move |target| *target == id)
            .times(2)
            .returning(|_| Ok(()));

        let service = service_with(repo);
        service.delete(id).await.unwrap();
        service.delete(id).await.unwrap();
    }

    // ---- AggregateCost ----

    #[tokio::test]
    async fn test_aggregate_rejects_inverted_period() {
        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_aggregate_cost().never();

        let filter = CostFilter {
            user_id: None,
            service_name: None,
            period_start: month("12-2025"),
            period_end: month("01-2025"),
        };

        let err = service_with(repo).aggregate_cost(filter).await.unwrap_err();
        match err {
            SubscriptionError::InvalidInput { field, .. } => assert_eq!(field, "period"),
            other => panic!("期望 InvalidInput，实际: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_aggregate_returns_repository_total() {
        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_aggregate_cost().returning(|_| Ok(1998));

        let filter = CostFilter {
            user_id: None,
            service_name: None,
            period_start: month("01-2025"),
            period_end: month("12-2025"),
        };

        let total = service_with(repo).aggregate_cost(filter).await.unwrap();
        assert_eq!(total, 1998);
    }

    #[tokio::test]
    async fn test_aggregate_zero_when_nothing_matches() {
        let mut repo = MockSubscriptionRepositoryTrait::new();
        repo.expect_aggregate_cost().returning(|_| Ok(0));

        let filter = CostFilter {
            user_id: Some(Uuid::new_v4()),
            service_name: None,
            period_start: month("01-2025"),
            period_end: month("01-2025"),
        };

        let total = service_with(repo).aggregate_cost(filter).await.unwrap();
        assert_eq!(total, 0);
    }
}
