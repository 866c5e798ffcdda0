//! 订阅管理服务
//!
//! 提供用户订阅记录的 CRUDL 操作和费用聚合查询。
//!
//! ## 核心功能
//!
//! - **订阅管理**：订阅记录的创建、查询、列表、更新和删除
//! - **动态过滤**：按用户和服务名称（大小写不敏感子串）组合过滤
//! - **费用聚合**：按月份区间统计订阅费用总和，采用区间重叠判定
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `repository`: 数据库仓储层
//! - `service`: 业务服务层

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{Result, SubscriptionError};
pub use models::{MonthDate, ParseMonthError, Subscription};
pub use repository::{CostFilter, ListFilter, SubscriptionRepository, SubscriptionRepositoryTrait};
pub use service::{
    CreateSubscriptionInput, Patch, SubscriptionService, UpdateSubscriptionInput, dto,
};
