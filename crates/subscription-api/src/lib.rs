//! 订阅服务 HTTP API
//!
//! 提供订阅记录的 CRUDL 和费用聚合 REST API。
//!
//! ## 核心功能
//!
//! - **订阅管理**：订阅的创建、查询、列表、更新和删除
//! - **费用聚合**：按月份区间统计订阅费用总和
//!
//! ## 模块结构
//!
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型定义
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据验证：validator
//! - 序列化：serde (camelCase)

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// 重新导出核心类型
pub use dto::{
    AggregateCostQuery, ApiResponse, CostSummaryDto, CreateSubscriptionRequest,
    ListSubscriptionsQuery, SubscriptionDto, UpdateSubscriptionRequest,
};
pub use error::{ApiError, Result};
pub use state::AppState;
