//! 服务层
//!
//! 实现订阅业务逻辑：输入校验、部分更新合并和仓储调用编排。
//!
//! ## 模块结构
//!
//! - `dto`: 数据传输对象定义
//! - `subscription_service`: 订阅服务

pub mod dto;
pub mod subscription_service;

pub use dto::{CreateSubscriptionInput, Patch, UpdateSubscriptionInput};
pub use subscription_service::SubscriptionService;
