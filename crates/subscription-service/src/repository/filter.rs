//! 查询过滤条件与动态谓词构建
//!
//! List 和 AggregateCost 的过滤条件都是可选组合，WHERE 子句需要按
//! 实际出现的条件动态拼接。谓词构建器只拼接带编号占位符的 SQL 片段，
//! 参数值单独收集，由仓储层逐个绑定，杜绝字符串拼接注入。

use uuid::Uuid;

use crate::models::MonthDate;

/// 列表查询过滤条件
///
/// 两个条件都可选：user_id 精确匹配，service_name 大小写不敏感子串匹配
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

impl ListFilter {
    pub(crate) fn apply(&self, builder: &mut PredicateBuilder) {
        if let Some(user_id) = self.user_id {
            builder.equals("user_id", SqlParam::Uuid(user_id));
        }
        if let Some(name) = &self.service_name {
            builder.contains_ci("service_name", name);
        }
    }
}

/// 费用聚合过滤条件
///
/// 月份区间必填，用户和服务名称可选
#[derive(Debug, Clone)]
pub struct CostFilter {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
    pub period_start: MonthDate,
    pub period_end: MonthDate,
}

impl CostFilter {
    pub(crate) fn apply(&self, builder: &mut PredicateBuilder) {
        if let Some(user_id) = self.user_id {
            builder.equals("user_id", SqlParam::Uuid(user_id));
        }
        if let Some(name) = &self.service_name {
            builder.contains_ci("service_name", name);
        }

        // 区间重叠判定：订阅开始不晚于查询区间结束，
        // 且订阅为开放式或结束不早于查询区间开始
        builder.at_most("start_date", SqlParam::Month(self.period_end));
        builder.null_or_at_least("end_date", SqlParam::Month(self.period_start));
    }
}

/// 绑定参数
///
/// 仓储层按收集顺序逐个 bind，顺序与占位符编号一致
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SqlParam {
    Uuid(Uuid),
    Text(String),
    Month(MonthDate),
}

/// 动态 WHERE 子句构建器
///
/// 收集谓词片段和对应的绑定参数，以 AND 连接；
/// 没有任何谓词时不生成 WHERE 子句
#[derive(Debug, Default)]
pub(crate) struct PredicateBuilder {
    conditions: Vec<String>,
    params: Vec<SqlParam>,
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 下一个占位符编号（$1 起）
    fn placeholder(&self) -> usize {
        self.params.len() + 1
    }

    /// column = $n
    pub fn equals(&mut self, column: &str, param: SqlParam) {
        let n = self.placeholder();
        self.conditions.push(format!("{column} = ${n}"));
        self.params.push(param);
    }

    /// column ILIKE $n，参数包裹为 %needle%（大小写不敏感子串匹配）
    pub fn contains_ci(&mut self, column: &str, needle: &str) {
        let n = self.placeholder();
        self.conditions.push(format!("{column} ILIKE ${n}"));
        self.params.push(SqlParam::Text(format!("%{needle}%")));
    }

    /// column <= $n
    pub fn at_most(&mut self, column: &str, param: SqlParam) {
        let n = self.placeholder();
        self.conditions.push(format!("{column} <= ${n}"));
        self.params.push(param);
    }

    /// (column IS NULL OR column >= $n)
    pub fn null_or_at_least(&mut self, column: &str, param: SqlParam) {
        let n = self.placeholder();
        self.conditions
            .push(format!("({column} IS NULL OR {column} >= ${n})"));
        self.params.push(param);
    }

    /// 生成 WHERE 子句（带前导空格），没有谓词时返回空串
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// 取出按占位符顺序排列的参数列表
    pub fn into_params(self) -> Vec<SqlParam> {
        self.params
    }
}
