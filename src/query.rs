use crate::config::PagingRules;
use crate::filter::{CompiledFilter, QueryParam, TypedValue};

/// Paging clause appended after the filter and ordering
const PAGING_CLAUSE: &str = "OFFSET @Start ROWS FETCH NEXT @Limit ROWS ONLY";

/// Base queries used to search one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSource {
    pub select: &'static str,
    pub count: &'static str,
    pub order_by: &'static str,
}

/// A window into the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start: u32,
    pub limit: u32,
}

impl Page {
    /// Apply the configured default and maximum page size
    pub fn clamped(start: Option<u32>, limit: Option<u32>, rules: &PagingRules) -> Self {
        let limit = limit
            .unwrap_or(rules.default_limit)
            .clamp(1, rules.max_limit.max(1));
        Page {
            start: start.unwrap_or(0),
            limit,
        }
    }
}

/// The statements a persistence layer runs for one search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatement {
    /// Page of matching rows
    pub select: String,
    /// Total number of matching rows
    pub count: String,
    /// Filter parameters followed by `Start` and `Limit`, bound to `select`
    pub select_parameters: Vec<QueryParam>,
    /// Filter parameters only, bound to `count`
    pub count_parameters: Vec<QueryParam>,
}

pub fn build_search(source: &SearchSource, filter: &CompiledFilter, page: Page) -> SearchStatement {
    let select = join_clauses(&[source.select, filter.text.as_str(), source.order_by, PAGING_CLAUSE]);
    let count = join_clauses(&[source.count, filter.text.as_str()]);

    let mut select_parameters = filter.parameters.clone();
    select_parameters.push(QueryParam::new("Start", TypedValue::Int32(to_i32(page.start))));
    select_parameters.push(QueryParam::new("Limit", TypedValue::Int32(to_i32(page.limit))));

    SearchStatement {
        select,
        count,
        select_parameters,
        count_parameters: filter.parameters.clone(),
    }
}

fn to_i32(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

fn join_clauses(clauses: &[&str]) -> String {
    clauses
        .iter()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
