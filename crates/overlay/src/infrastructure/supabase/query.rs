//! PostgREST query builder
//!
//! Renders the small subset of PostgREST filters the overlay needs:
//! column projection, equality filters, ascending order and a row limit.

use url::Url;

use crate::ports::outbound::RemoteFetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    table: &'static str,
    select: String,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl TableQuery {
    pub fn table(table: &'static str) -> Self {
        Self {
            table,
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn select(mut self, columns: &[&str]) -> Self {
        self.select = columns.join(",");
        self
    }

    /// `column = value`
    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push((column.to_string(), format!("eq.{}", value.into())));
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some(format!("{column}.asc"));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn table_name(&self) -> &'static str {
        self.table
    }

    /// Resolve against the project URL: `<base>/rest/v1/<table>?...`.
    pub fn to_url(&self, base: &Url) -> Result<Url, RemoteFetchError> {
        let mut url = base
            .join(&format!("rest/v1/{}", self.table))
            .map_err(|e| RemoteFetchError::InvalidUrl(e.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", &self.select);
            for (column, filter) in &self.filters {
                pairs.append_pair(column, filter);
            }
            if let Some(order) = &self.order {
                pairs.append_pair("order", order);
            }
            if let Some(limit) = self.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }

        Ok(url)
    }
}
