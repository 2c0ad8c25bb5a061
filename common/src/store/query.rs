//! PostgREST select builder.

/// A `GET /rest/v1/{table}` request description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<(String, bool)>,
    limit: Option<u32>,
}

impl Default for Select {
    fn default() -> Self {
        Self {
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }
}

impl Select {
    /// Selects every column.
    pub fn all() -> Self {
        Self::default()
    }

    /// Selects the given comma-separated columns.
    pub fn columns(columns: impl Into<String>) -> Self {
        Self {
            columns: columns.into(),
            ..Self::default()
        }
    }

    /// Adds an equality filter `column = value`.
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((column.into(), format!("eq.{}", value.to_string())));
        self
    }

    /// Orders by `column`, descending when `ascending` is false.
    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some((column.into(), ascending));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs in PostgREST syntax.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.columns.clone())];
        pairs.extend(self.filters.iter().cloned());
        if let Some((column, ascending)) = &self.order {
            let direction = if *ascending { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{column}.{direction}")));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Equality filter pairs used by update and delete.
pub fn eq_filter(column: &str, value: &str) -> [(String, String); 1] {
    [(column.to_string(), format!("eq.{value}"))]
}
