//! Optional `WHERE` clause composition.

use super::{quote_ident, Fragments, SqlValue};

/// A composed filter and its positional values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterClause {
    /// Conditions joined with `AND`, without the `WHERE` keyword. Empty when
    /// nothing filters.
    pub where_clause: String,
    pub values: Vec<SqlValue>,
}

impl FilterClause {
    pub fn is_empty(&self) -> bool {
        self.where_clause.is_empty()
    }

    /// `WHERE <conditions>`, or an empty string so no bare `WHERE` is emitted.
    pub fn to_sql(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.where_clause)
        }
    }
}

/// Accumulates `AND`-ed conditions over allow-listed columns.
///
/// Conditions appear in the order they are added. Only conditions that take a
/// value consume a placeholder; `$N` always matches `values[N - 1]`.
#[derive(Debug, Default)]
pub struct WhereBuilder {
    fragments: Fragments,
}

impl WhereBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match.
    pub fn and_contains(&mut self, column: &'static str, text: &str) -> &mut Self {
        let placeholder = self
            .fragments
            .bind(SqlValue::Text(format!("%{}%", escape_like(text))));
        self.fragments
            .push(format!("{} ILIKE {}", quote_ident(column), placeholder));
        self
    }

    pub fn and_gte(&mut self, column: &'static str, value: impl Into<SqlValue>) -> &mut Self {
        let placeholder = self.fragments.bind(value.into());
        self.fragments
            .push(format!("{} >= {}", quote_ident(column), placeholder));
        self
    }

    pub fn and_lte(&mut self, column: &'static str, value: impl Into<SqlValue>) -> &mut Self {
        let placeholder = self.fragments.bind(value.into());
        self.fragments
            .push(format!("{} <= {}", quote_ident(column), placeholder));
        self
    }

    /// `column > 0`; binds nothing.
    pub fn and_positive(&mut self, column: &'static str) -> &mut Self {
        self.fragments.push(format!("{} > 0", quote_ident(column)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn build(self) -> FilterClause {
        let (where_clause, values) = self.fragments.finish(" AND ");
        FilterClause {
            where_clause,
            values,
        }
    }
}

/// Escapes LIKE metacharacters so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder_yields_empty_clause() {
        let clause = WhereBuilder::new().build();
        assert!(clause.is_empty());
        assert_eq!(clause.where_clause, "");
        assert!(clause.values.is_empty());
        assert_eq!(clause.to_sql(), "");
    }

    #[test]
    fn test_flag_between_bound_conditions_skips_index() {
        let mut b = WhereBuilder::new();
        b.and_contains("title", "j3")
            .and_positive("equity")
            .and_gte("salary", 3);
        let clause = b.build();

        assert_eq!(
            clause.where_clause,
            "\"title\" ILIKE $1 AND \"equity\" > 0 AND \"salary\" >= $2"
        );
        assert_eq!(
            clause.values,
            vec![SqlValue::Text("%j3%".to_string()), SqlValue::Int(3)]
        );
        assert_eq!(
            clause.to_sql(),
            "WHERE \"title\" ILIKE $1 AND \"equity\" > 0 AND \"salary\" >= $2"
        );
    }

    #[test]
    fn test_range_conditions() {
        let mut b = WhereBuilder::new();
        b.and_gte("num_employees", 2).and_lte("num_employees", 10);
        let clause = b.build();
        assert_eq!(
            clause.where_clause,
            "\"num_employees\" >= $1 AND \"num_employees\" <= $2"
        );
        assert_eq!(clause.values, vec![SqlValue::Int(2), SqlValue::Int(10)]);
    }

    #[test]
    fn test_contains_escapes_like_metacharacters() {
        let mut b = WhereBuilder::new();
        b.and_contains("name", "50%_off\\");
        assert_eq!(
            b.build().values,
            vec![SqlValue::Text("%50\\%\\_off\\\\%".to_string())]
        );
    }

    #[test]
    fn test_flag_only_has_no_values() {
        let mut b = WhereBuilder::new();
        b.and_positive("equity");
        assert!(!b.is_empty());
        let clause = b.build();
        assert_eq!(clause.where_clause, "\"equity\" > 0");
        assert!(clause.values.is_empty());
    }
}
