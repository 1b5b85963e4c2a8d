//! SQL behind every route. Request values are always bound as parameters.

pub mod adaptations;
pub mod analytics;
pub mod books;
pub mod genres;
pub mod movies;
pub mod users;

use sea_orm::{ConnectionTrait, Statement, Value};

use crate::error::{AppError, AppResult};

pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Page {
    pub fn new(limit: Option<u64>, offset: Option<u64>, default_limit: u64) -> Self {
        Self {
            limit: limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE),
            offset: offset.unwrap_or(0),
        }
    }

    /// `LIMIT ? OFFSET ?` bindings.
    pub fn values(&self) -> [Value; 2] {
        [(self.limit as i64).into(), (self.offset.min(i64::MAX as u64) as i64).into()]
    }
}

/// Book ids are positive integers; anything else names no book.
pub fn parse_book_id(raw: &str) -> AppResult<i32> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::NotFound),
    }
}

/// IMDb title ids look like `tt0111161`.
pub fn parse_tconst(raw: &str) -> AppResult<String> {
    let raw = raw.trim();
    let valid = raw
        .strip_prefix("tt")
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
    if valid { Ok(raw.to_string()) } else { Err(AppError::NotFound) }
}

/// Accumulates `WHERE` clauses together with their bound values.
#[derive(Debug, Default)]
pub(crate) struct Filters {
    clauses: Vec<String>,
    values: Vec<Value>,
}

impl Filters {
    pub fn push(&mut self, clause: &str, values: impl IntoIterator<Item = Value>) {
        self.clauses.push(clause.to_string());
        self.values.extend(values);
    }

    /// Case-insensitive substring match; `clause` holds one `?` per copy of the pattern.
    pub fn contains(&mut self, clause: &str, needle: Option<&str>) {
        let Some(needle) = needle.map(str::trim).filter(|s| !s.is_empty()) else {
            return;
        };
        let pattern = like_pattern(needle);
        let n = clause.matches('?').count();
        self.push(clause, std::iter::repeat_n(Value::from(pattern), n));
    }

    pub fn range<T>(
        &mut self,
        expr: &str,
        name: &str,
        low: Option<T>,
        high: Option<T>,
    ) -> AppResult<()>
    where
        T: PartialOrd + Into<Value> + Copy,
    {
        if let (Some(low), Some(high)) = (low, high) {
            if low > high {
                return Err(AppError::bad_request(format!(
                    "{name}_low must not be greater than {name}_high"
                )));
            }
        }
        if let Some(low) = low {
            self.push(&format!("{expr} >= ?"), [low.into()]);
        }
        if let Some(high) = high {
            self.push(&format!("{expr} <= ?"), [high.into()]);
        }
        Ok(())
    }

    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

pub(crate) fn like_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

pub(crate) fn statement<C: ConnectionTrait>(db: &C, sql: &str, values: Vec<Value>) -> Statement {
    Statement::from_sql_and_values(db.get_database_backend(), sql, values)
}
