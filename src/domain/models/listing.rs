//! Filtering and ordering for recipe and post listings.

use std::str::FromStr;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Author(String),
    /// Matches documents sharing at least one tag.
    Tags(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Title => "title",
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            "title" => Ok(SortField::Title),
            other => Err(AppError::Validation(format!("Unsupported sortBy: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" | "asc" => Ok(SortDirection::Ascending),
            "descending" | "desc" => Ok(SortDirection::Descending),
            other => Err(AppError::Validation(format!("Unsupported sortOrder: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOptions {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOptions {
    pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> Result<Self, AppError> {
        let field = match sort_by.filter(|s| !s.is_empty()) {
            Some(s) => s.parse()?,
            None => SortField::default(),
        };
        let direction = match sort_order.filter(|s| !s.is_empty()) {
            Some(s) => s.parse()?,
            None => SortDirection::default(),
        };
        Ok(Self { field, direction })
    }

    /// Column and keyword both come from closed enums, so this is safe to splice into SQL.
    pub fn order_by_clause(&self) -> String {
        format!("ORDER BY {} {}", self.field.column(), self.direction.keyword())
    }
}
