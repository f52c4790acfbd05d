use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::AppError;

/// Attachment categories managed by the admin portal.
///
/// Each category maps to a fixed storage sub-path; any label outside this
/// set is rejected before storage I/O is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Budgets,
    Rules,
    Downloads,
    Updates,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::Budgets,
        Category::Rules,
        Category::Downloads,
        Category::Updates,
    ];

    /// Physical sub-path for this category's files.
    pub fn dir(&self) -> &'static str {
        match self {
            Category::Budgets => "budget-files",
            Category::Rules => "rules-files",
            Category::Downloads => "download-files",
            Category::Updates => "update-files",
        }
    }

    /// Resolve a category from its physical sub-path (the inverse of [`dir`](Self::dir)).
    pub fn from_dir(dir: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.dir() == dir)
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "budgets" => Ok(Category::Budgets),
            "rules" => Ok(Category::Rules),
            "downloads" => Ok(Category::Downloads),
            "updates" => Ok(Category::Updates),
            other => Err(AppError::InvalidInput(format!(
                "Invalid bucket '{}'. Allowed buckets: budgets, rules, downloads, updates",
                other
            ))),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Category::Budgets => write!(f, "budgets"),
            Category::Rules => write!(f, "rules"),
            Category::Downloads => write!(f, "downloads"),
            Category::Updates => write!(f, "updates"),
        }
    }
}
