use serde_json::Value;

use crate::error::PadError;

/// Which projects to pull cards from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSelector {
    /// Every project in the listing, in listing order.
    All,
    One(i64),
    Many(Vec<i64>),
}

impl ProjectSelector {
    /// Accept `null`, an integer, or an array of integers; anything else is an
    /// invalid argument.
    pub fn from_json(value: &Value) -> Result<Self, PadError> {
        match value {
            Value::Null => Ok(ProjectSelector::All),
            Value::Number(n) => n.as_i64().map(ProjectSelector::One).ok_or_else(|| {
                PadError::InvalidArgument(format!("project id must be an integer, got {}", n))
            }),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_i64().ok_or_else(|| {
                        PadError::InvalidArgument(format!(
                            "project id list must contain only integers, got {}",
                            item
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ProjectSelector::Many),
            other => Err(PadError::InvalidArgument(format!(
                "project ids must be a single integer, a list of integers, or null; got {}",
                other
            ))),
        }
    }

    /// Explicit ids, or `None` when the listing has to be consulted.
    pub fn explicit_ids(&self) -> Option<Vec<i64>> {
        match self {
            ProjectSelector::All => None,
            ProjectSelector::One(id) => Some(vec![*id]),
            ProjectSelector::Many(ids) => Some(ids.clone()),
        }
    }
}

impl From<i64> for ProjectSelector {
    fn from(id: i64) -> Self {
        ProjectSelector::One(id)
    }
}

impl From<Vec<i64>> for ProjectSelector {
    fn from(ids: Vec<i64>) -> Self {
        ProjectSelector::Many(ids)
    }
}

impl From<&[i64]> for ProjectSelector {
    fn from(ids: &[i64]) -> Self {
        ProjectSelector::Many(ids.to_vec())
    }
}

impl From<Option<Vec<i64>>> for ProjectSelector {
    fn from(ids: Option<Vec<i64>>) -> Self {
        ids.map_or(ProjectSelector::All, ProjectSelector::Many)
    }
}
