//! Category record model.

use super::{push_provided, Column, FieldValue, RecordId};
use serde::{Deserialize, Serialize};

/// Grouping assets belong to, e.g. a market sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
}

/// Insert payload for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    pub(crate) fn fields(&self) -> Vec<(CategoryColumn, FieldValue)> {
        let mut fields = vec![(CategoryColumn::Name, self.name.as_str().into())];
        push_provided(
            &mut fields,
            CategoryColumn::Description,
            self.description.as_deref(),
        );
        fields
    }
}

/// Partial update for a category. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    pub(crate) fn fields(&self) -> Vec<(CategoryColumn, FieldValue)> {
        let mut fields = Vec::new();
        push_provided(&mut fields, CategoryColumn::Name, self.name.as_deref());
        push_provided(
            &mut fields,
            CategoryColumn::Description,
            self.description.as_deref(),
        );
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryColumn {
    Name,
    Description,
}

impl Column for CategoryColumn {
    const ALL: &'static [Self] = &[Self::Name, Self::Description];

    fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
        }
    }

    fn is_text(self) -> bool {
        true
    }
}
