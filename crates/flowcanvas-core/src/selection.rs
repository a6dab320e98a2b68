//! Selectable elements registered by the rendering layer.
//!
//! The renderer reports the screen rectangle of every element it paints.
//! The resulting registry is owned by the caller and passed by reference to
//! each navigation query; nothing in this crate keeps it alive between calls.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundRect;

/// A rendered element that keyboard navigation can move focus to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorElement {
    id: String,
    rect: BoundRect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag_id: Option<String>,
}

impl SelectorElement {
    /// Creates a new element without a tag.
    pub fn new(id: impl Into<String>, rect: BoundRect) -> Self {
        Self {
            id: id.into(),
            rect,
            tag_id: None,
        }
    }

    /// Groups this element with others that belong to the same logical node.
    pub fn with_tag_id(mut self, tag_id: impl Into<String>) -> Self {
        self.tag_id = Some(tag_id.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rect(&self) -> BoundRect {
        self.rect
    }

    pub fn tag_id(&self) -> Option<&str> {
        self.tag_id.as_deref()
    }

    /// Returns true if both elements carry the same tag.
    ///
    /// Untagged elements never share a tag.
    pub fn shares_tag_with(&self, other: &SelectorElement) -> bool {
        matches!((self.tag_id(), other.tag_id()), (Some(a), Some(b)) if a == b)
    }
}
