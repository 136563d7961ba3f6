//! Content element context for field rendering.
//!
//! A [`ContentElement`] is the entity being edited: possibly not yet
//! persisted (no durable identifier), carrying the field values that
//! sub-path templates may reference.

use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

/// The content entity a field is rendered for.
#[derive(Debug, Clone)]
pub struct ContentElement {
    /// Durable identifier; `None` until the element is first saved.
    pub id: Option<Uuid>,
    /// Element title.
    pub title: String,
    /// Content type machine name.
    pub type_name: String,
    /// Field values keyed by field name.
    pub fields: Map<String, JsonValue>,
}

impl ContentElement {
    /// Create an unpersisted element of the given content type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            id: None,
            title: String::new(),
            type_name: type_name.into(),
            fields: Map::new(),
        }
    }

    /// Set the durable identifier.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a field value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Whether the element has been saved and has a durable identifier.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// The user editing the content, owner of the fallback upload folder.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

impl User {
    /// Create a user with a fresh identifier.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: username.into(),
        }
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let element = ContentElement::new("article")
            .with_title("Hello")
            .with_field("slug", "hello");

        assert!(!element.is_persisted());
        assert_eq!(element.title, "Hello");
        assert_eq!(element.fields.get("slug").unwrap(), "hello");
    }

    #[test]
    fn test_element_persisted() {
        let element = ContentElement::new("article").with_id(Uuid::now_v7());
        assert!(element.is_persisted());
    }
}
