//! Object template rendering for sub-path templates.
//!
//! Sub-paths may reference the element being edited with `{token}`
//! shorthand (e.g. `news/{id}`), which expands to the template engine's
//! `{{ token }}` syntax before rendering.

use tera::{Context, Tera};

use crate::element::ContentElement;
use crate::error::{FieldError, FieldResult};

/// Renders a template string against a content element.
pub trait ObjectTemplates: Send + Sync {
    /// Render `template` with the element's fields in scope.
    ///
    /// Fails with [`FieldError::InvalidSubpath`] when the template is
    /// malformed or references an unknown token. The `id` token renders
    /// as an empty string for an unpersisted element, so downstream path
    /// validation catches it.
    fn render_object_template(&self, template: &str, element: &ContentElement)
        -> FieldResult<String>;
}

/// Tera-backed object template renderer.
#[derive(Debug, Default)]
pub struct TeraTemplates {
    _private: (),
}

impl TeraTemplates {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl ObjectTemplates for TeraTemplates {
    fn render_object_template(
        &self,
        template: &str,
        element: &ContentElement,
    ) -> FieldResult<String> {
        let expanded = expand_shorthand(template);

        let mut context = Context::new();
        context.insert("id", &element.id.map(|id| id.to_string()).unwrap_or_default());
        context.insert("title", &element.title);
        context.insert("type", &element.type_name);
        for (name, value) in &element.fields {
            context.insert(name, value);
        }

        Tera::one_off(&expanded, &context, false)
            .map_err(|_| FieldError::InvalidSubpath(template.to_string()))
    }
}

/// Expand `{token}` shorthand into `{{ token }}`.
///
/// Existing `{{ ... }}` and `{% ... %}` constructs pass through untouched,
/// as does any brace that is not followed by a complete token name.
fn expand_shorthand(template: &str) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '{' {
            out.push(c);
            continue;
        }
        if matches!(chars.peek(), Some('{') | Some('%')) {
            out.push(c);
            continue;
        }

        let mut token = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' || next == '.' {
                token.push(next);
                chars.next();
            } else {
                break;
            }
        }

        if !token.is_empty() && chars.peek() == Some(&'}') {
            chars.next();
            out.push_str("{{ ");
            out.push_str(&token);
            out.push_str(" }}");
        } else {
            out.push('{');
            out.push_str(&token);
        }
    }

    out
}
