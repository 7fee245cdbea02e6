//! Template rendering.
//!
//! The template is compiled once per run and then rendered against one
//! [`RenderContext`] per specification file. Templates use Handlebars syntax:
//!
//! - `{{Package}}`, `{{EnumType}}`, `{{EnumCount}}`, `{{EnumLastValue}}`
//! - `{{#each EnumValues}} ... {{/each}}` with `{{Name}}`, `{{Value}}`, `{{IsFirst}}`
//! - `{{#unless IsFirst}}, {{/unless}}` to suppress a leading separator
//! - `{{../EnumType}}` to reach the outer context from inside `each`
//!
//! Strict mode is on, so a reference to an unknown key is an error rather than
//! an empty string. Output is never HTML-escaped.

use crate::context::RenderContext;
use crate::error::TemplateError;
use handlebars::Handlebars;

const TEMPLATE_NAME: &str = "goenum";

/// Starter template for Go enums, written by `goenum init --with-template`.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/goenum.template");

/// A compiled template, reusable across renders.
#[derive(Debug)]
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Compile template source.
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, source)
            .map_err(|e| TemplateError::compile(e.to_string()))?;

        Ok(Self { registry })
    }

    /// Render the template for one context.
    pub fn render(&self, context: &RenderContext) -> Result<String, TemplateError> {
        self.registry
            .render(TEMPLATE_NAME, &context.to_template_data())
            .map_err(|e| TemplateError::render(&context.enum_type, e.to_string()))
    }
}
