use tera::{Context, Tera};

use crate::error::ExportError;
use crate::summary::Summary;

/// Built-in Markdown layout of a record summary.
pub const DEFAULT_TEMPLATE: &str = "\
# {{ title }}
{% for group in groups %}
## {{ group.title }}
{% for entry in group.entries %}
- **{{ entry.label }}** : {{ entry.value }}
{%- endfor %}
{% endfor %}";

/// Render a summary with the built-in Markdown template.
pub fn render_summary(summary: &Summary) -> Result<String, ExportError> {
    render_template("summary.md", DEFAULT_TEMPLATE, summary)
}

/// Render a Tera template with a summary.
///
/// `template_content` is the raw template string (Jinja2 syntax); the
/// summary's `title` and `groups` become the template context.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    summary: &Summary,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(summary)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    Ok(tera.render(template_name, &context)?)
}
