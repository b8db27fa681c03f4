//! Markdown reference tables generated from schema metadata.
//!
//! A pure read of the schema: no raw source, no coercion, no validation.
//! Generating twice from the same inputs yields byte-identical output, so
//! the result can be committed and diffed.

use serde_json::Value;

use crate::naming::{Case, inject_prefix};
use crate::schema::Schema;

/// Render a self-contained markdown reference section for one schema.
///
/// The environment-variable column always uses the canonical upper-snake
/// naming (prefix injection first), independent of whatever case transform a
/// loader was configured with — documentation targets the live-environment
/// convention.
///
/// ```
/// use envfig::{Field, Schema, schema_to_markdown};
///
/// let schema = Schema::builder()
///     .field("url", Field::string().url().describe("Upstream base URL"))
///     .field("mock", Field::boolean().default(false))
///     .build();
/// let md = schema_to_markdown("Upstream", "", &schema);
/// assert!(md.contains("| url | `URL` | string |  | Upstream base URL |"));
/// ```
pub fn schema_to_markdown(name: &str, prefix: &str, schema: &Schema) -> String {
    let mut out = String::new();

    out.push_str(&format!("## {name}\n\n"));
    if !prefix.is_empty() {
        out.push_str(&format!("Prefix: `{prefix}`\n\n"));
    }
    if let Some(description) = schema.description() {
        out.push_str(&format!("{description}\n\n"));
    }

    out.push_str("| Name | Environment variable | Type | Default | Description |\n");
    out.push_str("| ---- | -------------------- | ---- | ------- | ----------- |\n");

    for meta in schema.field_meta() {
        let env_var = Case::UpperSnake.apply(&inject_prefix(prefix, &meta.key));
        let marker = if meta.nullable || meta.optional { "?" } else { "" };
        let default = meta
            .default
            .map(|v| format!("`{}`", render_value(&v)))
            .unwrap_or_default();
        out.push_str(&format!(
            "| {} | `{}` | {}{} | {} | {} |\n",
            meta.key,
            env_var,
            meta.type_tag,
            marker,
            default,
            meta.description.unwrap_or_default(),
        ));
    }

    out
}

/// Render a default value the way it would be written in the environment:
/// strings bare (no quotes), everything else in JSON notation.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
