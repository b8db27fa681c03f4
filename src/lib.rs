//! Schema-driven, validated configuration from environment variables.
//! Declare a schema, point it at the environment, and go.
//!
//! ```no_run
//! use envfig::{Envfig, Field, Registry, Schema};
//!
//! let schema = Schema::builder()
//!     .field("url", Field::string().url())
//!     .field("apiToken", Field::string().min(1))
//!     .field("mock", Field::boolean().default(false))
//!     .build();
//!
//! let mut registry = Registry::new();
//! let config = Envfig::builder(schema)
//!     .name("ServiceConfig")
//!     .prefix("FOO")
//!     .load_env(&mut registry)?;
//! # Ok::<(), envfig::EnvfigError>(())
//! ```
//!
//! That single call reads `FOO_URL`, `FOO_API_TOKEN`, and `FOO_MOCK` from
//! the process environment, coerces the raw strings into their declared
//! types, validates everything in one pass, and hands you a fully valid
//! [`Config`].
//!
//! # Design: schema as source of truth
//!
//! The [`Schema`] defines which keys exist, what their types and defaults
//! are, and what their documentation says. Every operation — loading,
//! typed access, markdown reference generation — derives from that one
//! definition. Add a field to the schema and the expected environment
//! variable, the validation, and the generated docs all pick it up.
//!
//! - **Terminals** declare the primitive type: [`Field::string`],
//!   [`Field::boolean`], [`Field::number`], [`Field::integer`], with
//!   per-type checks (`.url()`, `.min(..)`, `.max(..)`).
//! - **Combinators** wrap any field: `.optional()`, `.nullable()`,
//!   `.default(..)`, `.describe(..)`, `.refine(..)`. The wrapper set is
//!   closed, so metadata (innermost type, optionality, default) is always
//!   recoverable by unwrapping one layer at a time.
//!
//! # Key naming
//!
//! A schema key maps to a raw source key in two fixed steps: prefix
//! injection (`foo` + `apiToken` → `fooApiToken`, only when a prefix is
//! set), then a [`Case`] transform (`fooApiToken` → `FOO_API_TOKEN` under
//! upper-snake). Exactly one lookup key is computed per field — there are
//! no fallback spellings. Live-environment loads always use upper-snake;
//! [`load_from`](EnvfigBuilder::load_from) accepts any transform, which
//! keeps tests free of real environment variables.
//!
//! # Coercion, then validation
//!
//! Environment values are strings, so boolean and number fields carry a
//! coercion step that runs before the type check: `"true"`/`"1"` become
//! `true`, `"0.05"` becomes a number. Coercion is deliberately lenient and
//! never fails — an unrecognized input passes through unchanged and the
//! validator reports the mismatch. Integer fields accept any finite number
//! at the coercion stage and reject fractional values in their own check.
//!
//! # Errors
//!
//! The only runtime failure is [`EnvfigError::ReadConfig`]: the raw source
//! did not satisfy the schema. It carries every per-field [`Issue`] in
//! declaration order, so one failed startup names all the misconfigured
//! variables at once:
//!
//! ```text
//! Could not read config (prefix 'FOO') -- url: Required, apiToken: Required
//! ```
//!
//! # Documentation generation
//!
//! [`schema_to_markdown`] renders a reference table (field, environment
//! variable, type, default, description) from the same schema, without
//! touching the environment. [`Registry`] collects every config loaded via
//! [`load_env`](EnvfigBuilder::load_env) — as an explicit object you own
//! and pass around, not a process global — so build tooling can render the
//! complete reference for a program in one call.

pub mod error;

mod builder;
mod coerce;
mod docs;
mod naming;
mod registry;
mod schema;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::{Config, Envfig, EnvfigBuilder};
pub use coerce::{Coercion, coerce_bool, coerce_number};
pub use docs::schema_to_markdown;
pub use error::{EnvfigError, Issue};
pub use naming::Case;
pub use registry::{Registry, RegistryEntry};
pub use schema::{BoolField, Field, FieldMeta, NumberField, Schema, SchemaBuilder, StringField};
