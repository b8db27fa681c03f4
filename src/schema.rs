//! Schema definition: an ordered set of named, typed fields.
//!
//! A [`Schema`] is the single source of truth for both loading and
//! documentation. Each field is a [`Field`]: a terminal primitive rule
//! (string, boolean, number) wrapped in zero or more combinator layers
//! (optional, nullable, default, coercion, refinement). The wrapper set is
//! closed, so metadata questions — innermost type, optionality, declared
//! default — are answered by unwrapping one layer at a time.
//!
//! Boolean and number fields automatically carry a coercion step
//! ([`Coercion`]) so raw environment strings are normalized before the type
//! check runs. See [`crate::coerce`].
//!
//! ```
//! use envfig::{Field, Schema};
//!
//! let schema = Schema::builder()
//!     .describe("Upstream service settings.")
//!     .field("url", Field::string().url())
//!     .field("apiToken", Field::string().min(1))
//!     .field("mock", Field::boolean().default(false))
//!     .build();
//! ```

use serde_json::{Map, Value};

use crate::coerce::Coercion;
use crate::error::Issue;
use crate::validate;

/// An immutable, ordered mapping from field key to validation rule.
#[derive(Debug, Clone)]
pub struct Schema {
    description: Option<String>,
    fields: Vec<(String, Field)>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder {
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate a candidate input object without panicking.
    ///
    /// Returns the validated (coerced, defaulted) values on success, or every
    /// per-field issue in declaration order on failure. Absent keys in
    /// `input` are treated as unset, which fails required fields with
    /// `Required`.
    pub fn safe_parse(&self, input: &Map<String, Value>) -> Result<Map<String, Value>, Vec<Issue>> {
        validate::parse_object(self, input)
    }

    /// Derive per-field metadata (type tag, optionality, default,
    /// description) by unwrapping each field's combinator layers. Computed on
    /// demand; the schema itself stores only the rules.
    pub fn field_meta(&self) -> Vec<FieldMeta> {
        self.fields
            .iter()
            .map(|(key, field)| FieldMeta {
                key: key.clone(),
                type_tag: field.type_tag(),
                optional: field.is_optional(),
                nullable: field.is_nullable(),
                default: field.default_value().cloned(),
                description: field.description().map(str::to_string),
            })
            .collect()
    }
}

/// Builds a [`Schema`]. Field order is preserved.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    description: Option<String>,
    fields: Vec<(String, Field)>,
}

impl SchemaBuilder {
    /// Attach a schema-level description, rendered by the documentation
    /// generator.
    pub fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn field(mut self, key: &str, field: impl Into<Field>) -> Self {
        self.fields.push((key.to_string(), field.into()));
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            description: self.description,
            fields: self.fields,
        }
    }
}

/// Derived, read-only metadata for one schema field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMeta {
    pub key: String,
    /// Innermost primitive type after unwrapping all combinator layers.
    pub type_tag: &'static str,
    /// Whether an absent input is accepted (optional or defaulted).
    pub optional: bool,
    pub nullable: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
}

/// A single field's validation rule: a terminal primitive type wrapped in
/// combinator layers.
#[derive(Debug, Clone)]
pub struct Field {
    pub(crate) kind: FieldKind,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) enum FieldKind {
    String {
        checks: Vec<StringCheck>,
    },
    Boolean,
    Number {
        checks: Vec<NumberCheck>,
    },
    Optional(Box<Field>),
    Nullable(Box<Field>),
    Default {
        inner: Box<Field>,
        value: Value,
    },
    Preprocess {
        coercion: Coercion,
        inner: Box<Field>,
    },
    Refine {
        inner: Box<Field>,
        predicate: fn(&Value) -> bool,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StringCheck {
    Url,
    Min(usize),
    Max(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NumberCheck {
    Int,
    Min(f64),
    Max(f64),
}

impl Field {
    pub fn string() -> StringField {
        StringField { checks: Vec::new() }
    }

    pub fn boolean() -> BoolField {
        BoolField
    }

    pub fn number() -> NumberField {
        NumberField { checks: Vec::new() }
    }

    /// A number field that additionally rejects fractional values. Numeric
    /// coercion stays lenient; the integer check runs on the coerced value.
    pub fn integer() -> NumberField {
        NumberField {
            checks: vec![NumberCheck::Int],
        }
    }

    fn wrap(kind: FieldKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }

    /// Accept an absent input; the key is simply omitted from the output.
    pub fn optional(self) -> Self {
        Self::wrap(FieldKind::Optional(Box::new(self)))
    }

    /// Accept an explicit `null` input and keep it as `null`.
    pub fn nullable(self) -> Self {
        Self::wrap(FieldKind::Nullable(Box::new(self)))
    }

    /// Substitute `value` when the input is absent.
    pub fn default(self, value: impl Into<Value>) -> Self {
        Self::wrap(FieldKind::Default {
            inner: Box::new(self),
            value: value.into(),
        })
    }

    /// Attach a human description, rendered by the documentation generator.
    pub fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Add a custom predicate over the validated value. `message` is
    /// reported when the predicate returns false.
    pub fn refine(self, predicate: fn(&Value) -> bool, message: &str) -> Self {
        Self::wrap(FieldKind::Refine {
            inner: Box::new(self),
            predicate,
            message: message.to_string(),
        })
    }

    /// Innermost primitive type name, unwrapping every combinator layer.
    pub fn type_tag(&self) -> &'static str {
        match &self.kind {
            FieldKind::String { .. } => "string",
            FieldKind::Boolean => "boolean",
            FieldKind::Number { .. } => "number",
            FieldKind::Optional(inner)
            | FieldKind::Nullable(inner)
            | FieldKind::Default { inner, .. }
            | FieldKind::Preprocess { inner, .. }
            | FieldKind::Refine { inner, .. } => inner.type_tag(),
        }
    }

    /// Whether an absent input is accepted. True for `optional()` fields and
    /// for fields with a declared default.
    pub fn is_optional(&self) -> bool {
        match &self.kind {
            FieldKind::Optional(_) | FieldKind::Default { .. } => true,
            FieldKind::Nullable(inner)
            | FieldKind::Preprocess { inner, .. }
            | FieldKind::Refine { inner, .. } => inner.is_optional(),
            _ => false,
        }
    }

    pub fn is_nullable(&self) -> bool {
        match &self.kind {
            FieldKind::Nullable(_) => true,
            FieldKind::Optional(inner)
            | FieldKind::Default { inner, .. }
            | FieldKind::Preprocess { inner, .. }
            | FieldKind::Refine { inner, .. } => inner.is_nullable(),
            _ => false,
        }
    }

    /// The declared default, if any layer carries one.
    pub fn default_value(&self) -> Option<&Value> {
        match &self.kind {
            FieldKind::Default { value, .. } => Some(value),
            FieldKind::Optional(inner)
            | FieldKind::Nullable(inner)
            | FieldKind::Preprocess { inner, .. }
            | FieldKind::Refine { inner, .. } => inner.default_value(),
            _ => None,
        }
    }

    /// The field description. Outer layers win; combinators fall through to
    /// the layer they wrap, so `.describe(..)` works at any position in the
    /// chain.
    pub fn description(&self) -> Option<&str> {
        if let Some(text) = self.description.as_deref() {
            return Some(text);
        }
        match &self.kind {
            FieldKind::Optional(inner)
            | FieldKind::Nullable(inner)
            | FieldKind::Default { inner, .. }
            | FieldKind::Preprocess { inner, .. }
            | FieldKind::Refine { inner, .. } => inner.description(),
            _ => None,
        }
    }
}

/// Builder for string fields.
#[derive(Debug, Clone)]
pub struct StringField {
    checks: Vec<StringCheck>,
}

impl StringField {
    /// Require a URL-shaped value (`scheme://rest`).
    pub fn url(mut self) -> Self {
        self.checks.push(StringCheck::Url);
        self
    }

    /// Minimum length in characters.
    pub fn min(mut self, n: usize) -> Self {
        self.checks.push(StringCheck::Min(n));
        self
    }

    /// Maximum length in characters.
    pub fn max(mut self, n: usize) -> Self {
        self.checks.push(StringCheck::Max(n));
        self
    }

    pub fn optional(self) -> Field {
        Field::from(self).optional()
    }

    pub fn nullable(self) -> Field {
        Field::from(self).nullable()
    }

    pub fn default(self, value: impl Into<Value>) -> Field {
        Field::from(self).default(value)
    }

    pub fn describe(self, text: &str) -> Field {
        Field::from(self).describe(text)
    }

    pub fn refine(self, predicate: fn(&Value) -> bool, message: &str) -> Field {
        Field::from(self).refine(predicate, message)
    }
}

impl From<StringField> for Field {
    fn from(builder: StringField) -> Self {
        Field::wrap(FieldKind::String {
            checks: builder.checks,
        })
    }
}

/// Builder for boolean fields. Conversion wraps the boolean terminal in the
/// bool-token coercion step.
#[derive(Debug, Clone, Copy)]
pub struct BoolField;

impl BoolField {
    pub fn optional(self) -> Field {
        Field::from(self).optional()
    }

    pub fn nullable(self) -> Field {
        Field::from(self).nullable()
    }

    pub fn default(self, value: impl Into<Value>) -> Field {
        Field::from(self).default(value)
    }

    pub fn describe(self, text: &str) -> Field {
        Field::from(self).describe(text)
    }
}

impl From<BoolField> for Field {
    fn from(_: BoolField) -> Self {
        Field::wrap(FieldKind::Preprocess {
            coercion: Coercion::Bool,
            inner: Box::new(Field::wrap(FieldKind::Boolean)),
        })
    }
}

/// Builder for number fields. Conversion wraps the number terminal in the
/// lenient numeric coercion step.
#[derive(Debug, Clone)]
pub struct NumberField {
    checks: Vec<NumberCheck>,
}

impl NumberField {
    /// Minimum value (inclusive).
    pub fn min(mut self, n: f64) -> Self {
        self.checks.push(NumberCheck::Min(n));
        self
    }

    /// Maximum value (inclusive).
    pub fn max(mut self, n: f64) -> Self {
        self.checks.push(NumberCheck::Max(n));
        self
    }

    pub fn optional(self) -> Field {
        Field::from(self).optional()
    }

    pub fn nullable(self) -> Field {
        Field::from(self).nullable()
    }

    pub fn default(self, value: impl Into<Value>) -> Field {
        Field::from(self).default(value)
    }

    pub fn describe(self, text: &str) -> Field {
        Field::from(self).describe(text)
    }

    pub fn refine(self, predicate: fn(&Value) -> bool, message: &str) -> Field {
        Field::from(self).refine(predicate, message)
    }
}

impl From<NumberField> for Field {
    fn from(builder: NumberField) -> Self {
        Field::wrap(FieldKind::Preprocess {
            coercion: Coercion::Number,
            inner: Box::new(Field::wrap(FieldKind::Number {
                checks: builder.checks,
            })),
        })
    }
}
