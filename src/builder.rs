//! Loader entry point: builder API plus the validated [`Config`] instance.
//!
//! One load is a single deterministic pass: derive each field's lookup key
//! (prefix injection, then case transform), pull raw strings from the
//! source, validate the whole candidate object through the schema, and wrap
//! the result. There is no partial success — a `Config` only ever holds
//! fully validated data.

use std::collections::HashMap;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::EnvfigError;
use crate::naming::{Case, inject_prefix};
use crate::registry::Registry;
use crate::schema::Schema;

/// Entry point for loading a schema-validated configuration.
///
/// ```no_run
/// use envfig::{Envfig, Field, Registry, Schema};
///
/// let schema = Schema::builder()
///     .field("url", Field::string().url())
///     .field("apiToken", Field::string().min(1))
///     .field("mock", Field::boolean().default(false))
///     .build();
///
/// let mut registry = Registry::new();
/// let config = Envfig::builder(schema)
///     .name("ServiceConfig")
///     .prefix("FOO")
///     .load_env(&mut registry)?;
/// assert_eq!(config.get_bool("mock"), Some(false));
/// # Ok::<(), envfig::EnvfigError>(())
/// ```
pub struct Envfig;

impl Envfig {
    pub fn builder(schema: Schema) -> EnvfigBuilder {
        EnvfigBuilder {
            schema,
            name: None,
            prefix: None,
            case: Case::Identity,
        }
    }
}

/// Builder holding the schema plus naming options for a load.
#[derive(Debug, Clone)]
pub struct EnvfigBuilder {
    schema: Schema,
    name: Option<String>,
    prefix: Option<String>,
    case: Case,
}

impl EnvfigBuilder {
    /// Set the explicit config identifier used as the registry key by
    /// [`load_env`](Self::load_env). A trailing `Config` suffix is stripped
    /// when deriving the key (`"ServiceConfig"` registers as `"Service"`).
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the key prefix. An empty prefix behaves as no prefix.
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// Set the case transform applied after prefix injection
    /// (default: [`Case::Identity`]).
    pub fn case(mut self, case: Case) -> Self {
        self.case = case;
        self
    }

    /// Load from an arbitrary flat key-value source.
    ///
    /// An empty source is valid input and simply fails every required field
    /// with `Required`; there is no separate "source unavailable" error.
    pub fn load_from<I>(&self, source: I) -> Result<Config, EnvfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.load_with_case(source, self.case)
    }

    /// Load from a snapshot of the live process environment.
    ///
    /// Always uses the canonical upper-snake naming, regardless of the
    /// configured case transform, and registers `{name, prefix, schema}`
    /// into `registry` before validating — so documentation tooling can see
    /// the config even when its environment is currently invalid.
    /// Re-registration under the same name overwrites in place.
    pub fn load_env(&self, registry: &mut Registry) -> Result<Config, EnvfigError> {
        let name = self.name.as_deref().ok_or(EnvfigError::NameRequired)?;
        let name = name.strip_suffix("Config").unwrap_or(name);
        registry.insert(
            name,
            self.prefix.clone().unwrap_or_default(),
            self.schema.clone(),
        );
        self.load_with_case(std::env::vars(), Case::UpperSnake)
    }

    fn load_with_case<I>(&self, source: I, case: Case) -> Result<Config, EnvfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let source: HashMap<String, String> = source.into_iter().collect();
        let prefix = self.prefix.as_deref().unwrap_or("");

        let mut candidate = Map::new();
        for (key, _) in self.schema.fields() {
            let lookup = case.apply(&inject_prefix(prefix, key));
            match source.get(&lookup) {
                Some(raw) => {
                    debug!("envfig: {key} <- {lookup}");
                    candidate.insert(key.to_string(), Value::String(raw.clone()));
                }
                None => debug!("envfig: {key} <- {lookup} (unset)"),
            }
        }

        match self.schema.safe_parse(&candidate) {
            Ok(values) => Ok(Config {
                schema: self.schema.clone(),
                values,
            }),
            Err(issues) => Err(EnvfigError::ReadConfig {
                prefix: self.prefix.clone().filter(|p| !p.is_empty()),
                issues,
            }),
        }
    }
}

/// An immutable, fully validated configuration: the schema it was loaded
/// against plus the coerced, defaulted values.
#[derive(Debug, Clone)]
pub struct Config {
    schema: Schema,
    values: Map<String, Value>,
}

impl Config {
    /// The schema this config was validated against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// All validated values, keyed by schema field key, in declaration
    /// order. Optional fields that were absent are not present.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_i64()
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_f64()
    }

    /// Decode the validated values into a plain serde struct.
    ///
    /// ```
    /// use envfig::{Envfig, Field, Schema};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Service {
    ///     url: String,
    ///     mock: bool,
    /// }
    ///
    /// let schema = Schema::builder()
    ///     .field("url", Field::string().url())
    ///     .field("mock", Field::boolean().default(false))
    ///     .build();
    /// let config = Envfig::builder(schema)
    ///     .load_from([("url".to_string(), "https://foo.bar/".to_string())])?;
    /// let service: Service = config.deserialize()?;
    /// assert_eq!(service.url, "https://foo.bar/");
    /// assert!(!service.mock);
    /// # Ok::<(), envfig::EnvfigError>(())
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, EnvfigError> {
        Ok(serde_json::from_value(Value::Object(self.values.clone()))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Issue;
    use crate::fixtures::test::service_schema;
    use serde_json::json;

    fn source(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn load_without_prefix() {
        let config = Envfig::builder(service_schema())
            .load_from(source(&[
                ("url", "https://foo.bar/"),
                ("apiToken", "lol"),
                ("mock", "true"),
            ]))
            .unwrap();
        assert_eq!(config.get_str("url"), Some("https://foo.bar/"));
        assert_eq!(config.get_bool("mock"), Some(true));
    }

    #[test]
    fn load_with_camel_prefix() {
        let config = Envfig::builder(service_schema())
            .prefix("foo")
            .load_from(source(&[
                ("fooUrl", "https://foo.bar/"),
                ("fooApiToken", "lol"),
                ("fooMock", "true"),
            ]))
            .unwrap();
        assert_eq!(config.get_str("url"), Some("https://foo.bar/"));
        assert_eq!(config.get_bool("mock"), Some(true));
    }

    #[test]
    fn load_with_prefix_and_upper_snake() {
        let config = Envfig::builder(service_schema())
            .prefix("FOO")
            .case(Case::UpperSnake)
            .load_from(source(&[
                ("FOO_URL", "https://foo.bar/"),
                ("FOO_API_TOKEN", "lol"),
                ("FOO_MOCK", "true"),
            ]))
            .unwrap();
        assert_eq!(config.get_str("url"), Some("https://foo.bar/"));
        assert_eq!(config.get_bool("mock"), Some(true));
    }

    #[test]
    fn load_with_kebab_case() {
        let config = Envfig::builder(service_schema())
            .prefix("foo")
            .case(Case::Kebab)
            .load_from(source(&[
                ("foo-url", "https://foo.bar/"),
                ("foo-api-token", "lol"),
                ("foo-mock", "true"),
            ]))
            .unwrap();
        assert_eq!(config.get_str("url"), Some("https://foo.bar/"));
        assert_eq!(config.get_bool("mock"), Some(true));
    }

    #[test]
    fn default_fills_missing_optional() {
        let config = Envfig::builder(service_schema())
            .load_from(source(&[("url", "https://foo.bar/"), ("apiToken", "lol")]))
            .unwrap();
        assert_eq!(config.get_bool("mock"), Some(false));
    }

    #[test]
    fn empty_source_fails_with_required_issues() {
        let err = Envfig::builder(service_schema())
            .prefix("FOO")
            .load_from(Vec::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not read config (prefix 'FOO') -- url: Required, apiToken: Required"
        );
    }

    #[test]
    fn failure_without_prefix_omits_annotation() {
        let err = Envfig::builder(service_schema())
            .load_from(Vec::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not read config -- url: Required, apiToken: Required"
        );
    }

    #[test]
    fn empty_prefix_behaves_as_none() {
        let err = Envfig::builder(service_schema())
            .prefix("")
            .load_from(Vec::new())
            .unwrap_err();
        assert!(err.to_string().starts_with("Could not read config -- "));
    }

    #[test]
    fn no_alternate_spellings_are_consulted() {
        // With a prefix configured, the unprefixed key must not be found.
        let err = Envfig::builder(service_schema())
            .prefix("foo")
            .load_from(source(&[
                ("url", "https://foo.bar/"),
                ("apiToken", "lol"),
            ]))
            .unwrap_err();
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn issues_carry_paths_and_messages() {
        let err = Envfig::builder(service_schema())
            .load_from(source(&[
                ("url", "garbage"),
                ("apiToken", ""),
                ("mock", "maybe"),
            ]))
            .unwrap_err();
        assert_eq!(
            err.issues(),
            &[
                Issue::new("url", "Invalid url"),
                Issue::new("apiToken", "String must contain at least 1 character(s)"),
                Issue::new("mock", "Expected boolean, received string"),
            ]
        );
    }

    #[test]
    fn values_preserve_declaration_order() {
        let config = Envfig::builder(service_schema())
            .load_from(source(&[
                ("mock", "true"),
                ("apiToken", "lol"),
                ("url", "https://foo.bar/"),
            ]))
            .unwrap();
        let keys: Vec<&String> = config.values().keys().collect();
        assert_eq!(keys, vec!["url", "apiToken", "mock"]);
    }

    #[test]
    fn deserialize_into_struct() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug, PartialEq)]
        struct Service {
            url: String,
            #[serde(rename = "apiToken")]
            api_token: String,
            mock: bool,
        }

        let config = Envfig::builder(service_schema())
            .load_from(source(&[
                ("url", "https://foo.bar/"),
                ("apiToken", "lol"),
                ("mock", "1"),
            ]))
            .unwrap();
        let service: Service = config.deserialize().unwrap();
        assert_eq!(
            service,
            Service {
                url: "https://foo.bar/".into(),
                api_token: "lol".into(),
                mock: true,
            }
        );
    }

    #[test]
    fn typed_accessors() {
        use crate::schema::{Field, Schema};

        let schema = Schema::builder()
            .field("port", Field::integer())
            .field("ratio", Field::number())
            .build();
        let config = Envfig::builder(schema)
            .load_from(source(&[("port", "8080"), ("ratio", "0.5")]))
            .unwrap();
        assert_eq!(config.get_i64("port"), Some(8080));
        assert_eq!(config.get_f64("ratio"), Some(0.5));
        assert_eq!(config.get("missing"), None);
        assert_eq!(config.get_str("port"), None);
    }

    #[test]
    fn schema_is_exposed_on_the_instance() {
        let config = Envfig::builder(service_schema())
            .load_from(source(&[("url", "https://foo.bar/"), ("apiToken", "lol")]))
            .unwrap();
        assert_eq!(config.schema().len(), 3);
        assert_eq!(config.values()["mock"], json!(false));
    }

    #[test]
    fn load_env_requires_name() {
        let mut registry = Registry::new();
        let err = Envfig::builder(service_schema())
            .load_env(&mut registry)
            .unwrap_err();
        assert!(matches!(err, EnvfigError::NameRequired));
        assert!(registry.is_empty());
    }

    #[test]
    fn load_env_reads_upper_snake_vars_and_registers() {
        // Unique prefix to keep this test independent of the process env.
        unsafe {
            std::env::set_var("ENVFIGT1_URL", "https://foo.bar/");
            std::env::set_var("ENVFIGT1_API_TOKEN", "lol");
            std::env::set_var("ENVFIGT1_MOCK", "true");
        }

        let mut registry = Registry::new();
        let config = Envfig::builder(service_schema())
            .name("ServiceConfig")
            .prefix("ENVFIGT1")
            // Ignored: live-environment loads always use upper-snake.
            .case(Case::Kebab)
            .load_env(&mut registry)
            .unwrap();

        assert_eq!(config.get_str("url"), Some("https://foo.bar/"));
        assert_eq!(config.get_bool("mock"), Some(true));

        let entry = registry.get("Service").unwrap();
        assert_eq!(entry.name, "Service");
        assert_eq!(entry.prefix, "ENVFIGT1");

        unsafe {
            std::env::remove_var("ENVFIGT1_URL");
            std::env::remove_var("ENVFIGT1_API_TOKEN");
            std::env::remove_var("ENVFIGT1_MOCK");
        }
    }

    #[test]
    fn load_env_registers_even_when_validation_fails() {
        let mut registry = Registry::new();
        let err = Envfig::builder(service_schema())
            .name("Broken")
            .prefix("ENVFIGT2")
            .load_env(&mut registry)
            .unwrap_err();

        assert!(
            err.to_string()
                .starts_with("Could not read config (prefix 'ENVFIGT2')")
        );
        assert!(registry.get("Broken").is_some());
    }
}
