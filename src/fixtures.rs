#[cfg(test)]
pub mod test {
    use crate::schema::{Field, Schema};

    /// The canonical three-field service schema used across loader, docs,
    /// and registry tests: required URL, required non-empty token, defaulted
    /// mock flag.
    pub fn service_schema() -> Schema {
        Schema::builder()
            .field("url", Field::string().url())
            .field("apiToken", Field::string().min(1))
            .field("mock", Field::boolean().default(false))
            .build()
    }

    /// A schema with a description on the schema itself and on every field,
    /// for documentation-rendering tests.
    pub fn described_schema() -> Schema {
        Schema::builder()
            .describe("Outbound HTTP client settings.")
            .field(
                "timeoutMs",
                Field::integer()
                    .describe("Request timeout in milliseconds")
                    .default(5000),
            )
            .field(
                "retries",
                Field::integer().describe("Retry attempts before giving up").default(3),
            )
            .field(
                "proxy",
                Field::string().url().describe("Optional proxy URL").optional(),
            )
            .build()
    }

    #[test]
    fn service_schema_shape() {
        let schema = service_schema();
        assert_eq!(schema.len(), 3);
        assert!(schema.field("mock").unwrap().is_optional());
        assert!(!schema.field("url").unwrap().is_optional());
    }
}
