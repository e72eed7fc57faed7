//! Expectations, suites and batch descriptors
//!
//! Expectations are a closed set of column checks. On disk and on the wire
//! they use the Great Expectations configuration shape:
//! `{"expectation_type": "...", "kwargs": {...}, "meta": {}}`.

use super::SuiteError;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Great Expectations version recorded in suite metadata
pub const GX_VERSION: &str = "0.18.12";

/// A range bound for `Between` checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Integer(i64),
    Number(f64),
    Date(NaiveDate),
}

impl From<i64> for Bound {
    fn from(value: i64) -> Self {
        Bound::Integer(value)
    }
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        Bound::Number(value)
    }
}

impl From<NaiveDate> for Bound {
    fn from(value: NaiveDate) -> Self {
        Bound::Date(value)
    }
}

/// A single column-level data quality check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExpectationConfiguration", into = "ExpectationConfiguration")]
pub enum Expectation {
    /// expect_column_values_to_not_be_null
    NotNull { column: String },
    /// expect_column_values_to_match_regex
    MatchRegex { column: String, regex: String },
    /// expect_column_values_to_be_between
    Between {
        column: String,
        min: Option<Bound>,
        max: Option<Bound>,
        strict_min: bool,
        strict_max: bool,
    },
    /// expect_column_values_to_be_in_set
    InSet {
        column: String,
        value_set: Vec<String>,
    },
    /// expect_column_values_to_be_of_type
    OfType { column: String, type_: String },
    /// expect_column_values_to_be_unique
    Unique { column: String },
}

impl Expectation {
    pub fn not_null(column: impl Into<String>) -> Self {
        Expectation::NotNull {
            column: column.into(),
        }
    }

    /// Regex format check; the pattern must compile
    pub fn match_regex(
        column: impl Into<String>,
        regex: impl Into<String>,
    ) -> Result<Self, SuiteError> {
        let column = column.into();
        let regex = regex.into();
        Regex::new(&regex).map_err(|e| SuiteError::InvalidRegex {
            column: column.clone(),
            detail: e.to_string(),
        })?;
        Ok(Expectation::MatchRegex { column, regex })
    }

    /// Inclusive range check; either side may be open
    pub fn between(column: impl Into<String>, min: Option<Bound>, max: Option<Bound>) -> Self {
        Expectation::Between {
            column: column.into(),
            min,
            max,
            strict_min: false,
            strict_max: false,
        }
    }

    pub fn in_set<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expectation::InSet {
            column: column.into(),
            value_set: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn of_type(column: impl Into<String>, type_: impl Into<String>) -> Self {
        Expectation::OfType {
            column: column.into(),
            type_: type_.into(),
        }
    }

    pub fn unique(column: impl Into<String>) -> Self {
        Expectation::Unique {
            column: column.into(),
        }
    }

    /// Make the lower bound of a `Between` check exclusive
    pub fn with_strict_min(mut self) -> Self {
        if let Expectation::Between { strict_min, .. } = &mut self {
            *strict_min = true;
        }
        self
    }

    /// Make the upper bound of a `Between` check exclusive
    pub fn with_strict_max(mut self) -> Self {
        if let Expectation::Between { strict_max, .. } = &mut self {
            *strict_max = true;
        }
        self
    }

    pub fn expectation_type(&self) -> &'static str {
        match self {
            Expectation::NotNull { .. } => "expect_column_values_to_not_be_null",
            Expectation::MatchRegex { .. } => "expect_column_values_to_match_regex",
            Expectation::Between { .. } => "expect_column_values_to_be_between",
            Expectation::InSet { .. } => "expect_column_values_to_be_in_set",
            Expectation::OfType { .. } => "expect_column_values_to_be_of_type",
            Expectation::Unique { .. } => "expect_column_values_to_be_unique",
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Expectation::NotNull { column }
            | Expectation::MatchRegex { column, .. }
            | Expectation::Between { column, .. }
            | Expectation::InSet { column, .. }
            | Expectation::OfType { column, .. }
            | Expectation::Unique { column } => column,
        }
    }

    /// Render as a Great Expectations expectation configuration
    pub fn to_configuration(&self) -> Value {
        serde_json::to_value(ExpectationConfiguration::from(self.clone()))
            .unwrap_or(Value::Null)
    }
}

/// Wire shape of an expectation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectationConfiguration {
    pub expectation_type: String,
    pub kwargs: Map<String, Value>,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl From<Expectation> for ExpectationConfiguration {
    fn from(expectation: Expectation) -> Self {
        let expectation_type = expectation.expectation_type().to_string();
        let mut kwargs = Map::new();
        kwargs.insert("column".to_string(), json!(expectation.column()));

        match expectation {
            Expectation::NotNull { .. } | Expectation::Unique { .. } => {}
            Expectation::MatchRegex { regex, .. } => {
                kwargs.insert("regex".to_string(), json!(regex));
            }
            Expectation::Between {
                min,
                max,
                strict_min,
                strict_max,
                ..
            } => {
                if let Some(min) = min {
                    kwargs.insert("min_value".to_string(), json!(min));
                }
                if let Some(max) = max {
                    kwargs.insert("max_value".to_string(), json!(max));
                }
                if strict_min {
                    kwargs.insert("strict_min".to_string(), json!(true));
                }
                if strict_max {
                    kwargs.insert("strict_max".to_string(), json!(true));
                }
            }
            Expectation::InSet { value_set, .. } => {
                kwargs.insert("value_set".to_string(), json!(value_set));
            }
            Expectation::OfType { type_, .. } => {
                kwargs.insert("type_".to_string(), json!(type_));
            }
        }

        Self {
            expectation_type,
            kwargs,
            meta: Map::new(),
        }
    }
}

impl TryFrom<ExpectationConfiguration> for Expectation {
    type Error = SuiteError;

    fn try_from(config: ExpectationConfiguration) -> Result<Self, Self::Error> {
        let kwargs = &config.kwargs;
        let column = kwarg_str(kwargs, "column")?;

        match config.expectation_type.as_str() {
            "expect_column_values_to_not_be_null" => Ok(Expectation::not_null(column)),
            "expect_column_values_to_be_unique" => Ok(Expectation::unique(column)),
            "expect_column_values_to_match_regex" => {
                Expectation::match_regex(column, kwarg_str(kwargs, "regex")?)
            }
            "expect_column_values_to_be_of_type" => {
                Ok(Expectation::of_type(column, kwarg_str(kwargs, "type_")?))
            }
            "expect_column_values_to_be_in_set" => {
                let values: Vec<String> = kwargs
                    .get("value_set")
                    .cloned()
                    .map(serde_json::from_value)
                    .transpose()
                    .map_err(|e| SuiteError::InvalidConfiguration(e.to_string()))?
                    .unwrap_or_default();
                Ok(Expectation::in_set(column, values))
            }
            "expect_column_values_to_be_between" => Ok(Expectation::Between {
                column,
                min: kwarg_bound(kwargs, "min_value")?,
                max: kwarg_bound(kwargs, "max_value")?,
                strict_min: kwarg_flag(kwargs, "strict_min"),
                strict_max: kwarg_flag(kwargs, "strict_max"),
            }),
            other => Err(SuiteError::InvalidConfiguration(format!(
                "Unsupported expectation type: {}",
                other
            ))),
        }
    }
}

fn kwarg_str(kwargs: &Map<String, Value>, key: &str) -> Result<String, SuiteError> {
    kwargs
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SuiteError::InvalidConfiguration(format!("missing string kwarg '{}'", key)))
}

fn kwarg_bound(kwargs: &Map<String, Value>, key: &str) -> Result<Option<Bound>, SuiteError> {
    match kwargs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| SuiteError::InvalidConfiguration(format!("{}: {}", key, e))),
    }
}

fn kwarg_flag(kwargs: &Map<String, Value>, key: &str) -> bool {
    kwargs.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// A named, ordered collection of expectations applied to one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationSuite {
    #[serde(rename = "expectation_suite_name")]
    pub name: String,
    #[serde(default)]
    pub expectations: Vec<Expectation>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(default)]
    pub data_asset_type: Option<String>,
    #[serde(default)]
    pub ge_cloud_id: Option<String>,
}

impl ExpectationSuite {
    pub fn new(name: impl Into<String>) -> Self {
        let mut meta = Map::new();
        meta.insert("great_expectations_version".to_string(), json!(GX_VERSION));
        Self {
            name: name.into(),
            expectations: Vec::new(),
            meta,
            data_asset_type: None,
            ge_cloud_id: None,
        }
    }

    /// Append an expectation. Duplicates are kept and run independently.
    pub fn add_expectation(&mut self, expectation: Expectation) {
        self.expectations.push(expectation);
    }

    /// Append an expectation unless an identical one is already present.
    ///
    /// Returns whether the expectation was added.
    pub fn add_expectation_if_absent(&mut self, expectation: Expectation) -> bool {
        if self.expectations.contains(&expectation) {
            false
        } else {
            self.expectations.push(expectation);
            true
        }
    }

    pub fn extend<I: IntoIterator<Item = Expectation>>(&mut self, expectations: I) {
        for expectation in expectations {
            self.add_expectation(expectation);
        }
    }

    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }

    /// Expectations targeting a column, in suite order
    pub fn for_column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Expectation> {
        self.expectations.iter().filter(move |e| e.column() == column)
    }

    /// Render the suite document
    pub fn to_json(&self) -> Result<String, SuiteError> {
        serde_json::to_string_pretty(self).map_err(|e| SuiteError::Storage(e.to_string()))
    }
}

/// Datasource descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceConfig {
    pub name: String,
    pub database_name: String,
}

impl DatasourceConfig {
    pub fn new(name: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database_name: database_name.into(),
        }
    }
}

/// Identifies the table a suite runs against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub datasource_name: String,
    pub data_connector_name: String,
    pub data_asset_name: String,
    pub table_name: String,
    pub schema_name: String,
}

/// What a validation module hands back to the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRun {
    pub batch_request: BatchRequest,
    pub suite_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<DatasourceConfig>,
}

impl ValidationRun {
    /// Check that every returned descriptor value is non-empty
    pub fn verify(self) -> Result<Self, SuiteError> {
        let batch = &self.batch_request;
        let mut fields = vec![
            ("suite_name", self.suite_name.as_str()),
            ("datasource_name", batch.datasource_name.as_str()),
            ("data_connector_name", batch.data_connector_name.as_str()),
            ("data_asset_name", batch.data_asset_name.as_str()),
            ("table_name", batch.table_name.as_str()),
            ("schema_name", batch.schema_name.as_str()),
        ];
        if let Some(ds) = &self.datasource {
            fields.push(("datasource.name", ds.name.as_str()));
            fields.push(("datasource.database_name", ds.database_name.as_str()));
        }

        if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(SuiteError::EmptyDescriptor(field));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_between_configuration() {
        let e = Expectation::between("order_qty", Some(Bound::Integer(1)), None).with_strict_min();
        assert_eq!(
            e.to_configuration(),
            json!({
                "expectation_type": "expect_column_values_to_be_between",
                "kwargs": {"column": "order_qty", "min_value": 1, "strict_min": true},
                "meta": {}
            })
        );
    }

    #[test]
    fn test_date_bounds_render_as_iso_strings() {
        let e = Expectation::between(
            "order_date",
            Some(date(2000, 1, 1).into()),
            Some(date(2026, 12, 31).into()),
        );
        let config = e.to_configuration();
        assert_eq!(config["kwargs"]["min_value"], "2000-01-01");
        assert_eq!(config["kwargs"]["max_value"], "2026-12-31");
        assert!(config["kwargs"].get("strict_min").is_none());
    }

    #[test]
    fn test_other_configurations() {
        assert_eq!(
            Expectation::of_type("customer_id", "INTEGER").to_configuration()["kwargs"]["type_"],
            "INTEGER"
        );
        assert_eq!(
            Expectation::in_set("status", ["NEW", "SHIPPED"]).to_configuration()["kwargs"]
                ["value_set"],
            json!(["NEW", "SHIPPED"])
        );
        assert_eq!(
            Expectation::unique("persona_identifier").to_configuration()["expectation_type"],
            "expect_column_values_to_be_unique"
        );
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let err = Expectation::match_regex("code", "[A-Z").unwrap_err();
        assert!(matches!(err, SuiteError::InvalidRegex { ref column, .. } if column == "code"));
    }

    #[test]
    fn test_parse_configuration() {
        let config = json!({
            "expectation_type": "expect_column_values_to_be_between",
            "kwargs": {"column": "signup_date", "min_value": "1900-01-01", "max_value": 600.5},
            "meta": {}
        });
        let e: Expectation = serde_json::from_value(config).unwrap();
        assert_eq!(
            e,
            Expectation::between(
                "signup_date",
                Some(date(1900, 1, 1).into()),
                Some(Bound::Number(600.5))
            )
        );
    }

    #[test]
    fn test_unsupported_type_is_rejected() {
        let config = json!({
            "expectation_type": "expect_table_row_count_to_equal",
            "kwargs": {"column": "x", "value": 3}
        });
        assert!(serde_json::from_value::<Expectation>(config).is_err());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut suite = ExpectationSuite::new("s");
        suite.add_expectation(Expectation::not_null("id"));
        suite.add_expectation(Expectation::not_null("id"));
        assert_eq!(suite.len(), 2);
        assert_eq!(suite.for_column("id").count(), 2);
    }

    #[test]
    fn test_add_if_absent() {
        let mut suite = ExpectationSuite::new("s");
        assert!(suite.add_expectation_if_absent(Expectation::not_null("id")));
        assert!(!suite.add_expectation_if_absent(Expectation::not_null("id")));
        assert!(suite.add_expectation_if_absent(Expectation::unique("id")));
        assert_eq!(suite.len(), 2);
    }

    #[test]
    fn test_suite_document() {
        let mut suite = ExpectationSuite::new("orders_validation_suite");
        suite.add_expectation(Expectation::not_null("order_id"));
        let doc: Value = serde_json::from_str(&suite.to_json().unwrap()).unwrap();
        assert_eq!(doc["expectation_suite_name"], "orders_validation_suite");
        assert_eq!(
            doc["expectations"][0]["expectation_type"],
            "expect_column_values_to_not_be_null"
        );
        assert_eq!(doc["meta"]["great_expectations_version"], GX_VERSION);
        assert!(doc["ge_cloud_id"].is_null());

        let parsed: ExpectationSuite = serde_json::from_value(doc).unwrap();
        assert_eq!(parsed, suite);
    }

    #[test]
    fn test_verify_rejects_empty_values() {
        let run = ValidationRun {
            batch_request: BatchRequest {
                datasource_name: "ds".to_string(),
                data_connector_name: "default".to_string(),
                data_asset_name: "t".to_string(),
                table_name: String::new(),
                schema_name: "public".to_string(),
            },
            suite_name: "s".to_string(),
            datasource: None,
        };
        assert!(matches!(
            run.verify(),
            Err(SuiteError::EmptyDescriptor("table_name"))
        ));
    }
}
