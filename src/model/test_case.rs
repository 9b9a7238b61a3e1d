//! TestCases and Recipes.
//!
//! A [`TestCase`] is the structured description of steps produced by a
//! scenario. A [`Recipe`] is the serializable form submitted to the backend.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A structured description of the steps to execute.
///
/// # Example
///
/// ```
/// use recipe_runner::model::{TestCase, TestStep};
///
/// let test_case = TestCase::new()
///     .with_name("login")
///     .with_step(TestStep::new("REST Request").with_property("URI", "https://example.com/login"));
///
/// assert_eq!(test_case.test_steps.len(), 1);
/// assert_eq!(test_case.name.as_deref(), Some("login"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Optional test case name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Steps in execution order.
    #[serde(default)]
    pub test_steps: Vec<TestStep>,

    /// Whether the server should fail the whole case when a step errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_test_case_on_errors: Option<bool>,

    /// Test case level properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl TestCase {
    /// Create an empty test case.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the test case name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a step.
    pub fn with_step(mut self, step: TestStep) -> Self {
        self.test_steps.push(step);
        self
    }

    /// Parse a test case from JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A single step of a [`TestCase`].
///
/// Step kinds differ widely in their properties, so everything beyond
/// `type` and `name` is carried as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStep {
    /// Step kind, e.g. `REST Request` or `Properties`.
    #[serde(rename = "type")]
    pub step_type: String,

    /// Optional step name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Kind-specific properties.
    #[serde(flatten)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl TestStep {
    /// Create a step of the given kind.
    pub fn new(step_type: impl Into<String>) -> Self {
        Self {
            step_type: step_type.into(),
            name: None,
            properties: serde_json::Map::new(),
        }
    }

    /// Set the step name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a kind-specific property.
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// The serializable instruction set submitted to the execution backend.
///
/// Built fresh from a [`TestCase`] for every run. Serializes as the test case
/// body itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Recipe {
    test_case: TestCase,
}

impl Recipe {
    /// Build a recipe from a test case.
    pub fn new(test_case: &TestCase) -> Self {
        Self {
            test_case: test_case.clone(),
        }
    }

    /// The test case this recipe was built from.
    pub fn test_case(&self) -> &TestCase {
        &self.test_case
    }

    /// Pretty-printed JSON, as written to debug dumps.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "<unserializable recipe>"),
        }
    }
}
