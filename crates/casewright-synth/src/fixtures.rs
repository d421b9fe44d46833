use crate::catalog::ScenarioKind;
use casewright_schema::case::TestData;
use casewright_schema::issue::FeatureType;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Login-facing defaults, overridable from config and from the ticket text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixtureDefaults {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_url() -> String {
    "https://app.example.com/login".to_string()
}

fn default_username() -> String {
    "qa.user@example.com".to_string()
}

fn default_password() -> String {
    "Passw0rd!".to_string()
}

impl Default for FixtureDefaults {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: default_username(),
            password: default_password(),
        }
    }
}

/// Values the ticket description pins down explicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DescriptionOverrides {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl DescriptionOverrides {
    /// Reads `username:`, `password:` and `url:` lines (prefix matched
    /// case-insensitively). The last occurrence of a key wins.
    pub fn parse(description: &str) -> Self {
        let mut out = Self::default();
        for line in description.lines() {
            let Some((key, value)) = line.trim().split_once(':') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.trim().to_ascii_lowercase().as_str() {
                "username" => out.username = Some(value.to_string()),
                "password" => out.password = Some(value.to_string()),
                "url" => out.url = Some(clean_markdown_url(value)),
                _ => {}
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.username.is_none() && self.password.is_none()
    }

    /// Replaces fixture inputs that exist; `url` also feeds `base_url`.
    pub fn apply(&self, data: &mut TestData) {
        let mut set = |field: &str, value: &Option<String>| {
            if let (Some(v), Some(slot)) = (value, data.inputs.get_mut(field)) {
                *slot = Value::String(v.clone());
            }
        };
        set("url", &self.url);
        set("base_url", &self.url);
        set("username", &self.username);
        set("password", &self.password);
    }
}

/// `[https://a|https://a]` → `https://a`.
fn clean_markdown_url(raw: &str) -> String {
    let inner = raw.trim_start_matches('[').trim_end_matches(']');
    inner.split('|').next().unwrap_or(inner).trim().to_string()
}

/// Default fixtures for a scenario: feature base plus kind-specific extras.
pub fn fixture(feature: FeatureType, kind: ScenarioKind, defaults: &FixtureDefaults) -> TestData {
    let mut data = base_fixture(feature, defaults);
    match kind {
        ScenarioKind::Performance => {
            data = data
                .with_input("concurrent_users", 10)
                .with_input("test_duration", "5m")
                .with_validation("max_response_time", "2s")
                .with_validation("error_rate_threshold", "1%");
        }
        ScenarioKind::EdgeCase => {
            data = data
                .with_input("class_sizes", json!([0, 1, 100, 1000]))
                .with_input("special_chars", "@, #, $, %, &");
        }
        ScenarioKind::Security => {
            data = data.with_validation(
                "security_checks",
                json!([
                    "authentication required",
                    "input sanitized",
                    "no sensitive data in errors"
                ]),
            );
        }
        ScenarioKind::Positive | ScenarioKind::Negative | ScenarioKind::Validation => {}
    }
    data
}

fn base_fixture(feature: FeatureType, defaults: &FixtureDefaults) -> TestData {
    let data = TestData::default();
    match feature {
        FeatureType::Login => data
            .with_input("url", defaults.url.as_str())
            .with_input("username", defaults.username.as_str())
            .with_input("password", defaults.password.as_str())
            .with_input("invalid_password", "wrong-password")
            .with_input("sql_payload", "' OR '1'='1")
            .with_input("xss_payload", "<script>alert(1)</script>")
            .with_validation("expected_page", "dashboard")
            .with_validation("error_message", "Invalid username or password"),
        FeatureType::DataValidation => data
            .with_input("url", defaults.url.as_str())
            .with_input("field_name", "email")
            .with_input("valid_value", "user@example.com")
            .with_input("invalid_value", "not-an-email")
            .with_input("malformed_value", "2024/13/45")
            .with_validation("max_length", 255)
            .with_validation("over_length", 256)
            .with_validation("required_fields", json!(["email"])),
        FeatureType::ApiTest => data
            .with_input("base_url", "https://api.example.com")
            .with_input("endpoint", "/v1/resources")
            .with_input("method", "POST")
            .with_input("payload", json!({"name": "Sample Resource"}))
            .with_input("boundary_values", json!([0, -1, 2147483647]))
            .with_validation("success_status", 200)
            .with_validation("client_error_status", 400)
            .with_validation("unauthorized_status", 401),
        FeatureType::UiTest => data
            .with_input("url", defaults.url.as_str())
            .with_input("page_title", "Home")
            .with_input("button_label", "Submit")
            .with_input("target_page", "Details")
            .with_input("reload_count", 5)
            .with_input("long_text_length", 1000)
            .with_validation("max_response_time", "2s"),
        FeatureType::DatabaseTest => data
            .with_input("database", "qa_test_db")
            .with_input("table", "users")
            .with_input("record_name", "Sample Record")
            .with_input("row_count", 100000)
            .with_validation("expected_rows", 1),
        FeatureType::Generic => data.with_input("url", defaults.url.as_str()),
    }
}

/// Text form of a fixture value inside a step.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// Substitutes `{field}` placeholders from `data` (inputs, then validation).
/// Unknown placeholders are left as written.
pub fn render_template(template: &str, data: &TestData) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match data.inputs.get(name).or_else(|| data.validation.get(name)) {
            Some(v) => out.push_str(&value_text(v)),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_parse_known_prefixes() {
        let o = DescriptionOverrides::parse(
            "Steps to reproduce\nusername: qa.lead01\nPassword: S3cret!\nURL: [https://qa.test/login|https://qa.test/login]",
        );
        assert_eq!(o.username.as_deref(), Some("qa.lead01"));
        assert_eq!(o.password.as_deref(), Some("S3cret!"));
        assert_eq!(o.url.as_deref(), Some("https://qa.test/login"));
    }

    #[test]
    fn url_keeps_scheme_colon() {
        let o = DescriptionOverrides::parse("url: https://qa.test:8443/login");
        assert_eq!(o.url.as_deref(), Some("https://qa.test:8443/login"));
    }

    #[test]
    fn overrides_ignore_empty_values_and_other_keys() {
        let o = DescriptionOverrides::parse("username:\nnote: hello");
        assert!(o.is_empty());
    }

    #[test]
    fn apply_only_touches_existing_fields() {
        let mut data = fixture(FeatureType::ApiTest, ScenarioKind::Positive, &FixtureDefaults::default());
        let o = DescriptionOverrides::parse("url: https://api.qa.test\nusername: bob");
        o.apply(&mut data);
        assert_eq!(data.inputs["base_url"], json!("https://api.qa.test"));
        assert!(!data.inputs.contains_key("username"));
    }

    #[test]
    fn kind_extras_are_added() {
        let d = FixtureDefaults::default();
        let perf = fixture(FeatureType::Login, ScenarioKind::Performance, &d);
        assert_eq!(perf.inputs["concurrent_users"], json!(10));
        assert_eq!(perf.validation["max_response_time"], json!("2s"));
        let edge = fixture(FeatureType::Generic, ScenarioKind::EdgeCase, &d);
        assert_eq!(edge.inputs["class_sizes"], json!([0, 1, 100, 1000]));
    }

    #[test]
    fn render_substitutes_inputs_then_validation() {
        let data = TestData::default()
            .with_input("users", 10)
            .with_validation("limit", "2s")
            .with_input("sizes", json!([0, 1]));
        assert_eq!(
            render_template("When {users} users hit {sizes} within {limit}", &data),
            "When 10 users hit 0, 1 within 2s"
        );
    }

    #[test]
    fn render_leaves_unknown_and_unclosed_placeholders() {
        let data = TestData::default();
        assert_eq!(render_template("Go to {nowhere}", &data), "Go to {nowhere}");
        assert_eq!(render_template("Open { brace", &data), "Open { brace");
    }
}
