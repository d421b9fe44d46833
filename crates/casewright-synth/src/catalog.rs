//! Fixed scenario catalogs, one per feature type plus a generic one.
//!
//! Step templates use `{field}` placeholders resolved against the case's
//! test data (inputs first, then validation).

use casewright_schema::issue::FeatureType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Row key of the priority matrix.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Positive,
    Negative,
    Security,
    Performance,
    EdgeCase,
    Validation,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 6] = [
        ScenarioKind::Positive,
        ScenarioKind::Negative,
        ScenarioKind::Security,
        ScenarioKind::Performance,
        ScenarioKind::EdgeCase,
        ScenarioKind::Validation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::Positive => "positive",
            ScenarioKind::Negative => "negative",
            ScenarioKind::Security => "security",
            ScenarioKind::Performance => "performance",
            ScenarioKind::EdgeCase => "edge_case",
            ScenarioKind::Validation => "validation",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named scenario template.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ScenarioKind,
    /// Steps after the feature's opening step.
    pub steps: &'static [&'static str],
    pub expected_result: &'static str,
}

/// Opening navigation-style step shared by a feature's scenarios.
pub fn opening_step(feature: FeatureType) -> &'static str {
    match feature {
        FeatureType::Login => "Given I am on the login page at {url}",
        FeatureType::DataValidation => "Given I am on the form page at {url}",
        FeatureType::ApiTest => "Given the API is available at {base_url}",
        FeatureType::UiTest => "Given I open the application at {url}",
        FeatureType::DatabaseTest => "Given the test database {database} is seeded",
        FeatureType::Generic => "Given the application is available at {url}",
    }
}

pub fn prerequisites(feature: FeatureType, kind: ScenarioKind) -> Vec<String> {
    let mut out = vec![match feature {
        FeatureType::Login => "A registered user account exists",
        FeatureType::DataValidation => "The form under test is deployed",
        FeatureType::ApiTest => "API credentials are available",
        FeatureType::UiTest => "A supported browser is installed",
        FeatureType::DatabaseTest => "A disposable test database is available",
        FeatureType::Generic => "The test environment is ready",
    }
    .to_string()];
    match kind {
        ScenarioKind::Performance => out.push("Performance monitoring is enabled".to_string()),
        ScenarioKind::Security => out.push("A security test environment is available".to_string()),
        _ => {}
    }
    out
}

pub fn catalog(feature: FeatureType) -> &'static [Scenario] {
    match feature {
        FeatureType::Login => LOGIN,
        FeatureType::DataValidation => DATA_VALIDATION,
        FeatureType::ApiTest => API_TEST,
        FeatureType::UiTest => UI_TEST,
        FeatureType::DatabaseTest => DATABASE_TEST,
        FeatureType::Generic => GENERIC,
    }
}

/// Catalog by feature name; `None` for names no catalog is registered under.
pub fn catalog_named(name: &str) -> Option<(FeatureType, &'static [Scenario])> {
    let feature = name.parse::<FeatureType>().ok()?;
    Some((feature, catalog(feature)))
}

const LOGIN: &[Scenario] = &[
    Scenario {
        name: "Test successful login with valid credentials",
        description: "A registered user signs in with correct credentials",
        kind: ScenarioKind::Positive,
        steps: &[
            "And I have valid credentials:",
            "  | username | {username} |",
            "  | password | {password} |",
            "When I enter my credentials",
            "And I click the login button",
            "Then I should be successfully logged in",
            "And I should see the dashboard",
        ],
        expected_result: "User is logged in and lands on the dashboard",
    },
    Scenario {
        name: "Test failed login with invalid credentials",
        description: "Sign in is refused for a wrong password",
        kind: ScenarioKind::Negative,
        steps: &[
            "When I enter username \"{username}\" and password \"{invalid_password}\"",
            "And I click the login button",
            "Then I should see an invalid credentials error",
            "And I should remain on the login page",
        ],
        expected_result: "Login is rejected with a clear error message",
    },
    Scenario {
        name: "Test login with empty credentials",
        description: "Submitting the login form without input",
        kind: ScenarioKind::Validation,
        steps: &[
            "When I leave the username and password fields empty",
            "And I click the login button",
            "Then required field errors should be displayed",
        ],
        expected_result: "Both fields are flagged as required",
    },
    Scenario {
        name: "Test login with SQL injection payload",
        description: "Injection strings in the username are neutralized",
        kind: ScenarioKind::Security,
        steps: &[
            "When I enter username \"{sql_payload}\" and password \"{password}\"",
            "And I click the login button",
            "Then the login should be rejected",
            "And no database error should be exposed",
        ],
        expected_result: "Security controls should be properly enforced",
    },
    Scenario {
        name: "Test login with XSS payload",
        description: "Script payloads in credentials are never executed",
        kind: ScenarioKind::Security,
        steps: &[
            "When I enter username \"{xss_payload}\" and password \"{password}\"",
            "And I click the login button",
            "Then the payload should not be executed",
            "And the input should be escaped in any error message",
        ],
        expected_result: "Security controls should be properly enforced",
    },
    Scenario {
        name: "Test login rate limiting",
        description: "Repeated failed attempts are throttled",
        kind: ScenarioKind::Performance,
        steps: &[
            "When I simulate {concurrent_users} concurrent users failing to log in",
            "And I run the test for {test_duration}",
            "Then response time should be less than {max_response_time}",
            "And further attempts should be rate limited",
        ],
        expected_result: "Response time should meet performance requirements",
    },
    Scenario {
        name: "Test session management after login",
        description: "Sessions expire and stale tokens are refused",
        kind: ScenarioKind::Security,
        steps: &[
            "And I am logged in as \"{username}\"",
            "When I stay idle past the session timeout",
            "Then I should be asked to log in again",
            "And the previous session token should be rejected",
        ],
        expected_result: "Expired sessions cannot be reused",
    },
];

const DATA_VALIDATION: &[Scenario] = &[
    Scenario {
        name: "Test form submission with valid data",
        description: "Well-formed input is accepted and saved",
        kind: ScenarioKind::Positive,
        steps: &[
            "When I enter \"{valid_value}\" into the {field_name} field",
            "And I submit the form",
            "Then the data should be accepted",
            "And a confirmation message should be shown",
        ],
        expected_result: "Data should be handled correctly and validated",
    },
    Scenario {
        name: "Test form validation with invalid data",
        description: "Invalid input is refused with a field error",
        kind: ScenarioKind::Negative,
        steps: &[
            "When I enter \"{invalid_value}\" into the {field_name} field",
            "And I submit the form",
            "Then a validation error should be displayed for {field_name}",
            "And the data should not be saved",
        ],
        expected_result: "Invalid data is rejected before it is stored",
    },
    Scenario {
        name: "Test required field validation",
        description: "Empty required fields block submission",
        kind: ScenarioKind::Validation,
        steps: &[
            "When I leave the {field_name} field empty",
            "And I submit the form",
            "Then all required fields should be validated",
        ],
        expected_result: "Missing required fields are reported",
    },
    Scenario {
        name: "Test data format validation",
        description: "Values in the wrong format are refused",
        kind: ScenarioKind::Validation,
        steps: &[
            "When I enter \"{malformed_value}\" into the {field_name} field",
            "And I submit the form",
            "Then data format requirements should be enforced",
        ],
        expected_result: "Badly formatted values are rejected",
    },
    Scenario {
        name: "Test field length limits",
        description: "Input at and beyond the maximum length",
        kind: ScenarioKind::EdgeCase,
        steps: &[
            "When I enter {max_length} characters into the {field_name} field",
            "And I enter {over_length} characters into the {field_name} field",
            "Then input beyond the limit should be rejected",
        ],
        expected_result: "Only input within the length limit is accepted",
    },
    Scenario {
        name: "Test special characters in inputs",
        description: "Punctuation and symbols do not corrupt stored data",
        kind: ScenarioKind::EdgeCase,
        steps: &[
            "When I enter the special characters {special_chars}",
            "Then the system should handle the input gracefully",
            "And maintain data integrity",
        ],
        expected_result: "Special characters are stored and displayed unchanged",
    },
];

const API_TEST: &[Scenario] = &[
    Scenario {
        name: "Test API request with valid payload",
        description: "A well-formed request succeeds",
        kind: ScenarioKind::Positive,
        steps: &[
            "When I send a {method} request to {endpoint} with a valid payload",
            "Then the response status should be {success_status}",
            "And the response body should match the documented schema",
        ],
        expected_result: "Integration should work as expected",
    },
    Scenario {
        name: "Test API request with invalid payload",
        description: "Malformed requests are refused with a client error",
        kind: ScenarioKind::Negative,
        steps: &[
            "When I send a {method} request to {endpoint} with missing required fields",
            "Then the response status should be {client_error_status}",
            "And the error message should name the invalid field",
        ],
        expected_result: "System should handle the error gracefully",
    },
    Scenario {
        name: "Test API authentication enforcement",
        description: "Requests without a token are refused",
        kind: ScenarioKind::Security,
        steps: &[
            "When I send a {method} request to {endpoint} without a token",
            "Then the response status should be {unauthorized_status}",
            "And no data should be returned",
        ],
        expected_result: "Security controls should be properly enforced",
    },
    Scenario {
        name: "Test API response schema",
        description: "Response fields carry the documented types",
        kind: ScenarioKind::Validation,
        steps: &[
            "When I send a GET request to {endpoint}",
            "Then every field in the response should have the documented type",
        ],
        expected_result: "The response matches its schema",
    },
    Scenario {
        name: "Test API response time under load",
        description: "Latency and error rate stay within budget under load",
        kind: ScenarioKind::Performance,
        steps: &[
            "When I simulate {concurrent_users} concurrent users calling {endpoint}",
            "And I run the test for {test_duration}",
            "Then response time should be less than {max_response_time}",
            "And error rate should be less than {error_rate_threshold}",
        ],
        expected_result: "Response time should meet performance requirements",
    },
    Scenario {
        name: "Test API boundary values",
        description: "Extreme numeric inputs do not cause server errors",
        kind: ScenarioKind::EdgeCase,
        steps: &[
            "When I send requests with boundary values {boundary_values}",
            "Then the API should respond without server errors",
        ],
        expected_result: "Boundary inputs are handled without 5xx responses",
    },
];

const UI_TEST: &[Scenario] = &[
    Scenario {
        name: "Test page renders expected elements",
        description: "Key elements are visible after load",
        kind: ScenarioKind::Positive,
        steps: &[
            "When the page finishes loading",
            "Then I should see the \"{page_title}\" heading",
            "And the \"{button_label}\" button should be visible",
        ],
        expected_result: "User interface should be intuitive and responsive",
    },
    Scenario {
        name: "Test button click triggers action",
        description: "The primary button opens its target",
        kind: ScenarioKind::Positive,
        steps: &[
            "When I click the \"{button_label}\" button",
            "Then the \"{target_page}\" page should open",
        ],
        expected_result: "Clicking the button performs its action",
    },
    Scenario {
        name: "Test navigation between pages",
        description: "Forward and back navigation keep state",
        kind: ScenarioKind::Positive,
        steps: &[
            "When I navigate to the \"{target_page}\" page",
            "And I use the browser back button",
            "Then I should return to the \"{page_title}\" page",
        ],
        expected_result: "Navigation returns the user to the previous page",
    },
    Scenario {
        name: "Test form field validation messages",
        description: "Inline errors appear for empty required fields",
        kind: ScenarioKind::Validation,
        steps: &[
            "When I submit the form with empty fields",
            "Then an inline error should be shown for each required field",
        ],
        expected_result: "Each required field shows an inline error",
    },
    Scenario {
        name: "Test page load time",
        description: "Repeated loads stay within the time budget",
        kind: ScenarioKind::Performance,
        steps: &[
            "When I reload the page {reload_count} times",
            "Then each load should complete within {max_response_time}",
        ],
        expected_result: "Response time should meet performance requirements",
    },
    Scenario {
        name: "Test layout with long text content",
        description: "Long text does not break the layout",
        kind: ScenarioKind::EdgeCase,
        steps: &[
            "When I enter {long_text_length} characters into the first text field",
            "Then the layout should not break",
            "And the text should remain readable",
        ],
        expected_result: "Layout stays intact with long content",
    },
];

const DATABASE_TEST: &[Scenario] = &[
    Scenario {
        name: "Test record creation persists data",
        description: "A created record can be read back",
        kind: ScenarioKind::Positive,
        steps: &[
            "When I create a record in the {table} table named \"{record_name}\"",
            "Then the record should be stored",
            "And reading it back should return the same values",
        ],
        expected_result: "Data should be handled correctly and validated",
    },
    Scenario {
        name: "Test query returns expected records",
        description: "Lookups return exactly the matching rows",
        kind: ScenarioKind::Positive,
        steps: &[
            "When I query the {table} table for \"{record_name}\"",
            "Then exactly {expected_rows} record should be returned",
        ],
        expected_result: "The query returns the expected rows",
    },
    Scenario {
        name: "Test duplicate record rejection",
        description: "Unique constraints reject duplicates",
        kind: ScenarioKind::Negative,
        steps: &[
            "When I insert the same record into the {table} table twice",
            "Then the second insert should be rejected",
            "And only one record should exist",
        ],
        expected_result: "Duplicate records are not stored",
    },
    Scenario {
        name: "Test data integrity on update",
        description: "Updates keep dependent records consistent",
        kind: ScenarioKind::Validation,
        steps: &[
            "When I update the record \"{record_name}\" in the {table} table",
            "Then dependent records should stay consistent",
        ],
        expected_result: "Related data stays consistent after updates",
    },
    Scenario {
        name: "Test query performance with large dataset",
        description: "Lookups stay fast on large tables",
        kind: ScenarioKind::Performance,
        steps: &[
            "When the {table} table holds {row_count} rows",
            "And I run the lookup query",
            "Then the query should complete within {max_response_time}",
        ],
        expected_result: "Response time should meet performance requirements",
    },
    Scenario {
        name: "Test access control on stored data",
        description: "Read-only users cannot modify data",
        kind: ScenarioKind::Security,
        steps: &[
            "When I connect as a read-only user",
            "And I attempt to modify the {table} table",
            "Then the change should be denied",
        ],
        expected_result: "Security controls should be properly enforced",
    },
];

const GENERIC: &[Scenario] = &[
    Scenario {
        name: "Test basic functionality",
        description: "The main behaviour described in the ticket works",
        kind: ScenarioKind::Positive,
        steps: &[
            "When I perform the main operation described in the ticket",
            "Then the operation should complete successfully",
            "And the result should be visible",
        ],
        expected_result: "System should successfully complete the operation",
    },
    Scenario {
        name: "Test error handling",
        description: "Failures are reported without breaking the system",
        kind: ScenarioKind::Negative,
        steps: &[
            "When I trigger an error condition",
            "Then appropriate error messages should be displayed",
            "And the system should handle errors gracefully",
        ],
        expected_result: "System should handle the error gracefully",
    },
    Scenario {
        name: "Test data validation",
        description: "Inputs are validated before use",
        kind: ScenarioKind::Validation,
        steps: &[
            "When I submit the form with test data",
            "Then all required fields should be validated",
            "And data format requirements should be enforced",
        ],
        expected_result: "Data should be handled correctly and validated",
    },
    Scenario {
        name: "Test boundary conditions",
        description: "Limits and unusual input are handled",
        kind: ScenarioKind::EdgeCase,
        steps: &[
            "When I test with boundary values:",
            "  | class_size | {class_sizes} |",
            "  | special_chars | {special_chars} |",
            "Then edge conditions should be handled properly",
            "And the system should maintain stability",
        ],
        expected_result: "Edge conditions are handled without data loss",
    },
];
