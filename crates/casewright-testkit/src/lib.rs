use casewright_ids::TestCaseId;
use casewright_schema::case::{Priority, TestCase, TestData};
use casewright_schema::issue::{FeatureType, IssueText};

pub mod proptest;

/// Small helpers for building fixtures in tests.
///
/// Keeping these in a microcrate avoids copy-paste across engine, render and
/// quality tests.
pub fn login_issue() -> IssueText {
    IssueText::new(
        "User login with email and password",
        "Users must be able to log in with a registered email address.\n\
         The password should be masked while it is typed.",
    )
    .with_key("QA-101")
    .with_issue_type("Story")
}

/// Ticket naming an API endpoint, an error and an integration.
pub fn api_issue() -> IssueText {
    IssueText::new(
        "API endpoint returns 500 on invalid payload",
        "API endpoint returns 500 on invalid payload, integration with billing service",
    )
    .with_key("QA-202")
    .with_issue_type("Bug")
    .with_components(["payments"])
}

/// No summary, no description: the no-signal ticket.
pub fn empty_issue() -> IssueText {
    IssueText::default()
}

/// A valid, fully populated login case with the given id.
pub fn sample_case(id: &str) -> TestCase {
    TestCase {
        id: TestCaseId(id.to_string()),
        name: "Test successful login with valid credentials".to_string(),
        description: "Valid credentials reach the dashboard".to_string(),
        category: "positive".to_string(),
        feature: FeatureType::Login,
        priority: Priority::High,
        steps: vec![
            "Given I am on the login page at https://app.example.com/login".to_string(),
            "When I enter \"qa.user@example.com\" and \"Passw0rd!\"".to_string(),
            "And I click the login button".to_string(),
            "Then I should see the dashboard".to_string(),
        ],
        test_data: TestData::default()
            .with_input("url", "https://app.example.com/login")
            .with_input("username", "qa.user@example.com")
            .with_input("password", "Passw0rd!")
            .with_validation("redirect", "/dashboard"),
        prerequisites: vec!["A registered user account exists".to_string()],
        expected_result: "User is logged in and sees the dashboard".to_string(),
    }
}
