// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::DateTime;
use goldenfile::Mint;
use result_xml::{
    Failure, ScenarioResult, SpecificationResult, Status, StepResult, StepRole, SuiteResult,
    XmlBuilder,
};
use std::time::Duration;

#[test]
fn fixtures() {
    let mut mint = Mint::new("tests/fixtures");

    let f = mint
        .new_goldenfile("basic_result.xml")
        .expect("creating new goldenfile succeeds");

    let timestamp =
        DateTime::parse_from_rfc3339("2026-10-16T14:05:09+02:00").expect("valid timestamp");
    XmlBuilder::new()
        .set_timestamp(timestamp)
        .serialize(&basic_suite(), f)
        .expect("serializing basic_suite succeeds");

    let f = mint
        .new_goldenfile("empty_result.xml")
        .expect("creating new goldenfile succeeds");

    XmlBuilder::new()
        .set_timestamp(timestamp)
        .serialize(&SuiteResult::new("default"), f)
        .expect("serializing an empty suite succeeds");
}

fn basic_suite() -> SuiteResult {
    let mut suite = SuiteResult::new("ci");
    suite
        .set_tags(["nightly"])
        .set_execution_time(Duration::from_secs(2));

    let mut before_suite = StepResult::new(StepRole::BeforeSuite, Status::Passed);
    before_suite.set_execution_time(Duration::from_millis(12));
    suite.set_before_suite(before_suite);

    let mut login = SpecificationResult::new("Login <basics>", "specs/login.spec");
    login
        .set_tags(["auth", "smoke"])
        .set_execution_time(Duration::from_millis(1855));

    let mut valid_user = ScenarioResult::new("Valid user");
    valid_user
        .set_tags(["smoke"])
        .set_execution_time(Duration::from_millis(350));
    let mut open_page = StepResult::step(r#"Open "login" page"#, Status::Passed);
    open_page.set_execution_time(Duration::from_millis(100));
    let mut enter_credentials = StepResult::step("Enter credentials", Status::Passed);
    enter_credentials
        .set_execution_time(Duration::from_millis(250))
        .set_console("typed user & pass");
    valid_user.add_steps([open_page, enter_credentials]);

    let mut locked_user = ScenarioResult::new("Locked user");
    locked_user.set_execution_time(Duration::from_millis(1505));
    let mut before_scenario = StepResult::new(StepRole::BeforeScenario, Status::Passed);
    before_scenario.set_execution_time(Duration::from_millis(5));
    locked_user.set_before_scenario(before_scenario);

    let mut failure = Failure::new(r#"expected <dashboard> but got "error" & 'locked'"#);
    failure
        .set_stack_trace("at login.submit(login.js:42)\nat runner")
        .set_screenshot("c2NyZWVu");
    let mut submit = StepResult::failed(StepRole::Step, failure);
    submit
        .set_text("Submit form")
        .set_execution_time(Duration::from_millis(1500));
    locked_user.add_steps([submit, StepResult::step("Verify banner", Status::Skipped)]);

    login.add_scenarios([valid_user, locked_user]);

    suite.add_specifications([
        login,
        SpecificationResult::new("Empty spec", "specs/empty.spec"),
    ]);

    let mut after_suite = StepResult::failed(StepRole::AfterSuite, Failure::new("teardown failed"));
    after_suite.set_execution_time(Duration::from_millis(7));
    suite.set_after_suite(after_suite);

    suite
}
