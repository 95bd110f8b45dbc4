//! A small registration form validated end to end.

use std::sync::Arc;

use formtype_condition::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

struct Form {
    age: Arc<MemoryConnection>,
    start: Arc<MemoryConnection>,
    end: Arc<MemoryConnection>,
    email: Arc<MemoryConnection>,
    phone: Arc<MemoryConnection>,
}

fn manager(tag: &str, options: serde_json::Value) -> Arc<dyn TypeManager> {
    TypeManagerRegistry::with_builtins()
        .create(tag, &options, CultureInfo::en_us().into())
        .unwrap()
        .into()
}

fn form() -> Form {
    let date = manager("Date", json!(null));
    Form {
        age: Arc::new(
            MemoryConnection::new("age").with_type_manager(manager("Integer", json!(null))),
        ),
        start: Arc::new(MemoryConnection::new("start").with_type_manager(date.clone())),
        end: Arc::new(MemoryConnection::new("end").with_type_manager(date)),
        email: Arc::new(
            MemoryConnection::new("email").with_type_manager(manager("Email", json!(null))),
        ),
        phone: Arc::new(
            MemoryConnection::new("phone").with_type_manager(manager("PhoneNumber", json!(null))),
        ),
    }
}

#[test]
fn range_one_to_ten() {
    let form = form();
    let range = Range::new(form.age.clone()).with_minimum(1).with_maximum(10);

    form.age.set_text("5");
    assert_eq!(range.evaluate().unwrap(), ConditionResult::Success);
    form.age.set_text("11");
    assert_eq!(range.evaluate().unwrap(), ConditionResult::Failed);
    form.age.set_text("");
    assert_eq!(range.evaluate().unwrap(), ConditionResult::CannotEvaluate);

    let unbounded = Range::new(form.age.clone());
    assert!(!unbounded.can_evaluate());
}

#[test]
fn date_bounds_are_culture_neutral() {
    let form = form();
    let in_2024 = Range::new(form.start.clone())
        .with_minimum("2024-01-01")
        .with_maximum("2024-12-31");
    form.start.set_text("7/4/2024");
    assert_eq!(in_2024.evaluate().unwrap(), ConditionResult::Success);
    form.start.set_text("1/1/2025");
    assert_eq!(in_2024.evaluate().unwrap(), ConditionResult::Failed);
}

#[test]
fn end_after_start() {
    let form = form();
    let ordered = CompareTwoElements::new(
        form.end.clone(),
        CompareOperator::GreaterThan,
        form.start.clone(),
    );
    form.start.set_text("3/1/2024");
    form.end.set_text("3/15/2024");
    assert_eq!(ordered.evaluate().unwrap(), ConditionResult::Success);
    form.end.set_text("2/15/2024");
    assert_eq!(ordered.evaluate().unwrap(), ConditionResult::Failed);
    form.end.set_text("not a date");
    assert_eq!(ordered.evaluate().unwrap(), ConditionResult::CannotEvaluate);
    assert_eq!(
        DataTypeCheck::new(form.end.clone()).evaluate().unwrap(),
        ConditionResult::Failed
    );
}

#[test]
fn one_way_to_reach_the_user() {
    let form = form();
    let contact = BooleanLogic::and()
        .with(
            Required::new(form.email.clone())
                .with_connection(form.phone.clone())
                .with_mode(RequiredMode::OneOrMore),
        )
        .with(DataTypeCheck::new(form.email.clone()))
        .with(DataTypeCheck::new(form.phone.clone()));

    assert_eq!(contact.evaluate().unwrap(), ConditionResult::Failed);

    form.phone.set_text("(425) 555-0123");
    assert_eq!(contact.evaluate().unwrap(), ConditionResult::Success);

    form.email.set_text("not-an-address");
    assert_eq!(contact.evaluate().unwrap(), ConditionResult::Failed);

    form.email.set_text("jo@example.com");
    assert_eq!(contact.evaluate().unwrap(), ConditionResult::Success);
}

#[test]
fn disabled_rules_step_aside() {
    let form = form();
    let required = Required::new(form.age.clone()).with_options(ConditionOptions {
        enabled: false,
        ..ConditionOptions::default()
    });
    assert_eq!(required.evaluate().unwrap(), ConditionResult::CannotEvaluate);

    let rule = BooleanLogic::or().with(required);
    assert_eq!(rule.evaluate().unwrap(), ConditionResult::CannotEvaluate);
}

#[test]
fn misconfigured_managers_surface() {
    let form = form();
    form.age.set_value(true);
    let err = Range::new(form.age.clone())
        .with_maximum(3)
        .evaluate()
        .unwrap_err();
    assert_eq!(err.code(), "CONFIG_TYPE_MISMATCH");
}
