//! Conditions over a host-defined connection.

use std::collections::HashMap;
use std::sync::Arc;

use formtype_condition::prelude::*;
use parking_lot::RwLock;

/// Field values keyed by name, as a host's form model might hold them.
#[derive(Debug, Default)]
struct Model {
    fields: RwLock<HashMap<String, String>>,
}

impl Model {
    fn set(&self, field: &str, text: &str) {
        self.fields.write().insert(field.to_owned(), text.to_owned());
    }
}

/// Reads one field of a shared model.
#[derive(Debug)]
struct ModelField {
    model: Arc<Model>,
    name: String,
    editable: bool,
}

impl ModelField {
    fn new(model: &Arc<Model>, name: &str) -> Arc<Self> {
        Arc::new(Self {
            model: Arc::clone(model),
            name: name.to_owned(),
            editable: true,
        })
    }
}

impl Connection for ModelField {
    fn id(&self) -> &str {
        &self.name
    }

    fn text_value(&self) -> String {
        self.model.fields.read().get(&self.name).cloned().unwrap_or_default()
    }

    fn is_editable(&self) -> bool {
        self.editable
    }
}

#[test]
fn default_connection_methods_are_enough() {
    let model = Arc::new(Model::default());
    let bio = ModelField::new(&model, "bio");

    let length = CharacterCount::new(bio.clone()).with_maximum(20);
    let words = WordCount::new(bio.clone()).with_minimum(2);
    let rule = BooleanLogic::and().with(length).with(words);

    assert_eq!(rule.evaluate().unwrap(), ConditionResult::CannotEvaluate);
    model.set("bio", "Rust developer");
    assert_eq!(rule.evaluate().unwrap(), ConditionResult::Success);
    model.set("bio", "Rust");
    assert_eq!(rule.evaluate().unwrap(), ConditionResult::Failed);
    model.set("bio", "writes Rust every single day");
    assert_eq!(rule.evaluate().unwrap(), ConditionResult::Failed);
}

#[test]
fn explicit_managers_serve_plain_connections() {
    let model = Arc::new(Model::default());
    let price = ModelField::new(&model, "price");
    let limit = ModelField::new(&model, "limit");
    let currency: Arc<dyn TypeManager> = Arc::new(Currency::new(CultureInfo::en_us().into()));

    let close =
        Difference::new(price.clone(), limit.clone(), 10.0).with_type_manager(currency.clone());
    let below = CompareTwoElements::new(price, CompareOperator::LessThanOrEqual, limit)
        .with_type_manager(currency);

    model.set("price", "$95.00");
    model.set("limit", "$100.00");
    assert_eq!(close.evaluate().unwrap(), ConditionResult::Success);
    assert_eq!(below.evaluate().unwrap(), ConditionResult::Success);

    model.set("price", "$120.00");
    assert_eq!(close.evaluate().unwrap(), ConditionResult::Failed);
    assert_eq!(below.evaluate().unwrap(), ConditionResult::Failed);
}

#[test]
fn not_editable_fields_are_filtered() {
    let model = Arc::new(Model::default());
    let locked = Arc::new(ModelField {
        model: Arc::clone(&model),
        name: "locked".into(),
        editable: false,
    });
    let open = ModelField::new(&model, "open");
    model.set("open", "x");

    let all = Required::new(open).with_connection(locked);
    assert_eq!(all.evaluate().unwrap(), ConditionResult::Success);
    assert_eq!(
        all.include_not_editable().evaluate().unwrap(),
        ConditionResult::Failed
    );
}

#[test]
fn regexp_over_host_text() {
    let model = Arc::new(Model::default());
    let code = ModelField::new(&model, "code");
    let rule = RegExp::new(code, "^[A-Z]{3}$").case_insensitive();
    model.set("code", "abc");
    assert_eq!(rule.evaluate().unwrap(), ConditionResult::Success);
    model.set("code", "abcd");
    assert_eq!(rule.evaluate().unwrap(), ConditionResult::Failed);
}
