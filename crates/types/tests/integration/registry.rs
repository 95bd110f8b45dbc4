//! Managers built from configuration documents.

use std::sync::Arc;

use formtype_types::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn configuration_documents_drive_behaviour() {
    let registry = TypeManagerRegistry::with_builtins();
    let german = CultureRegistry::with_builtins().get("de-DE").unwrap();

    let price = registry
        .create_from_json(
            &json!({"type": "Currency", "options": {"showSymbol": false}}),
            Arc::clone(&german),
        )
        .unwrap();
    assert_eq!(price.to_text(&Value::Float(1234.5)).unwrap(), "1.234,50");

    let zip = registry
        .create_from_json(
            &json!({"type": "postalcode", "options": {"regions": "Germany|France"}}),
            german,
        )
        .unwrap();
    assert!(zip.is_valid("10115").unwrap());
    assert!(!zip.is_valid("1011").unwrap());
}

#[test]
fn configuration_mistakes_surface_at_setup() {
    let registry = TypeManagerRegistry::with_builtins();
    let culture: Arc<CultureInfo> = CultureInfo::en_us().into();
    let cases = [
        (json!({"type": "Money"}), "CONFIG_UNKNOWN_TYPE"),
        (json!({"type": "Float", "options": {"decimals": 2}}), "CONFIG_DESER"),
        (
            json!({"type": "Boolean", "options": {"trueRegExp": "(yes"}}),
            "CONFIG_INVALID_PATTERN",
        ),
        (
            json!({"type": "PhoneNumber", "options": {"regions": "Mars"}}),
            "CONFIG_UNKNOWN_REGION",
        ),
        (
            json!({"type": "Duration", "options": {"maxHours": 20000}}),
            "CONFIG_INVALID_OPTION",
        ),
    ];
    for (document, code) in cases {
        let err = registry
            .create_from_json(&document, Arc::clone(&culture))
            .unwrap_err();
        assert_eq!(err.code(), code, "{document}");
    }
}

#[test]
fn boxed_managers_can_be_shared() {
    let registry = TypeManagerRegistry::with_builtins();
    let shared: Arc<dyn TypeManager> = registry
        .create("Integer", &json!(null), CultureInfo::en_us().into())
        .unwrap()
        .into();
    let other = Arc::clone(&shared);
    assert_eq!(other.to_value_str("7").unwrap(), Value::Integer(7));
}
