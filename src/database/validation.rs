//! Schema validation for product documents.
//!
//! Payloads arrive as loose JSON objects. Each known field is first cast to
//! its schema type (strings are trimmed, numeric strings become numbers),
//! then the assembled document is checked with `validator`. A field that
//! fails its cast is reported once with the cast failure; otherwise the
//! first rule it breaks is reported. Unknown fields are ignored.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::database::models::product::Product;
use crate::types::RecordId;

/// Entity kinds whose schema failures the API knows how to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Generic,
    Product,
    Prediction,
}

impl EntityKind {
    pub fn failure_label(&self) -> &'static str {
        match self {
            EntityKind::User => "User validation failed",
            EntityKind::Generic => "Validation failed",
            EntityKind::Product => "Product validation failed",
            EntityKind::Prediction => "Prediction validation failed",
        }
    }
}

/// One invalid field, in the shape clients receive it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(skip)]
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}: {}", .entity.failure_label(), join_paths(.inputs))]
pub struct ValidationFailure {
    pub entity: EntityKind,
    pub inputs: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn label(&self) -> &'static str {
        self.entity.failure_label()
    }
}

fn join_paths(inputs: &[FieldError]) -> String {
    inputs
        .iter()
        .map(|input| input.path.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Product fields in schema order
const PRODUCT_FIELDS: &[&str] = &["owner", "name", "price", "description", "category"];

#[derive(Debug, Default, Validate)]
struct ProductDocument {
    #[validate(required(message = "Path `owner` is required."))]
    owner: Option<RecordId>,

    #[validate(
        required(message = "Path `name` is required."),
        length(
            min = 1,
            max = 100,
            code = "length",
            message = "Path `name` must be between 1 and 100 characters."
        )
    )]
    name: Option<String>,

    #[validate(
        required(message = "Path `price` is required."),
        range(min = 0.0, code = "min", message = "Path `price` must not be negative.")
    )]
    price: Option<f64>,

    #[validate(length(
        max = 1000,
        code = "maxlength",
        message = "Path `description` is longer than the maximum allowed length (1000)."
    ))]
    description: Option<String>,

    #[validate(length(
        max = 50,
        code = "maxlength",
        message = "Path `category` is longer than the maximum allowed length (50)."
    ))]
    category: Option<String>,
}

/// A product document that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub owner: RecordId,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Validate a payload for a brand new product. `owner` must be present.
pub fn product_for_create(payload: &Map<String, Value>) -> Result<ProductFields, ValidationFailure> {
    let mut document = ProductDocument::default();
    let casts = document.apply(payload, PRODUCT_FIELDS);
    document.finish(payload, casts)
}

/// Validate the result of applying `payload` on top of `existing`.
///
/// Only fields present in the payload change, `owner` included; `null`
/// clears an optional field and fails `required` on a mandatory one.
pub fn product_for_update(
    existing: &Product,
    payload: &Map<String, Value>,
) -> Result<ProductFields, ValidationFailure> {
    let mut document = ProductDocument {
        owner: Some(existing.owner),
        name: Some(existing.name.clone()),
        price: Some(existing.price),
        description: existing.description.clone(),
        category: existing.category.clone(),
    };
    let casts = document.apply(payload, PRODUCT_FIELDS);
    document.finish(payload, casts)
}

impl ProductDocument {
    /// Cast the allowed fields present in `payload` onto the document.
    /// Returns the fields whose value could not be cast.
    fn apply(&mut self, payload: &Map<String, Value>, allowed: &[&str]) -> Vec<FieldError> {
        let mut casts = Vec::new();

        for field in allowed {
            let Some(raw) = payload.get(*field) else {
                continue;
            };

            let outcome = match *field {
                "owner" => cast_id(field, raw).map(|v| self.owner = v),
                "name" => cast_string(field, raw).map(|v| self.name = v),
                "price" => cast_number(field, raw).map(|v| self.price = v),
                "description" => cast_string(field, raw).map(|v| self.description = v),
                "category" => cast_string(field, raw).map(|v| self.category = v),
                _ => Ok(()),
            };

            if let Err(failure) = outcome {
                casts.push(failure);
            }
        }

        casts
    }

    fn finish(
        self,
        payload: &Map<String, Value>,
        casts: Vec<FieldError>,
    ) -> Result<ProductFields, ValidationFailure> {
        let rules = self.validate().err();
        let inputs = collect_inputs(payload, casts, rules.as_ref());

        if !inputs.is_empty() {
            return Err(ValidationFailure {
                entity: EntityKind::Product,
                inputs,
            });
        }

        match (self.owner, self.name, self.price) {
            (Some(owner), Some(name), Some(price)) => Ok(ProductFields {
                owner,
                name,
                price,
                description: self.description,
                category: self.category,
            }),
            // `required` rules above reject every other combination
            _ => Err(ValidationFailure {
                entity: EntityKind::Product,
                inputs: Vec::new(),
            }),
        }
    }
}

fn collect_inputs(
    payload: &Map<String, Value>,
    mut casts: Vec<FieldError>,
    rules: Option<&ValidationErrors>,
) -> Vec<FieldError> {
    let field_errors = rules.map(|errors| errors.field_errors()).unwrap_or_default();
    let mut inputs = Vec::new();

    for field in PRODUCT_FIELDS {
        if let Some(index) = casts.iter().position(|cast| cast.path == *field) {
            inputs.push(casts.swap_remove(index));
            continue;
        }

        let Some(first) = field_errors.get(*field).and_then(|errors| errors.first()) else {
            continue;
        };

        inputs.push(FieldError {
            path: field.to_string(),
            kind: first.code.to_string(),
            value: payload.get(*field).cloned().unwrap_or(Value::Null),
            message: first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Path `{}` is invalid.", field)),
        });
    }

    inputs
}

fn cast_failure(field: &str, kind: &str, raw: &Value) -> FieldError {
    FieldError {
        path: field.to_string(),
        kind: kind.to_string(),
        value: raw.clone(),
        message: format!(
            "Cast to {} failed for value {} at path \"{}\"",
            kind, raw, field
        ),
    }
}

fn cast_id(field: &str, raw: &Value) -> Result<Option<RecordId>, FieldError> {
    match raw {
        Value::Null => Ok(None),
        Value::String(s) => RecordId::parse(s)
            .map(Some)
            .ok_or_else(|| cast_failure(field, "RecordId", raw)),
        _ => Err(cast_failure(field, "RecordId", raw)),
    }
}

fn cast_string(field: &str, raw: &Value) -> Result<Option<String>, FieldError> {
    match raw {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.trim().to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        _ => Err(cast_failure(field, "String", raw)),
    }
}

fn cast_number(field: &str, raw: &Value) -> Result<Option<f64>, FieldError> {
    match raw {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| cast_failure(field, "Number", raw)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| cast_failure(field, "Number", raw)),
        _ => Err(cast_failure(field, "Number", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const OWNER: &str = "6a1f0e52-8c1d-4b7a-9f3e-0c2d5b8a7e14";

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn existing() -> Product {
        Product::create(ProductFields {
            owner: RecordId::parse(OWNER).unwrap(),
            name: "Lamp".to_string(),
            price: 20.0,
            description: Some("Desk lamp".to_string()),
            category: None,
        })
    }

    #[test]
    fn accepts_a_complete_payload() {
        let fields = product_for_create(&payload(json!({
            "owner": OWNER,
            "name": "  Chair ",
            "price": "49.5",
            "description": "Oak",
            "colour": "ignored"
        })))
        .unwrap();

        assert_eq!(fields.name, "Chair");
        assert_eq!(fields.price, 49.5);
        assert_eq!(fields.description.as_deref(), Some("Oak"));
        assert_eq!(fields.category, None);
        assert_eq!(fields.owner.canonical(), OWNER);
    }

    #[test]
    fn reports_missing_required_fields_in_schema_order() {
        let failure = product_for_create(&payload(json!({ "owner": OWNER }))).unwrap_err();

        assert_eq!(failure.label(), "Product validation failed");
        let paths: Vec<_> = failure.inputs.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "price"]);

        let name = &failure.inputs[0];
        assert_eq!(name.kind, "required");
        assert_eq!(name.value, Value::Null);
        assert_eq!(name.message, "Path `name` is required.");
    }

    #[test]
    fn cast_failure_wins_over_rule_failures() {
        let failure = product_for_create(&payload(json!({
            "owner": OWNER,
            "name": "Chair",
            "price": "cheap"
        })))
        .unwrap_err();

        assert_eq!(failure.inputs.len(), 1);
        let price = &failure.inputs[0];
        assert_eq!(price.kind, "Number");
        assert_eq!(price.value, json!("cheap"));
        assert_eq!(
            price.message,
            "Cast to Number failed for value \"cheap\" at path \"price\""
        );
    }

    #[test]
    fn rule_failures_carry_the_submitted_value() {
        let failure = product_for_create(&payload(json!({
            "owner": OWNER,
            "name": "Chair",
            "price": -3,
            "category": "x".repeat(51)
        })))
        .unwrap_err();

        let kinds: Vec<_> = failure
            .inputs
            .iter()
            .map(|i| (i.path.as_str(), i.kind.as_str()))
            .collect();
        assert_eq!(kinds, vec![("price", "min"), ("category", "maxlength")]);
        assert_eq!(failure.inputs[0].value, json!(-3));
    }

    #[test]
    fn update_changes_only_present_fields() {
        let fields = product_for_update(&existing(), &payload(json!({ "price": 25 }))).unwrap();

        assert_eq!(fields.name, "Lamp");
        assert_eq!(fields.price, 25.0);
        assert_eq!(fields.description.as_deref(), Some("Desk lamp"));
    }

    #[test]
    fn update_null_clears_optional_and_rejects_required() {
        let cleared =
            product_for_update(&existing(), &payload(json!({ "description": null }))).unwrap();
        assert_eq!(cleared.description, None);

        let failure =
            product_for_update(&existing(), &payload(json!({ "name": null }))).unwrap_err();
        assert_eq!(failure.inputs.len(), 1);
        assert_eq!(failure.inputs[0].path, "name");
        assert_eq!(failure.inputs[0].kind, "required");
    }

    #[test]
    fn update_can_reassign_owner() {
        let other = "1d9b2c44-7e0a-4f5b-8c3d-6a2e9f1b0c57";
        let fields =
            product_for_update(&existing(), &payload(json!({ "owner": other.to_uppercase() })))
                .unwrap();
        assert_eq!(fields.owner.canonical(), other);
        assert_eq!(fields.name, "Lamp");
    }

    #[test]
    fn update_rejects_a_malformed_or_null_owner() {
        let failure =
            product_for_update(&existing(), &payload(json!({ "owner": "nobody" }))).unwrap_err();
        assert_eq!(failure.inputs.len(), 1);
        assert_eq!(failure.inputs[0].path, "owner");
        assert_eq!(failure.inputs[0].kind, "RecordId");

        let failure =
            product_for_update(&existing(), &payload(json!({ "owner": null }))).unwrap_err();
        assert_eq!(failure.inputs[0].path, "owner");
        assert_eq!(failure.inputs[0].kind, "required");
    }

    #[test]
    fn serialized_input_omits_the_path() {
        let failure = product_for_create(&payload(json!({ "owner": OWNER, "price": 1 }))).unwrap_err();
        let rendered = serde_json::to_value(&failure.inputs).unwrap();
        assert_eq!(
            rendered,
            json!([{ "type": "required", "value": null, "message": "Path `name` is required." }])
        );
    }

    #[test]
    fn labels_cover_every_entity_kind() {
        assert_eq!(EntityKind::User.failure_label(), "User validation failed");
        assert_eq!(EntityKind::Generic.failure_label(), "Validation failed");
        assert_eq!(EntityKind::Prediction.failure_label(), "Prediction validation failed");
    }
}
