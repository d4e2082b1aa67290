//! Product payload validation.
//!
//! Checks the `data` object of a create/update request field by field, in a fixed order,
//! and reports only the first failing rule. Messages quote the field's display label
//! (e.g. `"Price" must be a number`) so they can be shown to the operator unchanged.

use crate::{
    core::product::ProductPayload,
    errors::{Error, Result},
};
use serde_json::{Map, Value};

/// Largest integer a JSON client can represent exactly (2^53 - 1).
const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Keys accepted in a product payload, in validation order, with their display labels.
const PRODUCT_FIELDS: [(&str, &str); 5] = [
    ("name", "Product Name"),
    ("description", "Description Name"),
    ("price", "Price"),
    ("stock", "Stock"),
    ("category", "Category"),
];

/// Validates a raw product payload and converts it into a [`ProductPayload`].
///
/// Numeric fields accept JSON numbers or strings holding a finite number, since form
/// inputs submit their values as text. `stock` must additionally be a whole number.
///
/// # Errors
/// Returns [`Error::Validation`] carrying the message of the first rule that fails:
/// - the payload is missing or not an object (`null` included)
/// - a field is absent, has the wrong type, or is an empty string
/// - a number is beyond the range JSON clients represent exactly
/// - the payload carries a key outside the product schema
pub fn validate_product(data: Option<&Value>) -> Result<ProductPayload> {
    let fields = match data {
        None => return Err(Error::validation("\"value\" is required")),
        Some(Value::Object(fields)) => fields,
        Some(_) => return Err(Error::validation("\"value\" must be of type object")),
    };

    let name = require_text(fields, PRODUCT_FIELDS[0])?;
    let description = require_text(fields, PRODUCT_FIELDS[1])?;
    let price = require_number(fields, PRODUCT_FIELDS[2])?;
    let stock = require_integer(fields, PRODUCT_FIELDS[3])?;
    let category = require_text(fields, PRODUCT_FIELDS[4])?;

    if let Some(unknown) = fields
        .keys()
        .find(|key| !PRODUCT_FIELDS.iter().any(|(known, _)| *known == key.as_str()))
    {
        return Err(Error::validation(format!("\"{unknown}\" is not allowed")));
    }

    Ok(ProductPayload {
        name,
        description,
        price,
        stock,
        category,
    })
}

fn require<'a>(fields: &'a Map<String, Value>, (key, label): (&str, &str)) -> Result<&'a Value> {
    fields
        .get(key)
        .ok_or_else(|| Error::validation(format!("\"{label}\" is required")))
}

fn require_text(fields: &Map<String, Value>, field: (&str, &str)) -> Result<String> {
    let label = field.1;
    match require(fields, field)? {
        Value::String(text) if text.is_empty() => Err(Error::validation(format!(
            "\"{label}\" is not allowed to be empty"
        ))),
        Value::String(text) => Ok(text.clone()),
        _ => Err(Error::validation(format!("\"{label}\" must be a string"))),
    }
}

#[allow(clippy::cast_precision_loss)]
fn require_number(fields: &Map<String, Value>, field: (&str, &str)) -> Result<f64> {
    let label = field.1;
    let number = match require(fields, field)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|value| value.is_finite())
    .ok_or_else(|| Error::validation(format!("\"{label}\" must be a number")))?;

    if number.abs() > MAX_SAFE_INTEGER as f64 {
        return Err(unsafe_number(label));
    }

    Ok(number)
}

#[allow(clippy::cast_possible_truncation)]
fn require_integer(fields: &Map<String, Value>, field: (&str, &str)) -> Result<i64> {
    let label = field.1;

    // JSON integers are taken as-is; going through f64 would round them
    if let Some(value) = require(fields, field)?.as_i64() {
        if value.unsigned_abs() > MAX_SAFE_INTEGER.unsigned_abs() {
            return Err(unsafe_number(label));
        }
        return Ok(value);
    }

    let value = require_number(fields, field)?;
    if value.fract() != 0.0 {
        return Err(Error::validation(format!("\"{label}\" must be an integer")));
    }

    // Exact: the magnitude is at most MAX_SAFE_INTEGER
    Ok(value as i64)
}

fn unsafe_number(label: &str) -> Error {
    Error::validation(format!("\"{label}\" must be a safe number"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use serde_json::json;

    fn message_of(result: Result<ProductPayload>) -> String {
        match result {
            Err(Error::Validation { message }) => message,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    fn cola() -> Value {
        json!({
            "name": "Cola",
            "description": "Fizzy",
            "price": 50,
            "stock": 10,
            "category": "soda"
        })
    }

    #[test]
    fn test_valid_payload() {
        let payload = validate_product(Some(&cola())).unwrap();
        assert_eq!(payload.name, "Cola");
        assert_eq!(payload.description, "Fizzy");
        assert_eq!(payload.price, 50.0);
        assert_eq!(payload.stock, 10);
        assert_eq!(payload.category, "soda");
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let data = json!({
            "name": "Juice",
            "description": "Orange",
            "price": "12.5",
            "stock": "3",
            "category": "juice"
        });
        let payload = validate_product(Some(&data)).unwrap();
        assert_eq!(payload.price, 12.5);
        assert_eq!(payload.stock, 3);
    }

    #[test]
    fn test_missing_payload() {
        assert_eq!(message_of(validate_product(None)), "\"value\" is required");
        assert_eq!(
            message_of(validate_product(Some(&Value::Null))),
            "\"value\" must be of type object"
        );
        assert_eq!(
            message_of(validate_product(Some(&json!("Cola")))),
            "\"value\" must be of type object"
        );
    }

    #[test]
    fn test_each_missing_field_is_named() {
        let cases = [
            ("name", "\"Product Name\" is required"),
            ("description", "\"Description Name\" is required"),
            ("price", "\"Price\" is required"),
            ("stock", "\"Stock\" is required"),
            ("category", "\"Category\" is required"),
        ];

        for (field, expected) in cases {
            let mut data = cola();
            data.as_object_mut().unwrap().remove(field);
            assert_eq!(message_of(validate_product(Some(&data))), expected);
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let data = json!({ "price": "abc" });
        assert_eq!(
            message_of(validate_product(Some(&data))),
            "\"Product Name\" is required"
        );

        let data = json!({ "name": "Cola", "description": "Fizzy", "price": "abc" });
        assert_eq!(
            message_of(validate_product(Some(&data))),
            "\"Price\" must be a number"
        );
    }

    #[test]
    fn test_type_and_emptiness_rules() {
        let mut data = cola();
        data["name"] = json!("");
        assert_eq!(
            message_of(validate_product(Some(&data))),
            "\"Product Name\" is not allowed to be empty"
        );

        let mut data = cola();
        data["category"] = json!(7);
        assert_eq!(
            message_of(validate_product(Some(&data))),
            "\"Category\" must be a string"
        );

        let mut data = cola();
        data["price"] = json!("");
        assert_eq!(
            message_of(validate_product(Some(&data))),
            "\"Price\" must be a number"
        );

        let mut data = cola();
        data["stock"] = json!(2.5);
        assert_eq!(
            message_of(validate_product(Some(&data))),
            "\"Stock\" must be an integer"
        );
    }

    #[test]
    fn test_negative_numbers_pass_server_side() {
        let mut data = cola();
        data["price"] = json!(-1);
        data["stock"] = json!(-4);
        let payload = validate_product(Some(&data)).unwrap();
        assert_eq!(payload.price, -1.0);
        assert_eq!(payload.stock, -4);
    }

    #[test]
    fn test_large_numbers_are_rejected_not_rounded() {
        let mut data = cola();
        data["stock"] = serde_json::from_str("9007199254740993").unwrap();
        assert_eq!(
            message_of(validate_product(Some(&data))),
            "\"Stock\" must be a safe number"
        );

        let mut data = cola();
        data["stock"] = serde_json::from_str("9223372036854775808").unwrap();
        assert_eq!(
            message_of(validate_product(Some(&data))),
            "\"Stock\" must be a safe number"
        );

        let mut data = cola();
        data["stock"] = json!("9007199254740993");
        assert_eq!(
            message_of(validate_product(Some(&data))),
            "\"Stock\" must be a safe number"
        );

        let mut data = cola();
        data["price"] = json!(1e300);
        assert_eq!(
            message_of(validate_product(Some(&data))),
            "\"Price\" must be a safe number"
        );
    }

    #[test]
    fn test_largest_safe_integer_is_kept_exactly() {
        let mut data = cola();
        data["stock"] = json!(9_007_199_254_740_991_i64);
        let payload = validate_product(Some(&data)).unwrap();
        assert_eq!(payload.stock, 9_007_199_254_740_991);

        data["stock"] = json!(-9_007_199_254_740_991_i64);
        let payload = validate_product(Some(&data)).unwrap();
        assert_eq!(payload.stock, -9_007_199_254_740_991);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let mut data = cola();
        data["color"] = json!("red");
        assert_eq!(
            message_of(validate_product(Some(&data))),
            "\"color\" is not allowed"
        );
    }
}
