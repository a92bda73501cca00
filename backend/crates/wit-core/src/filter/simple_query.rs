//! The `filter` query language: a flat JSON object of field/value pairs.
//!
//! `{"system.state": "open", "system.assignees": ["u1"], "system.area": null}`
//! yields the conjunction of one predicate per key, in key order.

use crate::criteria::{Expression, Literal, Scalar, fields};
use crate::error::{CoreError, Result as CoreResult};
use crate::filter::{MAX_PREDICATES, MAX_SEQUENCE_VALUES};
use crate::params;

use serde_json::{Map, Value};

/// Parse a `filter` value. An empty input or an empty object yields `None`.
pub fn parse(input: &str) -> CoreResult<Option<Expression>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(input).map_err(|e| {
        CoreError::bad_parameter(params::FILTER, format!("filter is not valid JSON: {e}"))
    })?;
    let Value::Object(object) = value else {
        return Err(CoreError::bad_parameter(
            params::FILTER,
            "filter must be a JSON object",
        ));
    };
    conjunction(&object, params::FILTER)
}

/// And-combine one predicate per key of `object`, keys in lexicographic order.
pub(crate) fn conjunction(
    object: &Map<String, Value>,
    parameter: &str,
) -> CoreResult<Option<Expression>> {
    if object.len() > MAX_PREDICATES {
        return Err(CoreError::bad_parameter(
            parameter,
            format!(
                "too many predicates: {} (at most {MAX_PREDICATES})",
                object.len()
            ),
        ));
    }

    let mut keys: Vec<&String> = object.keys().collect();
    keys.sort();

    let predicates = keys
        .into_iter()
        .map(|key| predicate(key, &object[key.as_str()], parameter))
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(Expression::all(predicates))
}

/// `null` becomes an IsNull check, a scalar or an array of scalars an
/// equality check.
pub(crate) fn predicate(field: &str, value: &Value, parameter: &str) -> CoreResult<Expression> {
    if !fields::is_valid_path(field) {
        return Err(CoreError::bad_parameter(
            parameter,
            format!("invalid field name '{field}'"),
        ));
    }
    match value {
        Value::Null => Ok(Expression::is_null(field)),
        Value::Array(items) => {
            if items.is_empty() {
                return Err(CoreError::bad_parameter(
                    parameter,
                    format!("empty value list for field '{field}'"),
                ));
            }
            if items.len() > MAX_SEQUENCE_VALUES {
                return Err(CoreError::bad_parameter(
                    parameter,
                    format!(
                        "too many values for field '{field}': {} (at most {MAX_SEQUENCE_VALUES})",
                        items.len()
                    ),
                ));
            }
            let scalars = items
                .iter()
                .map(|item| scalar(field, item, parameter))
                .collect::<CoreResult<Vec<_>>>()?;
            Ok(Expression::equals(field, Literal::Sequence(scalars)))
        }
        other => Ok(Expression::equals(
            field,
            Literal::Scalar(scalar(field, other, parameter)?),
        )),
    }
}

fn scalar(field: &str, value: &Value, parameter: &str) -> CoreResult<Scalar> {
    match value {
        Value::String(s) => Ok(Scalar::Text(s.clone())),
        Value::Bool(b) => Ok(Scalar::Boolean(*b)),
        Value::Number(n) => n.as_i64().map(Scalar::Integer).ok_or_else(|| {
            CoreError::bad_parameter(
                parameter,
                format!("field '{field}' only supports integer numbers, got {n}"),
            )
        }),
        other => Err(CoreError::bad_parameter(
            parameter,
            format!("unsupported value for field '{field}': {other}"),
        )),
    }
}
