//! The `filter[expression]` language.
//!
//! ```text
//! {"$AND": [{"system.state": "open"}, {"$OR": [{"system.area": "a1"}, {"system.area": "a2"}]}]}
//! ```
//!
//! A node is either an operator object (`$AND` / `$OR` with a non-empty
//! array of nodes) or a leaf object of field/value pairs. A leaf value may be
//! wrapped as `{"$EQ": value}`. `$OPTS` is accepted anywhere and ignored.
//! A whole expression holds at most [`MAX_PREDICATES`] field predicates.

use crate::criteria::Expression;
use crate::error::{CoreError, Result as CoreResult};
use crate::filter::{MAX_PREDICATES, simple_query};
use crate::params;

use serde_json::{Map, Value};

const AND: &str = "$AND";
const OR: &str = "$OR";
const EQ: &str = "$EQ";
const OPTS: &str = "$OPTS";

pub fn parse(input: &str) -> CoreResult<Expression> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| bad(format!("filter[expression] is not valid JSON: {e}")))?;
    let mut budget = MAX_PREDICATES;
    node(&value, &mut budget)
}

/// `budget` is the number of field predicates still allowed.
fn node(value: &Value, budget: &mut usize) -> CoreResult<Expression> {
    let Value::Object(object) = value else {
        return Err(bad(format!("expected an object, got {value}")));
    };

    let mut operator: Option<(&str, &Value)> = None;
    let mut leaf = Map::new();
    for (key, value) in object {
        match key.as_str() {
            OPTS => {}
            AND | OR => {
                if operator.is_some() {
                    return Err(bad("only one of $AND / $OR is allowed per object"));
                }
                operator = Some((key.as_str(), value));
            }
            k if k.starts_with('$') => {
                return Err(bad(format!("unknown operator '{k}'")));
            }
            _ => {
                leaf.insert(key.clone(), unwrap_eq(key, value)?);
            }
        }
    }

    match operator {
        Some((op, operands)) => {
            if !leaf.is_empty() {
                return Err(bad(format!("{op} cannot be mixed with field predicates")));
            }
            let Value::Array(items) = operands else {
                return Err(bad(format!("{op} expects an array")));
            };
            if items.len() > *budget {
                return Err(too_many());
            }
            let children = items
                .iter()
                .map(|item| node(item, budget))
                .collect::<CoreResult<Vec<_>>>()?;
            let combined = if op == AND {
                Expression::all(children)
            } else {
                Expression::any(children)
            };
            combined.ok_or_else(|| bad(format!("{op} requires at least one operand")))
        }
        None => {
            *budget = budget.checked_sub(leaf.len()).ok_or_else(too_many)?;
            simple_query::conjunction(&leaf, params::FILTER_EXPRESSION)?
                .ok_or_else(|| bad("empty expression"))
        }
    }
}

/// `{"$EQ": v}` unwraps to `v`; any other `$` key inside a leaf value is
/// rejected.
fn unwrap_eq(field: &str, value: &Value) -> CoreResult<Value> {
    let Value::Object(inner) = value else {
        return Ok(value.clone());
    };
    let mut unwrapped = None;
    for (key, v) in inner {
        match key.as_str() {
            EQ => unwrapped = Some(v.clone()),
            OPTS => {}
            other => {
                return Err(bad(format!(
                    "unsupported operator '{other}' for field '{field}'"
                )));
            }
        }
    }
    unwrapped.ok_or_else(|| bad(format!("missing $EQ for field '{field}'")))
}

#[track_caller]
fn too_many() -> CoreError {
    bad(format!(
        "too many predicates (at most {MAX_PREDICATES} per expression)"
    ))
}

#[track_caller]
fn bad(message: impl Into<String>) -> CoreError {
    CoreError::bad_parameter(params::FILTER_EXPRESSION, message)
}
