//! Compiles a criteria [`Expression`] into a SQLite `WHERE` fragment.
//!
//! Fixed columns are addressed directly. Every other field path is read out
//! of the `fields` JSON document with the path bound as a parameter, never
//! spliced into the SQL text.

use crate::{DbError, Result as DbErrorResult};

use wit_core::criteria::fields;
use wit_core::{Expression, Literal, Scalar};

use sqlx::{QueryBuilder, Sqlite};

enum Target {
    Column(&'static str),
    Json(String),
}

fn target(field: &str) -> DbErrorResult<Target> {
    match field {
        fields::SPACE => Ok(Target::Column("space_id")),
        fields::TYPE => Ok(Target::Column("type_id")),
        fields::NUMBER => Ok(Target::Column("number")),
        path if fields::is_valid_path(path) => Ok(Target::Json(format!("$.\"{path}\""))),
        other => Err(DbError::invalid(format!("invalid field name '{other}'"))),
    }
}

/// Append `expr` to `builder` as a parenthesized boolean condition.
pub fn push_expression(
    builder: &mut QueryBuilder<'_, Sqlite>,
    expr: &Expression,
) -> DbErrorResult<()> {
    match expr {
        Expression::And(left, right) => push_binary(builder, left, " AND ", right),
        Expression::Or(left, right) => push_binary(builder, left, " OR ", right),
        Expression::IsNull { field } => {
            match target(field)? {
                Target::Column(column) => {
                    builder.push(format!("{column} IS NULL"));
                }
                // A missing key, a JSON null and an empty array all count as unset
                Target::Json(path) => {
                    builder.push("(json_extract(fields, ");
                    builder.push_bind(path.clone());
                    builder.push(") IS NULL OR (json_type(fields, ");
                    builder.push_bind(path.clone());
                    builder.push(") = 'array' AND json_array_length(fields, ");
                    builder.push_bind(path);
                    builder.push(") = 0))");
                }
            }
            Ok(())
        }
        Expression::Equals { field, value } => {
            let target = target(field)?;
            match value {
                Literal::Scalar(scalar) => {
                    push_target(builder, &target);
                    builder.push(" = ");
                    push_scalar(builder, scalar);
                    Ok(())
                }
                Literal::Sequence(values) if values.is_empty() => Err(DbError::invalid(format!(
                    "empty value list for field '{field}'"
                ))),
                Literal::Sequence(values) => {
                    match target {
                        Target::Column(column) => {
                            builder.push(format!("{column} IN ("));
                            for (i, value) in values.iter().enumerate() {
                                if i > 0 {
                                    builder.push(", ");
                                }
                                push_scalar(builder, value);
                            }
                            builder.push(")");
                        }
                        // Every listed value must be an element of the stored array
                        Target::Json(path) => {
                            builder.push("(");
                            for (i, value) in values.iter().enumerate() {
                                if i > 0 {
                                    builder.push(" AND ");
                                }
                                builder.push("EXISTS (SELECT 1 FROM json_each(fields, ");
                                builder.push_bind(path.clone());
                                builder.push(") WHERE json_each.value = ");
                                push_scalar(builder, value);
                                builder.push(")");
                            }
                            builder.push(")");
                        }
                    }
                    Ok(())
                }
            }
        }
    }
}

fn push_binary(
    builder: &mut QueryBuilder<'_, Sqlite>,
    left: &Expression,
    operator: &str,
    right: &Expression,
) -> DbErrorResult<()> {
    builder.push("(");
    push_expression(builder, left)?;
    builder.push(operator);
    push_expression(builder, right)?;
    builder.push(")");
    Ok(())
}

fn push_target(builder: &mut QueryBuilder<'_, Sqlite>, target: &Target) {
    match target {
        Target::Column(column) => {
            builder.push(*column);
        }
        Target::Json(path) => {
            builder.push("json_extract(fields, ");
            builder.push_bind(path.clone());
            builder.push(")");
        }
    }
}

fn push_scalar(builder: &mut QueryBuilder<'_, Sqlite>, scalar: &Scalar) {
    match scalar {
        Scalar::Text(s) => {
            builder.push_bind(s.clone());
        }
        Scalar::Integer(i) => {
            builder.push_bind(*i);
        }
        Scalar::Boolean(b) => {
            builder.push_bind(*b);
        }
    }
}
