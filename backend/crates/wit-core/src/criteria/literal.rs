use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single comparable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Integer(i64),
    Text(String),
}

/// Right-hand side of an equality predicate. A sequence means set
/// membership: every element must be present in the field's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
}

impl Literal {
    pub fn sequence<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Literal::Sequence(values.into_iter().map(Into::into).collect())
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Literal::Sequence(_))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<Uuid> for Scalar {
    fn from(value: Uuid) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

macro_rules! literal_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::Scalar(value.into())
                }
            }
        )*
    };
}

literal_from_scalar!(&str, String, Uuid, i64, bool);

impl From<Scalar> for Literal {
    fn from(value: Scalar) -> Self {
        Literal::Scalar(value)
    }
}

impl From<Vec<Scalar>> for Literal {
    fn from(values: Vec<Scalar>) -> Self {
        Literal::Sequence(values)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Boolean(b) => write!(f, "{b}"),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Scalar(s) => write!(f, "{s}"),
            Literal::Sequence(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}
