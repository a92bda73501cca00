pub mod expression;
pub mod fields;
pub mod literal;

pub use expression::Expression;
pub use literal::{Literal, Scalar};
