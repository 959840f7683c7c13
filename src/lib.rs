
//! Applied functions, symbolic derivatives and lambda abstractions
//! over an immutable expression tree.
//!
//! The entry points most callers need are
//! [`FunctionClass`](expr::function::FunctionClass) for declaring
//! function symbols, [`diff`](expr::calculus::diff) for
//! differentiation, [`Lambda`](expr::lambda::Lambda) for abstraction,
//! and [`expand`](expr::expand::expand).

pub mod expr;
pub mod util;
