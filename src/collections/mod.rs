//! Collection operations built on a single iteration primitive.

pub mod each;
pub mod fields;
pub mod invoke;
pub mod ops;
pub mod truthy;

pub use each::{Collection, JsonKey, Sequence};
pub use fields::Fields;
pub use invoke::{Method, MethodFn, MethodTable};
pub use ops::*;
pub use truthy::Truthy;
