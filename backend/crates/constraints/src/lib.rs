//! Declarative field constraint checking for inbound request payloads.
//!
//! A [`ConstraintSpec`] lists the fields an input shape accepts together with
//! the rules each field must satisfy. [`check`] evaluates every field
//! independently so a single pass reports all violations at once.
//!
//! ```
//! use constraints::{Coercion, ConstraintSpec, FieldKind, FieldSpec, Format};
//! use serde_json::json;
//!
//! let spec = ConstraintSpec::builder()
//!     .field(FieldSpec::required("name").kind(FieldKind::String).min_length(1))
//!     .field(FieldSpec::required("email").kind(FieldKind::String).format(Format::Email))
//!     .field(
//!         FieldSpec::optional("age")
//!             .coerce(Coercion::Number)
//!             .kind(FieldKind::Integer)
//!             .min(0.0)
//!             .max(120.0),
//!     )
//!     .build()
//!     .expect("spec declarations are consistent");
//!
//! let errors = spec
//!     .check(&json!({ "email": "not-an-email", "age": "200" }))
//!     .expect_err("input violates the spec");
//! assert_eq!(errors.as_slice().len(), 3);
//! ```

mod check;
mod error;
mod spec;

pub use check::{Accepted, BODY_FIELD, check};
pub use error::{ValidationError, ValidationErrors};
pub use spec::{
    Coercion, ConstraintSpec, ConstraintSpecBuilder, FieldKind, FieldSpec, Format, SpecError,
};
