//! Input Parsing and Validation
//!
//! Turns client-supplied statistics (form fields or JSON) into a checked
//! [`feature_engine::RawPlayerStats`].

mod bounds;
mod error;
mod parser;
mod validator;

pub use bounds::{default_player, FieldBounds};
pub use error::ValidationError;
pub use parser::{parse_form, parse_value, parse_values, RawValue};
pub use validator::{ValidationConfig, Validator};
