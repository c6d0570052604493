pub mod validated_json;

pub use validated_json::{validate_input, JsonBody, ValidatedJson};
