pub mod validate;

pub use validate::{validate_course_id, validate_state_key};
