use crate::errors::{CoursewareError, Result};

/// course_id / module_id 列的最大长度
pub const MAX_KEY_LENGTH: usize = 255;

fn validate_length(field: &str, value: &str, max: usize) -> Result<()> {
    let length = value.chars().count();
    if length > max {
        return Err(CoursewareError::validation(format!(
            "{field} length must be at most {max} characters, got {length}"
        )));
    }
    Ok(())
}

pub fn validate_course_id(course_id: &str) -> Result<()> {
    validate_length("course_id", course_id, MAX_KEY_LENGTH)
}

pub fn validate_state_key(state_key: &str) -> Result<()> {
    validate_length("module_state_key", state_key, MAX_KEY_LENGTH)
}
