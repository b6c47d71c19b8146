use serde::Deserialize;

use super::entities::AccommodationCode;
use crate::errors::Result;
use crate::utils::validate::{validate_course_id, validate_state_key};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimedModuleRequest {
    pub student_id: i64,
    pub course_id: String,
    pub module_state_key: String,
    #[serde(default)]
    pub accommodation_code: AccommodationCode,
}

impl CreateTimedModuleRequest {
    pub fn validate(&self) -> Result<()> {
        validate_course_id(&self.course_id)?;
        validate_state_key(&self.module_state_key)
    }
}
