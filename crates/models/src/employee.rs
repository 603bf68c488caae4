use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, record::{self, Record}};

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 50;
pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 58;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub department: String,
}

impl Record for Employee {
    type Id = i64;

    const KIND: &'static str = "employee";

    fn id(&self) -> &i64 {
        &self.id
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.id <= 0 {
            return Err(ModelError::invalid_field("id", "must be greater than 0"));
        }
        let chars = self.name.chars().count();
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
            return Err(ModelError::Validation(format!(
                "name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
            )));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(ModelError::Validation(format!("age must be between {MIN_AGE} and {MAX_AGE}")));
        }
        record::require_text("department", &self.department)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(age: i32) -> Employee {
        Employee { id: 1, name: "John Doe".into(), age, department: "dept1".into() }
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert!(employee(17).validate().is_err());
        assert!(employee(18).validate().is_ok());
        assert!(employee(58).validate().is_ok());
        assert!(employee(59).validate().is_err());
    }

    #[test]
    fn name_length_counted_in_characters() {
        let mut e = employee(30);
        e.name = "Jo".into();
        assert!(e.validate().is_err());
        e.name = "Zoë".into();
        assert!(e.validate().is_ok());
        e.name = "x".repeat(51);
        assert!(e.validate().is_err());
    }

    #[test]
    fn id_must_be_positive() {
        let mut e = employee(30);
        e.id = 0;
        assert!(matches!(e.validate(), Err(ModelError::Validation(_))));
    }
}
