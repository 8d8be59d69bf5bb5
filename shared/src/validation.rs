use crate::error::ValidationError;
use crate::types::{UserCandidate, UserInput};

/// Check that both `name` and `email` are present and non-empty.
///
/// Values are returned untouched. Email format is not checked here.
pub fn validate(candidate: UserCandidate) -> Result<UserInput, ValidationError> {
    let name = required(candidate.name, "name")?;
    let email = required(candidate.email, "email")?;
    Ok(UserInput { name, email })
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: Option<&str>, email: Option<&str>) -> UserCandidate {
        UserCandidate {
            name: name.map(String::from),
            email: email.map(String::from),
        }
    }

    #[test]
    fn accepts_complete_payload() {
        let input = validate(candidate(Some("Ada"), Some("ada@x.io"))).unwrap();
        assert_eq!(input, UserInput::new("Ada", "ada@x.io"));
    }

    #[test]
    fn rejects_missing_or_empty_name() {
        assert_eq!(
            validate(candidate(None, Some("ada@x.io"))),
            Err(ValidationError::MissingField("name"))
        );
        assert_eq!(
            validate(candidate(Some(""), Some("ada@x.io"))),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn rejects_missing_or_empty_email() {
        assert_eq!(
            validate(candidate(Some("Ada"), None)),
            Err(ValidationError::MissingField("email"))
        );
        assert_eq!(
            validate(candidate(Some("Ada"), Some(""))),
            Err(ValidationError::MissingField("email"))
        );
    }

    #[test]
    fn name_is_checked_before_email() {
        assert_eq!(
            validate(candidate(None, None)),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn values_are_not_normalized() {
        let input = validate(candidate(Some("  Ada "), Some("not-an-email"))).unwrap();
        assert_eq!(input.name, "  Ada ");
        assert_eq!(input.email, "not-an-email");
    }
}
