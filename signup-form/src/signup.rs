//! The sign-up form: field names, messages, schema and typed result.

use serde::Serialize;
use signup_form_types::{
    FieldDescriptor, FieldKind, FieldValue, Form, FormValues, Rule, ValidationSchema, ValueError,
};

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirmPassword";
pub const AGREE_TO_TERMS: &str = "agreeToTerms";

pub const EMAIL_REQUIRED: &str = "Email is a required field";
pub const EMAIL_INVALID: &str = "Email must be a valid email";
pub const PASSWORD_REQUIRED: &str = "Password is a required field";
pub const PASSWORD_TOO_SHORT: &str = "Seems a bit short...";
pub const PASSWORD_TOO_LONG: &str = "We prefer insecure system, try a shorter password.";
pub const CONFIRM_PASSWORD_REQUIRED: &str = "Confirm Password is a required field";
pub const PASSWORDS_MUST_MATCH: &str = "Passwords must match";
pub const MUST_AGREE_TO_TERMS: &str = "Must agree to terms to continue";

pub const PASSWORD_MIN_LEN: usize = 2;
pub const PASSWORD_MAX_LEN: usize = 10;

/// Confirmation must equal the current `password` of the same snapshot.
pub fn passwords_match(value: Option<&FieldValue>, values: &FormValues) -> bool {
    value == values.get(PASSWORD)
}

/// Terms must be explicitly accepted.
pub fn is_true(value: Option<&FieldValue>, _: &FormValues) -> bool {
    value.and_then(FieldValue::as_bool) == Some(true)
}

/// Builds the sign-up validation schema.
pub fn signup_schema() -> ValidationSchema {
    ValidationSchema::new(vec![
        FieldDescriptor::new(EMAIL, "Email", FieldKind::Input)
            .with_placeholder("johndoe@example.com")
            .with_rule(Rule::required(EMAIL_REQUIRED))
            .with_rule(Rule::email(EMAIL_INVALID)),
        FieldDescriptor::new(PASSWORD, "Password", FieldKind::Masked)
            .with_placeholder("password")
            .with_rule(Rule::required(PASSWORD_REQUIRED))
            .with_rule(Rule::min_length(PASSWORD_MIN_LEN, PASSWORD_TOO_SHORT))
            .with_rule(Rule::max_length(PASSWORD_MAX_LEN, PASSWORD_TOO_LONG)),
        FieldDescriptor::new(CONFIRM_PASSWORD, "Confirm Password", FieldKind::Masked)
            .with_placeholder("Confirm Password")
            .with_rule(Rule::required(CONFIRM_PASSWORD_REQUIRED))
            .with_rule(Rule::custom(
                "passwords-match",
                PASSWORDS_MUST_MATCH,
                passwords_match,
            )),
        FieldDescriptor::new(AGREE_TO_TERMS, "Agree to Terms", FieldKind::Toggle)
            .with_rule(Rule::custom("is-true", MUST_AGREE_TO_TERMS, is_true)),
    ])
    .with_title("Sign Up")
}

/// A submitted sign-up, as handed to the result-surfacing collaborator.
///
/// Serializes with the form's own field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
}

impl SignUp {
    /// Pretty-printed JSON of the submitted values.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Form for SignUp {
    fn schema() -> ValidationSchema {
        signup_schema()
    }

    fn from_values(values: &FormValues) -> Result<Self, ValueError> {
        Ok(Self {
            email: values.get_text(EMAIL)?.to_string(),
            password: values.get_text(PASSWORD)?.to_string(),
            confirm_password: values.get_text(CONFIRM_PASSWORD)?.to_string(),
            agree_to_terms: values.get_bool(AGREE_TO_TERMS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> FormValues {
        signup_schema()
            .initial_values()
            .with(EMAIL, "johndoe@example.com")
            .with(PASSWORD, "abc")
            .with(CONFIRM_PASSWORD, "abc")
            .with(AGREE_TO_TERMS, true)
    }

    #[test]
    fn fresh_form_errors() {
        let schema = signup_schema();
        let errors = schema.validate(&schema.initial_values());

        assert_eq!(errors.get(EMAIL), Some(EMAIL_REQUIRED));
        assert_eq!(errors.get(PASSWORD), Some(PASSWORD_REQUIRED));
        assert_eq!(errors.get(CONFIRM_PASSWORD), Some(CONFIRM_PASSWORD_REQUIRED));
        assert_eq!(errors.get(AGREE_TO_TERMS), Some(MUST_AGREE_TO_TERMS));
    }

    #[test]
    fn valid_snapshot_has_no_errors() {
        assert!(signup_schema().validate(&valid()).is_empty());
    }

    #[test]
    fn email_format() {
        let values = valid().with(EMAIL, "johndoe");
        let errors = signup_schema().validate(&values);
        assert_eq!(errors.get(EMAIL), Some(EMAIL_INVALID));
    }

    #[test]
    fn password_bounds_are_inclusive() {
        let schema = signup_schema();
        for ok in ["ab", "1234567890"] {
            let values = valid().with(PASSWORD, ok).with(CONFIRM_PASSWORD, ok);
            assert_eq!(schema.validate(&values).get(PASSWORD), None, "{ok}");
        }
        let values = valid().with(PASSWORD, "a");
        assert_eq!(schema.validate(&values).get(PASSWORD), Some(PASSWORD_TOO_SHORT));
        let values = valid().with(PASSWORD, "12345678901");
        assert_eq!(schema.validate(&values).get(PASSWORD), Some(PASSWORD_TOO_LONG));
    }

    #[test]
    fn confirmation_follows_password() {
        let schema = signup_schema();
        let values = valid().with(PASSWORD, "abd");
        assert_eq!(
            schema.validate(&values).get(CONFIRM_PASSWORD),
            Some(PASSWORDS_MUST_MATCH)
        );
    }

    #[test]
    fn from_values_and_json() {
        let signup = SignUp::from_values(&valid()).unwrap();
        assert_eq!(signup.email, "johndoe@example.com");
        assert!(signup.agree_to_terms);

        let json = signup.to_json().unwrap();
        assert!(json.contains("\"confirmPassword\": \"abc\""));
        assert!(json.contains("\"agreeToTerms\": true"));
        let email_pos = json.find("email").unwrap();
        let terms_pos = json.find("agreeToTerms").unwrap();
        assert!(email_pos < terms_pos);
    }
}
