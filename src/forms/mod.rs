//! Checks a screen runs before any request is sent
//!
//! Failures here never reach the API layer; they carry the message the user
//! should see.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::models::{LoginData, RegisterData, Role};
use crate::utils::DomuError;

static NON_PRICE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.]").unwrap());
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*(\.[0-9]*)?").unwrap());

/// Raw input of the registration form
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl RegistrationForm {
    pub fn validate(self) -> Result<RegisterData, DomuError> {
        if [&self.name, &self.email, &self.password, &self.confirm_password]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(invalid("Por favor, complete todos los campos."));
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(invalid(format!(
                "La contraseña debe tener al menos {} caracteres.",
                MIN_PASSWORD_LENGTH
            )));
        }

        if self.password != self.confirm_password {
            return Err(invalid("Las contraseñas no coinciden."));
        }

        Ok(RegisterData {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
            role: self.role,
        })
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<LoginData, DomuError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(invalid("Por favor, ingrese su email y contraseña."));
    }

    Ok(LoginData {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

/// Lenient price parsing: input like "$ 450000 CLP" keeps digits and dots only
///
/// The leading number of what remains is the price, so a second dot ends it
/// ("1.200.000" is 1.2). No number at all counts as 0.
pub fn parse_price(input: &str) -> f64 {
    let digits = NON_PRICE_CHARS.replace_all(input, "");
    LEADING_NUMBER
        .find(&digits)
        .and_then(|number| number.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn invalid(message: impl Into<String>) -> DomuError {
    DomuError::ValidationError(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            name: "Ana".to_string(),
            email: " ana@domu.cl ".to_string(),
            password: "secreto".to_string(),
            confirm_password: "secreto".to_string(),
            role: Role::Tenant,
        }
    }

    fn message(result: Result<RegisterData, DomuError>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_valid_registration() {
        let data = form().validate().unwrap();
        assert_eq!(data.email, "ana@domu.cl");
        assert_eq!(data.role, Role::Tenant);
    }

    #[test]
    fn test_registration_rules() {
        let mut missing = form();
        missing.name = "  ".to_string();
        assert_eq!(message(missing.validate()), "Por favor, complete todos los campos.");

        let mut short = form();
        short.password = "abc".to_string();
        short.confirm_password = "abc".to_string();
        assert_eq!(
            message(short.validate()),
            "La contraseña debe tener al menos 6 caracteres."
        );

        let mut mismatch = form();
        mismatch.confirm_password = "otro123".to_string();
        assert_eq!(message(mismatch.validate()), "Las contraseñas no coinciden.");
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("", "x").is_err());
        assert!(validate_login("a@b.cl", "").is_err());
        assert_eq!(validate_login(" a@b.cl", "x").unwrap().email, "a@b.cl");
    }

    #[test]
    fn test_price_parsing() {
        assert_eq!(parse_price("450000"), 450000.0);
        assert_eq!(parse_price("$ 450000 CLP"), 450000.0);
        assert_eq!(parse_price("1200.50"), 1200.5);
        assert_eq!(parse_price("gratis"), 0.0);
        assert_eq!(parse_price("1.2.3"), 1.2);
        assert_eq!(parse_price("$1.200.000"), 1.2);
        assert_eq!(parse_price(".5"), 0.5);
        assert_eq!(parse_price("."), 0.0);
    }
}
