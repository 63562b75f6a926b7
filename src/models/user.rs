use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::reference::{record_id, Identified};

/// The two roles a DOMU account can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Landlord
    #[serde(rename = "propietario")]
    Owner,
    /// Renter
    #[serde(rename = "inquilino")]
    Tenant,
}

impl Role {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "propietario",
            Role::Tenant => "inquilino",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Owner => "Propietario",
            Role::Tenant => "Inquilino",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "propietario" | "owner" => Ok(Role::Owner),
            "inquilino" | "tenant" => Ok(Role::Tenant),
            other => Err(format!(
                "unknown role '{}' (expected propietario or inquilino)",
                other
            )),
        }
    }
}

/// An account as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten, with = "record_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "correo")]
    pub email: String,
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contraseña")]
    pub password: String,
    #[serde(rename = "rol")]
    pub role: Role,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contraseña")]
    pub password: String,
}

/// Body of `PUT /users/profile`
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserData {
    pub id: String,
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "correo", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_accepts_mongo_id() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "nombre": "Ana",
            "rol": "inquilino",
            "correo": "ana@domu.cl"
        }))
        .unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Role::Tenant);
    }

    #[test]
    fn test_user_with_id_virtual_alongside_mongo_id() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "id": "u1",
            "nombre": "Ana",
            "rol": "inquilino",
            "correo": "ana@domu.cl"
        }))
        .unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({ "_id": "u1", "nombre": "Ana", "rol": "inquilino", "correo": "ana@domu.cl" })
        );
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("propietario".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("Tenant".parse::<Role>().unwrap(), Role::Tenant);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_login_payload_uses_backend_field_names() {
        let body = serde_json::to_value(LoginData {
            email: "ana@domu.cl".to_string(),
            password: "secreto".to_string(),
        })
        .unwrap();

        assert_eq!(body, json!({ "correo": "ana@domu.cl", "contraseña": "secreto" }));
    }

    #[test]
    fn test_profile_update_skips_missing_fields() {
        let body = serde_json::to_value(UpdateUserData {
            id: "u1".to_string(),
            name: Some("Ana María".to_string()),
            email: None,
        })
        .unwrap();

        assert_eq!(body, json!({ "id": "u1", "nombre": "Ana María" }));
    }
}
