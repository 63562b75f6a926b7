use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use super::property::Property;
use super::reference::{record_id, text_or_number, Identified, Ref};
use super::user::User;
use crate::utils::DomuError;

/// A lease between a landlord and a tenant for one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    #[serde(flatten, with = "record_id")]
    pub id: String,
    #[serde(rename = "fechaInicio")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "fechaFin")]
    pub end_date: DateTime<Utc>,
    /// Months, as sent by the backend
    #[serde(rename = "duracion", deserialize_with = "text_or_number")]
    pub duration: String,
    #[serde(rename = "condiciones", default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(rename = "idPropietario")]
    pub owner: Ref<User>,
    #[serde(rename = "idInquilino")]
    pub tenant: Ref<User>,
    #[serde(rename = "idPropiedad")]
    pub property: Ref<Property>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Contract {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /contratos`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateContractData {
    #[serde(rename = "fechaInicio")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "fechaFin")]
    pub end_date: DateTime<Utc>,
    #[serde(rename = "duracion")]
    pub duration: u32,
    #[serde(rename = "condiciones", skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(rename = "idInquilino")]
    pub tenant_id: String,
    #[serde(rename = "idPropiedad")]
    pub property_id: String,
}

impl CreateContractData {
    /// Build a contract running `months` calendar months from `start`
    pub fn starting_at(
        start: DateTime<Utc>,
        months: u32,
        tenant_id: impl Into<String>,
        property_id: impl Into<String>,
        conditions: Option<String>,
    ) -> Result<Self, DomuError> {
        if months == 0 {
            return Err(DomuError::ValidationError(
                "La duración debe ser de al menos un mes.".to_string(),
            ));
        }

        let end_date = start.checked_add_months(Months::new(months)).ok_or_else(|| {
            DomuError::ValidationError("La fecha de término está fuera de rango.".to_string())
        })?;

        Ok(Self {
            start_date: start,
            end_date,
            duration: months,
            conditions: conditions.filter(|c| !c.trim().is_empty()),
            tenant_id: tenant_id.into(),
            property_id: property_id.into(),
        })
    }
}
