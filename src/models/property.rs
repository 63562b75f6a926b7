use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::reference::{record_id, Identified, Ref};
use super::user::User;

/// Kind of dwelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "casa")]
    House,
    #[serde(rename = "departamento")]
    Apartment,
    #[serde(rename = "otro")]
    Other,
}

impl PropertyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::House => "casa",
            PropertyKind::Apartment => "departamento",
            PropertyKind::Other => "otro",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "casa" | "house" => Ok(PropertyKind::House),
            "departamento" | "apartment" => Ok(PropertyKind::Apartment),
            "otro" | "other" => Ok(PropertyKind::Other),
            other => Err(format!(
                "unknown property type '{}' (expected casa, departamento or otro)",
                other
            )),
        }
    }
}

/// Occupancy status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyStatus {
    #[serde(rename = "ocupada")]
    Occupied,
    #[default]
    #[serde(rename = "disponible")]
    Available,
    #[serde(rename = "mantenimiento")]
    Maintenance,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Occupied => "ocupada",
            PropertyStatus::Available => "disponible",
            PropertyStatus::Maintenance => "mantenimiento",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rental listing owned by a landlord
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(flatten, with = "record_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "fotos", default)]
    pub photos: Vec<String>,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "precioBase")]
    pub base_price: f64,
    #[serde(rename = "tipo")]
    pub kind: PropertyKind,
    #[serde(rename = "caracteristicas", default)]
    pub features: String,
    #[serde(rename = "estado", default)]
    pub status: PropertyStatus,
    #[serde(rename = "propietario", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Ref<User>>,
    #[serde(rename = "idPropietario", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Property {
    /// Identifier of the owning user, from whichever field the backend filled
    pub fn owner_ref(&self) -> Option<&str> {
        self.owner_id
            .as_deref()
            .or_else(|| self.owner.as_ref().map(|owner| owner.id()))
    }
}

impl Identified for Property {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /propiedades/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePropertyData {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "precioBase")]
    pub base_price: f64,
    #[serde(rename = "tipo")]
    pub kind: PropertyKind,
    #[serde(rename = "caracteristicas", skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(rename = "fotos", skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

/// Body of `PUT /propiedades/:id`; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePropertyData {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "precioBase", skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PropertyKind>,
    #[serde(rename = "caracteristicas", skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(rename = "fotos", skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

impl UpdatePropertyData {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.base_price.is_none()
            && self.kind.is_none()
            && self.features.is_none()
            && self.photos.is_none()
    }

    /// Overlay the fields set in `changes` on top of `self`
    pub fn merge(mut self, changes: UpdatePropertyData) -> Self {
        self.name = changes.name.or(self.name);
        self.address = changes.address.or(self.address);
        self.base_price = changes.base_price.or(self.base_price);
        self.kind = changes.kind.or(self.kind);
        self.features = changes.features.or(self.features);
        self.photos = changes.photos.or(self.photos);
        self
    }
}

/// Every editable field of a fetched snapshot
impl From<&Property> for UpdatePropertyData {
    fn from(property: &Property) -> Self {
        Self {
            name: Some(property.name.clone()),
            address: Some(property.address.clone()),
            base_price: Some(property.base_price),
            kind: Some(property.kind),
            features: Some(property.features.clone()),
            photos: Some(property.photos.clone()),
        }
    }
}
