use serde::{Deserialize, Deserializer, Serialize};

/// Records that carry a backend identifier
pub trait Identified {
    fn id(&self) -> &str;
}

/// A reference to another record
///
/// The backend returns either the bare identifier or the populated record,
/// depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(String),
    Populated(Box<T>),
}

impl<T: Identified> Ref<T> {
    /// Identifier of the referenced record, populated or not
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(record) => record.id(),
        }
    }
}

impl<T> Ref<T> {
    /// The populated record, if the backend sent one
    pub fn populated(&self) -> Option<&T> {
        match self {
            Ref::Id(_) => None,
            Ref::Populated(record) => Some(record),
        }
    }
}

/// Accept a JSON string or number and keep it as text
pub(crate) fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
    })
}

/// Identifier of a backend record, read from `_id` and/or `id`
///
/// Records serialized with virtuals carry both keys; `_id` wins. Used with
/// `#[serde(flatten, with = "record_id")]` so both keys are consumed.
pub(crate) mod record_id {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    struct Keys {
        #[serde(rename = "_id")]
        primary: Option<String>,
        id: Option<String>,
    }

    #[derive(Serialize)]
    struct Canonical<'a> {
        #[serde(rename = "_id")]
        id: &'a str,
    }

    pub fn serialize<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
        Canonical { id }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let keys = Keys::deserialize(deserializer)?;
        keys.primary
            .or(keys.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| D::Error::missing_field("_id"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        #[serde(flatten, with = "record_id")]
        id: String,
        nombre: String,
    }

    #[test]
    fn test_record_id_from_either_key() {
        let mongo: Record = serde_json::from_value(json!({ "_id": "a1", "nombre": "x" })).unwrap();
        let plain: Record = serde_json::from_value(json!({ "id": "a1", "nombre": "x" })).unwrap();
        assert_eq!(mongo, plain);
    }

    #[test]
    fn test_record_id_prefers_mongo_key_when_both_are_sent() {
        let record: Record =
            serde_json::from_value(json!({ "_id": "a1", "id": "virtual", "nombre": "x" }))
                .unwrap();
        assert_eq!(record.id, "a1");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "_id": "a1", "nombre": "x" })
        );
    }

    #[test]
    fn test_record_without_id_is_rejected() {
        assert!(serde_json::from_value::<Record>(json!({ "nombre": "x" })).is_err());
    }

    #[test]
    fn test_ref_falls_back_to_bare_id() {
        let reference: Ref<Record> = serde_json::from_value(json!("a1")).unwrap();
        assert_eq!(reference, Ref::Id("a1".to_string()));
        assert_eq!(reference.populated(), None);
    }
}
