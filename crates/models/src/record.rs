use std::{collections::HashSet, fmt};

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::errors::ModelError;

/// Path segment of the single-record upsert route; cannot be used as an id.
pub const RESERVED_ID: &str = "records";

/// A record that lives in a collection category.
pub trait ContentRecord:
    Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static
{
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn title(&self) -> &str;

    /// Field-level checks beyond `id` and `title`.
    fn validate_fields(&self) -> Result<(), ModelError> {
        Ok(())
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.id().trim().is_empty() {
            return Err(ModelError::required("id"));
        }
        if self.id() == RESERVED_ID {
            return Err(ModelError::Validation(format!("'{RESERVED_ID}' is reserved and cannot be used as an id")));
        }
        if self.title().trim().is_empty() {
            return Err(ModelError::Validation(format!("title is required (id {})", self.id())));
        }
        self.validate_fields()
    }
}

/// Validate every record and reject duplicate ids.
pub fn validate_collection<T: ContentRecord>(records: &[T]) -> Result<(), ModelError> {
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        r.validate()?;
        if !seen.insert(r.id()) {
            return Err(ModelError::Validation(format!("duplicate id '{}'", r.id())));
        }
    }
    Ok(())
}

/// Links are either absolute http(s) URLs or site-relative paths.
pub fn validate_link(field: &str, value: Option<&str>) -> Result<(), ModelError> {
    match value {
        None => Ok(()),
        Some(v) if v.starts_with("http://") || v.starts_with("https://") || v.starts_with('/') => Ok(()),
        Some(v) => Err(ModelError::Validation(format!("{field} must be http(s) or site-relative, got '{v}'"))),
    }
}

/// A decoded value together with the JSON it was decoded from.
///
/// Serializes back to that JSON, not to the typed view: fields the type
/// fills with defaults stay absent, explicit `null`s stay `null` and key
/// spelling is kept, so a wholesale write reads back unchanged.
#[derive(Clone, PartialEq)]
pub struct Document<T> {
    value: T,
    raw: Value,
}

impl<T: Serialize + DeserializeOwned> Document<T> {
    pub fn from_raw(raw: Value) -> Result<Self, serde_json::Error> {
        let value = T::deserialize(&raw)?;
        Ok(Self { value, raw })
    }

    /// Wrap a value built in code; its JSON is the serialized typed view.
    pub fn from_value(value: T) -> Result<Self, serde_json::Error> {
        let raw = serde_json::to_value(&value)?;
        Ok(Self { value, raw })
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

// 只输出类型化视图：原始 JSON 可能含有 SMTP 密码
impl<T: fmt::Debug> fmt::Debug for Document<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Document").field(&self.value).finish()
    }
}

impl<T> Serialize for Document<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de, T: Serialize + DeserializeOwned> Deserialize<'de> for Document<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(serde::de::Error::custom)
    }
}

impl<T: ContentRecord> ContentRecord for Document<T> {
    fn id(&self) -> &str {
        self.value.id()
    }

    fn set_id(&mut self, id: String) {
        match &mut self.raw {
            Value::Object(map) => {
                map.insert("id".to_string(), Value::String(id.clone()));
                self.value.set_id(id);
            }
            // 非对象形式（如按位置的数组）无法就地改写，改用类型化视图
            _ => {
                self.value.set_id(id);
                if let Ok(raw) = serde_json::to_value(&self.value) {
                    self.raw = raw;
                }
            }
        }
    }

    fn title(&self) -> &str {
        self.value.title()
    }

    fn validate_fields(&self) -> Result<(), ModelError> {
        self.value.validate_fields()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ServiceOffering, Workshop};
    use serde_json::json;

    #[test]
    fn document_serializes_what_it_was_given() {
        let raw = json!({"id": "w1", "title": "W", "maxParticipants": null, "room": {"floor": 2}});
        let doc: Document<Workshop> = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(doc.get().max_participants, None);
        assert_eq!(doc.get().description, "");
        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
    }

    #[test]
    fn document_rejects_what_the_type_rejects() {
        let res = serde_json::from_value::<Document<ServiceOffering>>(json!({"title": "no id"}));
        assert!(res.is_err());
    }

    #[test]
    fn set_id_updates_both_views() {
        let mut doc: Document<Workshop> = Document::from_raw(json!({"id": "", "title": "W", "x": 1})).unwrap();
        doc.set_id("new-id".into());
        assert_eq!(doc.id(), "new-id");
        assert_eq!(doc.raw(), &json!({"id": "new-id", "title": "W", "x": 1}));
    }

    #[test]
    fn debug_hides_the_raw_document() {
        let doc: Document<crate::MailConfig> = Document::from_raw(
            json!({"host": "h", "port": 25, "from": "a@b", "auth": {"user": "u", "pass": "s3cret"}}),
        )
        .unwrap();
        assert!(!format!("{doc:?}").contains("s3cret"));
    }

    #[test]
    fn reserved_id_is_rejected() {
        let doc: Document<Workshop> = Document::from_raw(json!({"id": RESERVED_ID, "title": "W"})).unwrap();
        assert!(matches!(doc.validate(), Err(ModelError::Validation(_))));
    }
}
