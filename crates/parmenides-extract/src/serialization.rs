//! JSON serialization options shared by materialization and responses.
//!
//! The options are applied around `serde_json`: on write, the serialized
//! value's keys are renamed and nulls optionally dropped; on read, incoming
//! keys are matched against a [`Bindable`] type's field table and rewritten
//! to the declared names before typed deserialization.

use crate::naming::{eq_ignore_case, NamingPolicy};
use crate::{Bindable, ExtractionError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Serializer options.
///
/// The [`Default`] value is the library default: names preserved, nulls
/// written, exact key matching on read.
///
/// # Example
///
/// ```rust
/// use parmenides_extract::{NamingPolicy, SerializationConfig};
///
/// let config = SerializationConfig::web();
/// assert_eq!(config.property_naming, NamingPolicy::CamelCase);
/// assert!(config.omit_null_properties);
/// assert!(config.case_insensitive_properties);
///
/// let config = SerializationConfig::default();
/// assert_eq!(config.property_naming, NamingPolicy::Preserve);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializationConfig {
    /// Naming policy for object property names.
    pub property_naming: NamingPolicy,

    /// Naming policy for keys of nested objects and maps.
    pub dictionary_key_naming: NamingPolicy,

    /// Whether properties whose value is `null` are left out on write.
    pub omit_null_properties: bool,

    /// Whether property names are matched ignoring case on read.
    pub case_insensitive_properties: bool,
}

impl SerializationConfig {
    /// Options for browser-facing APIs: camelCase names and keys, nulls
    /// omitted, case-insensitive reads.
    #[must_use]
    pub fn web() -> Self {
        Self {
            property_naming: NamingPolicy::CamelCase,
            dictionary_key_naming: NamingPolicy::CamelCase,
            omit_null_properties: true,
            case_insensitive_properties: true,
        }
    }

    /// Serializes `value` to JSON bytes with these options applied.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `value` cannot be serialized.
    pub fn to_vec<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, serde_json::Error> {
        let value = serde_json::to_value(value)?;
        serde_json::to_vec(&self.shape(value, self.property_naming))
    }

    /// Decodes a JSON body into `T` with these options applied.
    ///
    /// # Errors
    ///
    /// Returns a malformed-body error if the bytes are not JSON, are the
    /// JSON literal `null`, or do not fit the shape of `T`.
    pub fn from_slice<T: Bindable>(&self, body: &[u8]) -> Result<T, ExtractionError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ExtractionError::malformed_body(e.to_string()))?;

        let value = match value {
            Value::Null => return Err(ExtractionError::malformed_body("body decoded to null")),
            Value::Object(map) => Value::Object(self.match_fields::<T>(map)),
            other => other,
        };

        T::deserialize(value).map_err(|e| ExtractionError::malformed_body(e.to_string()))
    }

    fn shape(&self, value: Value, policy: NamingPolicy) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .filter(|(_, v)| !(self.omit_null_properties && v.is_null()))
                    .map(|(k, v)| {
                        let key = policy.apply(&k).into_owned();
                        (key, self.shape(v, self.dictionary_key_naming))
                    })
                    .collect(),
            ),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.shape(item, policy))
                    .collect(),
            ),
            other => other,
        }
    }

    fn match_fields<T: Bindable>(&self, map: Map<String, Value>) -> Map<String, Value> {
        map.into_iter()
            .map(|(key, value)| {
                let declared = T::FIELDS.iter().find(|field| {
                    let expected = self.property_naming.apply(field.name());
                    if self.case_insensitive_properties {
                        eq_ignore_case(&expected, &key)
                    } else {
                        expected == key.as_str()
                    }
                });
                match declared {
                    Some(field) => (field.name().to_string(), value),
                    None => (key, value),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExtractionErrorKind, FieldDescriptor, FromParam};
    use std::collections::BTreeMap;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Contact {
        first_name: String,
        nickname: Option<String>,
    }

    impl Bindable for Contact {
        const FIELDS: &'static [FieldDescriptor<Self>] = &[
            FieldDescriptor::new(
                "first_name",
                <String as FromParam>::KIND,
                |target: &mut Self, value: &str| {
                    target.first_name = String::from_param(value)?;
                    Ok(())
                },
            ),
            FieldDescriptor::new(
                "nickname",
                <Option<String> as FromParam>::KIND,
                |target: &mut Self, value: &str| {
                    target.nickname = <Option<String>>::from_param(value)?;
                    Ok(())
                },
            ),
        ];
    }

    fn contact() -> Contact {
        Contact {
            first_name: "Ada".to_string(),
            nickname: None,
        }
    }

    #[test]
    fn test_default_write_preserves_names_and_nulls() {
        let bytes = SerializationConfig::default().to_vec(&contact()).unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["first_name"], "Ada");
        assert!(json.get("nickname").unwrap().is_null());
    }

    #[test]
    fn test_web_write_camel_cases_and_omits_nulls() {
        let bytes = SerializationConfig::web().to_vec(&contact()).unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["firstName"], "Ada");
        assert!(json.get("first_name").is_none());
        assert!(json.get("nickname").is_none());
    }

    #[test]
    fn test_dictionary_keys_use_their_own_policy() {
        #[derive(Serialize)]
        struct Report {
            item_counts: BTreeMap<String, u32>,
        }

        let mut item_counts = BTreeMap::new();
        item_counts.insert("red_apples".to_string(), 3);

        let config = SerializationConfig {
            property_naming: NamingPolicy::CamelCase,
            ..SerializationConfig::default()
        };
        let bytes = config.to_vec(&Report { item_counts }).unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["itemCounts"]["red_apples"], 3);
    }

    #[test]
    fn test_read_with_exact_names() {
        let contact: Contact = SerializationConfig::default()
            .from_slice(br#"{"first_name":"Ada"}"#)
            .unwrap();

        assert_eq!(contact.first_name, "Ada");
        assert_eq!(contact.nickname, None);
    }

    #[test]
    fn test_read_with_camel_case_policy() {
        let config = SerializationConfig {
            property_naming: NamingPolicy::CamelCase,
            ..SerializationConfig::default()
        };

        let contact: Contact = config.from_slice(br#"{"firstName":"Ada"}"#).unwrap();
        assert_eq!(contact.first_name, "Ada");

        // Exact matching rejects other spellings; the field stays missing.
        let result = config.from_slice::<Contact>(br#"{"FIRSTNAME":"Ada"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_case_insensitive() {
        let contact: Contact = SerializationConfig::web()
            .from_slice(br#"{"FIRSTNAME":"Ada","NickName":"Countess"}"#)
            .unwrap();

        assert_eq!(contact.first_name, "Ada");
        assert_eq!(contact.nickname.as_deref(), Some("Countess"));
    }

    #[test]
    fn test_read_null_is_malformed() {
        let err = SerializationConfig::default()
            .from_slice::<Contact>(b"null")
            .unwrap_err();

        assert_eq!(err.kind(), ExtractionErrorKind::MalformedBody);
        assert!(err.to_string().contains("null"));
    }

    #[test]
    fn test_read_invalid_json_is_malformed() {
        let err = SerializationConfig::default()
            .from_slice::<Contact>(br#"{"first_name": "Ada", oops"#)
            .unwrap_err();

        assert!(err.is_malformed_body());
    }

    #[test]
    fn test_read_wrong_shape_is_malformed() {
        let err = SerializationConfig::default()
            .from_slice::<Contact>(b"[1, 2, 3]")
            .unwrap_err();

        assert!(err.is_malformed_body());
    }

    #[test]
    fn test_round_trip_with_web_options() {
        let config = SerializationConfig::web();
        let original = Contact {
            first_name: "Grace".to_string(),
            nickname: Some("Amazing Grace".to_string()),
        };

        let bytes = config.to_vec(&original).unwrap();
        let decoded: Contact = config.from_slice(&bytes).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_config_deserializes_from_json() {
        let config: SerializationConfig =
            serde_json::from_str(r#"{"property_naming":"camel_case","omit_null_properties":true}"#)
                .unwrap();

        assert_eq!(config.property_naming, NamingPolicy::CamelCase);
        assert_eq!(config.dictionary_key_naming, NamingPolicy::Preserve);
        assert!(config.omit_null_properties);
        assert!(!config.case_insensitive_properties);
    }
}
