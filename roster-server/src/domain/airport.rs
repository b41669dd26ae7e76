//! Airport records and roster airport references.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::IataCode;

/// An airport record from the airport directory.
///
/// The parser only ever matches on [`Airport::iata`]. Every other attribute
/// is kept as raw JSON in [`Airport::attributes`] and passed through to the
/// caller untouched, whatever its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// Raw IATA code. Anything other than a JSON string reads as empty.
    #[serde(rename = "IATA", default, deserialize_with = "lenient_code")]
    pub iata: String,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

fn lenient_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(code) => code,
        _ => String::new(),
    })
}

impl Airport {
    /// Create a record carrying only an IATA code and a name.
    pub fn new(iata: IataCode, name: impl Into<String>) -> Self {
        let mut attributes = Map::new();
        attributes.insert("name".to_string(), Value::String(name.into()));
        Self {
            iata: iata.as_str().to_string(),
            attributes,
        }
    }

    /// The record's IATA code, if the directory holds a valid one.
    ///
    /// Directory rows for small airfields often carry an empty or
    /// placeholder code; those never match a roster airport.
    pub fn iata_code(&self) -> Option<IataCode> {
        IataCode::parse(self.iata.trim()).ok()
    }
}

/// An airport field on a duty: either the bare roster code or the
/// directory record it resolved to.
///
/// Serializes as a plain string when unresolved and as the airport object
/// once resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AirportRef {
    Unresolved(IataCode),
    Resolved(Box<Airport>),
}

impl AirportRef {
    /// Returns the bare code if this reference has not been resolved.
    pub fn unresolved(&self) -> Option<IataCode> {
        match self {
            AirportRef::Unresolved(code) => Some(*code),
            AirportRef::Resolved(_) => None,
        }
    }

    /// Returns the airport record if this reference has been resolved.
    pub fn resolved(&self) -> Option<&Airport> {
        match self {
            AirportRef::Unresolved(_) => None,
            AirportRef::Resolved(airport) => Some(airport),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, AirportRef::Resolved(_))
    }
}

impl From<IataCode> for AirportRef {
    fn from(code: IataCode) -> Self {
        AirportRef::Unresolved(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> IataCode {
        IataCode::parse(s).unwrap()
    }

    #[test]
    fn deserialize_directory_row() {
        let json = r#"{
            "_id": "65f0c0ffee",
            "name": "Kuala Lumpur International Airport",
            "city": "Kuala Lumpur",
            "IATA": "KUL",
            "ICAO": "WMKK",
            "latitude": 2.745,
            "altitude": 69,
            "tz_database": "Asia/Kuala_Lumpur",
            "type": "airport"
        }"#;

        let airport: Airport = serde_json::from_str(json).unwrap();
        assert_eq!(airport.iata_code(), Some(code("KUL")));
        assert_eq!(airport.attributes["ICAO"], "WMKK");
        assert_eq!(airport.attributes["_id"], "65f0c0ffee");
        assert_eq!(airport.attributes["type"], "airport");
        assert!(!airport.attributes.contains_key("IATA"));
    }

    #[test]
    fn unknown_attributes_pass_through() {
        let json = r#"{"IATA":"KUL","name":"KLIA","createdAt":"2024-01-01","__v":0,"id":"65f0"}"#;

        let airport: Airport = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&airport).unwrap();

        assert_eq!(value, serde_json::from_str::<Value>(json).unwrap());
    }

    #[test]
    fn loosely_typed_attributes_are_accepted() {
        let json = r#"[
            {"IATA":"KUL","altitude":"\\N","latitude":null},
            {"IATA":null,"name":"No code"},
            {"name":"Missing code"}
        ]"#;

        let airports: Vec<Airport> = serde_json::from_str(json).unwrap();

        assert_eq!(airports.len(), 3);
        assert_eq!(airports[0].iata_code(), Some(code("KUL")));
        assert_eq!(airports[0].attributes["altitude"], "\\N");
        assert_eq!(airports[0].attributes["latitude"], Value::Null);
        assert_eq!(airports[1].iata_code(), None);
        assert_eq!(airports[2].iata, "");
    }

    #[test]
    fn serialize_uses_directory_names() {
        let airport = Airport::new(code("PEN"), "Penang International");
        let value = serde_json::to_value(&airport).unwrap();
        assert_eq!(value["IATA"], "PEN");
        assert_eq!(value["name"], "Penang International");
        assert!(value.get("ICAO").is_none());
    }

    #[test]
    fn placeholder_codes_have_no_iata() {
        let mut airport = Airport::new(code("AAA"), "Strip");
        airport.iata = "\\N".to_string();
        assert_eq!(airport.iata_code(), None);

        airport.iata = String::new();
        assert_eq!(airport.iata_code(), None);
    }

    #[test]
    fn airport_ref_serializes_untagged() {
        let bare = AirportRef::from(code("BKI"));
        assert_eq!(serde_json::to_value(&bare).unwrap(), "BKI");

        let resolved = AirportRef::Resolved(Box::new(Airport::new(code("BKI"), "Kota Kinabalu")));
        let value = serde_json::to_value(&resolved).unwrap();
        assert_eq!(value["IATA"], "BKI");
        assert_eq!(value["name"], "Kota Kinabalu");
    }

    #[test]
    fn airport_ref_accessors() {
        let bare = AirportRef::from(code("KCH"));
        assert_eq!(bare.unresolved(), Some(code("KCH")));
        assert!(bare.resolved().is_none());
        assert!(!bare.is_resolved());

        let resolved = AirportRef::Resolved(Box::new(Airport::new(code("KCH"), "Kuching")));
        assert_eq!(resolved.unresolved(), None);
        assert!(resolved.is_resolved());
    }
}
