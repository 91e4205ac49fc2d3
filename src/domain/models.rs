use serde::{Deserialize, Serialize};

/// A Brazilian federative unit as returned by the localities API.
///
/// Only the fields the UI consumes are kept; anything else in the payload
/// (such as the `regiao` object) is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: u64,
    /// Short code used as the lookup key for the cities endpoint (e.g. "SP").
    #[serde(rename = "sigla")]
    pub abbreviation: String,
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroRegion {
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    #[serde(rename = "microrregiao")]
    pub micro_region: MicroRegion,
}

/// A city (district) entry of the `/estados/{uf}/distritos` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "municipio")]
    pub municipality: Municipality,
}

impl City {
    pub fn new(id: u64, name: impl Into<String>, micro_region: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            municipality: Municipality {
                micro_region: MicroRegion {
                    name: micro_region.into(),
                },
            },
        }
    }

    pub fn micro_region_name(&self) -> &str {
        &self.municipality.micro_region.name
    }
}

impl State {
    pub fn new(id: u64, abbreviation: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            abbreviation: abbreviation.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_deserializes_upstream_shape() {
        let json = r#"[
            {"id": 12, "sigla": "AC", "nome": "Acre",
             "regiao": {"id": 1, "sigla": "N", "nome": "Norte"}},
            {"id": 27, "sigla": "AL", "nome": "Alagoas",
             "regiao": {"id": 2, "sigla": "NE", "nome": "Nordeste"}}
        ]"#;

        let states: Vec<State> = serde_json::from_str(json).unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0], State::new(12, "AC", "Acre"));
        assert_eq!(states[1].abbreviation, "AL");
    }

    #[test]
    fn test_city_reads_nested_micro_region() {
        let json = r#"{
            "id": 520005005,
            "nome": "Abadia de Goiás",
            "municipio": {
                "id": 5200050,
                "nome": "Abadia de Goiás",
                "microrregiao": {
                    "id": 52010,
                    "nome": "Goiânia",
                    "mesorregiao": {"id": 5203, "nome": "Centro Goiano"}
                }
            }
        }"#;

        let city: City = serde_json::from_str(json).unwrap();
        assert_eq!(city.id, 520005005);
        assert_eq!(city.name, "Abadia de Goiás");
        assert_eq!(city.micro_region_name(), "Goiânia");
    }

    #[test]
    fn test_city_without_municipality_is_rejected() {
        let json = r#"{"id": 1, "nome": "Solta"}"#;
        assert!(serde_json::from_str::<City>(json).is_err());
    }
}
