//! Partner search filter criteria.

use serde::{Deserialize, Serialize};

/// Advanced-search filters. All criteria are optional; unset fields are
/// left off the wire entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_stay_off_the_wire() {
        let filters = SearchFilters { age_min: Some(25), ..SearchFilters::default() };
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(value, serde_json::json!({ "ageMin": 25 }));
    }

    #[test]
    fn field_names_are_camel_case() {
        let filters = SearchFilters {
            age_min: Some(25),
            age_max: Some(35),
            marital_status: Some(vec!["never_married".to_owned()]),
            page: Some(1),
            ..SearchFilters::default()
        };
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(value["ageMax"], 35);
        assert_eq!(value["maritalStatus"][0], "never_married");
    }
}
