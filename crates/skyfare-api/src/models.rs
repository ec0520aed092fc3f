// Wire types for `GET /locations/search`.
//
// The backend groups airports under a city (or metro area) entry:
//
// ```json
// { "locationResponses": [
//     { "id": 1, "name": "Paris", "iata": "PAR",
//       "group_data": { "simpleAirports": [ { "id": 2, "name": "Charles de Gaulle", "iata": "CDG" } ] } }
// ] }
// ```
//
// `group_data` and `simpleAirports` are both optional on the wire.

use serde::{Deserialize, Serialize};

use crate::de::string_or_number;

/// Top-level response body of the suggestion endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSearchResponse {
    #[serde(rename = "locationResponses", default)]
    pub location_responses: Vec<LocationGroup>,
}

/// One outer entry: a city or airport group, possibly with nested airports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationGroup {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub iata: String,
    #[serde(default)]
    pub group_data: GroupData,
}

/// Nested children of a [`LocationGroup`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupData {
    #[serde(rename = "simpleAirports", default)]
    pub simple_airports: Vec<SimpleAirport>,
}

/// A single airport record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleAirport {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub iata: String,
}
