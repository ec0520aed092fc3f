// ── API → domain conversion ──

use skyfare_api::LocationSearchResponse;

use crate::model::{LocationSuggestion, SuggestionKind};

/// Flatten the grouped suggestion response into dropdown rows.
///
/// Each outer group is emitted first, followed by its nested airports in
/// their original order. Groups without children contribute only
/// themselves.
pub fn flatten_locations(response: &LocationSearchResponse) -> Vec<LocationSuggestion> {
    response
        .location_responses
        .iter()
        .flat_map(|group| {
            std::iter::once(LocationSuggestion {
                id: group.id.clone(),
                name: group.name.clone(),
                iata: group.iata.clone(),
                kind: SuggestionKind::Group,
            })
            .chain(
                group
                    .group_data
                    .simple_airports
                    .iter()
                    .map(|airport| LocationSuggestion {
                        id: airport.id.clone(),
                        name: airport.name.clone(),
                        iata: airport.iata.clone(),
                        kind: SuggestionKind::Airport,
                    }),
            )
        })
        .collect()
}
