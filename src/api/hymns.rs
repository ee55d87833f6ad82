//! Hymnal batch lookup endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::api::AppState;
use crate::hymnal::HymnEntry;

/// Response for `POST /hymns`.
#[derive(Debug, Serialize)]
pub struct HymnsResponse {
    /// One entry per requested title with at least one version; titles with
    /// no match are omitted.
    pub hymns: Vec<HymnEntry>,
}

/// POST /hymns
///
/// Batch hymnal lookup for a list of song titles. A request body without a
/// `titles` array yields an empty result rather than an error.
pub async fn hymns(State(state): State<AppState>, Json(body): Json<Value>) -> Json<HymnsResponse> {
    let titles: Vec<&str> = body["titles"].as_array()
        .map(|titles| titles.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    Json(HymnsResponse { hymns: state.hymns.lookup_batch(&titles) })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::config::Config;
    use crate::hymnal::{HymnIndex, HymnRow};
    use crate::planning_center::PlanningCenterClient;
    use serde_json::json;

    fn state() -> AppState {
        let config = Config::default();
        let index = HymnIndex::from_rows([
            HymnRow {
                song_title: "Amazing Grace".to_string(),
                tune_name: "NEW BRITAIN".to_string(),
                rejoice_hymns: 202,
                great_hymns_of_the_faith: 107,
            },
            HymnRow {
                song_title: "How Great Thou Art".to_string(),
                tune_name: "O STORE GUD".to_string(),
                rejoice_hymns: 147,
                great_hymns_of_the_faith: 2,
            },
            HymnRow {
                song_title: "How Great Thou Art".to_string(),
                tune_name: "HOW GREAT".to_string(),
                rejoice_hymns: -1,
                great_hymns_of_the_faith: 36,
            },
        ]);
        AppState::new(PlanningCenterClient::new(&config), index, &config)
    }

    #[tokio::test]
    async fn matching_titles_come_back_with_versions() {
        let Json(response) = hymns(
            State(state()),
            Json(json!({ "titles": ["amazing grace", "Uncharted Song"] })),
        )
        .await;

        assert_eq!(response.hymns.len(), 1);
        assert_eq!(response.hymns[0].song_title, "amazing grace");
        assert!(response.hymns[0].versions[0].selected);
    }

    #[tokio::test]
    async fn multi_version_titles_have_no_preselection() {
        let Json(response) = hymns(
            State(state()),
            Json(json!({ "titles": ["How Great Thou Art"] })),
        )
        .await;

        assert_eq!(response.hymns[0].versions.len(), 2);
        assert!(response.hymns[0].versions.iter().all(|v| !v.selected));
    }

    #[tokio::test]
    async fn missing_or_malformed_titles_yield_empty_result() {
        let Json(empty) = hymns(State(state()), Json(json!({}))).await;
        assert!(empty.hymns.is_empty());

        let Json(not_array) = hymns(State(state()), Json(json!({ "titles": "Amazing Grace" }))).await;
        assert!(not_array.hymns.is_empty());
    }
}
