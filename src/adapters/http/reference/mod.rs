//! Supported input sets, for building pickers in the presentation layer.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::domain::profile::{City, Occupation};
use crate::domain::reference::{CityStats, HazardLevel, OccupationStats};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityOption {
    pub name: &'static str,
    pub slug: &'static str,
    pub state: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationOption {
    pub name: &'static str,
    pub slug: &'static str,
    pub hazard_level: HazardLevel,
    pub category: String,
}

/// GET /api/reference/cities
pub async fn list_cities() -> Json<Vec<CityOption>> {
    Json(
        City::all()
            .iter()
            .map(|city| CityOption {
                name: city.display_name(),
                slug: city.slug(),
                state: CityStats::for_city(*city).state.clone(),
            })
            .collect(),
    )
}

/// GET /api/reference/occupations
pub async fn list_occupations() -> Json<Vec<OccupationOption>> {
    Json(
        Occupation::all()
            .iter()
            .map(|occupation| {
                let stats = OccupationStats::for_occupation(*occupation);
                OccupationOption {
                    name: occupation.display_name(),
                    slug: occupation.slug(),
                    hazard_level: stats.hazard_level,
                    category: stats.category.clone(),
                }
            })
            .collect(),
    )
}

/// Routes mounted under `/api/reference`.
pub fn reference_routes() -> Router {
    Router::new()
        .route("/cities", get(list_cities))
        .route("/occupations", get(list_occupations))
}
