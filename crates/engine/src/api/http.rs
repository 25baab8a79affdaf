//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use pokearena_domain::{Pokemon, PokemonId, PokemonKind};

use crate::app::App;
use crate::use_cases::{BattleError, BattleResult, PokemonError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/pokemon", get(list_pokemon).post(create_pokemon))
        .route("/api/pokemon/{id}", get(get_pokemon).delete(delete_pokemon))
        .route("/api/pokemon/{id}/trainer", put(update_trainer))
        .route("/api/battle", post(battle))
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Deserialize)]
struct CreatePokemonRequest {
    kind: PokemonKind,
    trainer: String,
}

async fn create_pokemon(
    State(app): State<Arc<App>>,
    Json(req): Json<CreatePokemonRequest>,
) -> Result<(StatusCode, Json<Pokemon>), ApiError> {
    let pokemon = app
        .use_cases
        .create_pokemon
        .execute(req.kind, &req.trainer)
        .await?;
    Ok((StatusCode::CREATED, Json(pokemon)))
}

async fn list_pokemon(State(app): State<Arc<App>>) -> Result<Json<Vec<Pokemon>>, ApiError> {
    let all = app.use_cases.list_pokemon.execute().await?;
    Ok(Json(all))
}

async fn get_pokemon(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<Json<Pokemon>, ApiError> {
    let pokemon = app
        .use_cases
        .get_pokemon
        .execute(PokemonId::from_i64(id))
        .await?;
    Ok(Json(pokemon))
}

#[derive(Debug, Deserialize)]
struct UpdateTrainerRequest {
    trainer: String,
}

async fn update_trainer(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTrainerRequest>,
) -> Result<Json<Pokemon>, ApiError> {
    let pokemon = app
        .use_cases
        .update_trainer
        .execute(PokemonId::from_i64(id), &req.trainer)
        .await?;
    Ok(Json(pokemon))
}

async fn delete_pokemon(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .delete_pokemon
        .execute(PokemonId::from_i64(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct BattleRequest {
    attacker_id: i64,
    defender_id: i64,
}

async fn battle(
    State(app): State<Arc<App>>,
    Json(req): Json<BattleRequest>,
) -> Result<Json<BattleResult>, ApiError> {
    let result = app
        .use_cases
        .battle
        .execute(
            PokemonId::from_i64(req.attacker_id),
            PokemonId::from_i64(req.defender_id),
        )
        .await?;
    Ok(Json(result))
}

// =============================================================================
// Error mapping
// =============================================================================

pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => {
                (axum::http::StatusCode::NOT_FOUND, "Not found").into_response()
            }
            ApiError::BadRequest(msg) => {
                (axum::http::StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                )
                    .into_response()
            }
        }
    }
}

impl From<PokemonError> for ApiError {
    fn from(e: PokemonError) -> Self {
        match e {
            PokemonError::NotFound(_) => ApiError::NotFound,
            PokemonError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<BattleError> for ApiError {
    fn from(e: BattleError) -> Self {
        match e {
            BattleError::SameCombatant => ApiError::BadRequest(e.to_string()),
            BattleError::NotFound(_) => ApiError::NotFound,
            BattleError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    use crate::infrastructure::random::SystemRandom;
    use crate::infrastructure::sqlite::{
        ensure_schema, SqlitePokemonRepo, SqliteUnitOfWork,
    };

    use super::*;

    async fn test_router() -> Router {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        ensure_schema(&pool).await.expect("schema");

        let app = Arc::new(App::new(
            Arc::new(SqlitePokemonRepo::new(pool.clone())),
            Arc::new(SqliteUnitOfWork::new(pool)),
            Arc::new(SystemRandom::new()),
        ));
        routes().with_state(app)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn health_endpoint_responds_ok() {
        let router = test_router().await;
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let router = test_router().await;

        let created = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/pokemon",
                serde_json::json!({"kind": "pikachu", "trainer": "Ash"}),
            ))
            .await
            .expect("response");
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = body_json(created).await;
        assert_eq!(created["kind"], "pikachu");
        assert_eq!(created["level"], 1);

        let id = created["id"].as_i64().expect("id");
        let fetched = router
            .oneshot(
                Request::builder()
                    .uri(format!("/api/pokemon/{id}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(fetched.status(), StatusCode::OK);
        assert_eq!(body_json(fetched).await, created);
    }

    #[tokio::test]
    async fn unknown_pokemon_maps_to_404() {
        let router = test_router().await;
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/pokemon/999")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_returns_no_content_then_404() {
        let router = test_router().await;

        let created = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/pokemon",
                serde_json::json!({"kind": "squirtle", "trainer": "Misty"}),
            ))
            .await
            .expect("response");
        let id = body_json(created).await["id"].as_i64().expect("id");

        let deleted = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/pokemon/{id}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let gone = router
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/pokemon/{id}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn battle_with_same_id_maps_to_400() {
        let router = test_router().await;
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/battle",
                serde_json::json!({"attacker_id": 7, "defender_id": 7}),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn battle_with_missing_combatant_maps_to_404() {
        let router = test_router().await;
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/battle",
                serde_json::json!({"attacker_id": 1, "defender_id": 2}),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn battle_reports_both_post_battle_records() {
        let router = test_router().await;

        let a = body_json(
            router
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/pokemon",
                    serde_json::json!({"kind": "pikachu", "trainer": "Ash"}),
                ))
                .await
                .expect("response"),
        )
        .await["id"]
            .as_i64()
            .expect("id");
        let b = body_json(
            router
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/pokemon",
                    serde_json::json!({"kind": "charmander", "trainer": "Gary"}),
                ))
                .await
                .expect("response"),
        )
        .await["id"]
            .as_i64()
            .expect("id");

        let response = router
            .oneshot(json_request(
                "POST",
                "/api/battle",
                serde_json::json!({"attacker_id": a, "defender_id": b}),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let result = body_json(response).await;
        // Both started at level 1: winner climbs to 2, loser bottoms out at 0.
        assert_eq!(result["winner"]["level"], 2);
        assert_eq!(result["loser"]["level"], 0);
        let ids = [
            result["winner"]["id"].as_i64().expect("id"),
            result["loser"]["id"].as_i64().expect("id"),
        ];
        assert!(ids.contains(&a) && ids.contains(&b));
    }
}
