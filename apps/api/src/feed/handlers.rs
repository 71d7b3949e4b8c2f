use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::feed::pool::list_client_images;
use crate::feed::sampler::{context_key, dedup_pool, sample, MAX_FEED_SIZE};
use crate::feed::seed::seed_for;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub reference: Option<String>,
    pub size: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub context_key: String,
    pub seed: u32,
    pub reference: String,
    pub pool_size: usize,
    pub items: Vec<String>,
}

#[derive(Serialize)]
pub struct ClientImagesResponse {
    pub slug: String,
    pub images: Vec<String>,
}

/// Resolves the reference and size of a feed request, then samples the feed.
/// The reference defaults to the first pool item and must belong to the pool. An empty pool
/// yields an empty `items` list for the caller to render as "no data".
pub fn build_feed(
    owner: &str,
    pool: &[String],
    query: FeedQuery,
    default_size: usize,
) -> Result<FeedResponse, AppError> {
    let size = query.size.unwrap_or(default_size);
    if size == 0 || size > MAX_FEED_SIZE {
        return Err(AppError::InvalidPayload(format!(
            "size must be between 1 and {MAX_FEED_SIZE}"
        )));
    }

    let pool = dedup_pool(pool);
    let reference = match query.reference {
        Some(r) if pool.contains(&r.as_str()) => r,
        Some(r) => {
            return Err(AppError::InvalidPayload(format!(
                "reference '{r}' is not part of the pool"
            )))
        }
        None => pool.first().map(|s| s.to_string()).unwrap_or_default(),
    };

    let key = context_key(owner, &reference, pool.len());
    let items = sample(&pool, &reference, &key, size);

    Ok(FeedResponse {
        seed: seed_for(&key),
        context_key: key,
        reference,
        pool_size: pool.len(),
        items,
    })
}

/// GET /api/v1/p/:token/feed
pub async fn handle_project_feed(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, AppError> {
    let project = state
        .store
        .project_by_token(&token)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;
    let pool = project.image_pool();
    Ok(Json(build_feed(
        &token,
        &pool,
        query,
        state.config.feed_size,
    )?))
}

/// GET /api/v1/clients/:slug
pub async fn handle_client_images(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ClientImagesResponse>, AppError> {
    let images = list_client_images(&state.config.clients_dir, &slug).await?;
    Ok(Json(ClientImagesResponse { slug, images }))
}

/// GET /api/v1/clients/:slug/feed
pub async fn handle_client_feed(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, AppError> {
    let pool = list_client_images(&state.config.clients_dir, &slug).await?;
    Ok(Json(build_feed(&slug, &pool, query, state.config.feed_size)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<String> {
        ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect()
    }

    fn query(reference: Option<&str>, size: Option<usize>) -> FeedQuery {
        FeedQuery {
            reference: reference.map(str::to_string),
            size,
        }
    }

    #[test]
    fn test_feed_matches_sampler() {
        let feed = build_feed("proj1", &pool(), query(Some("c"), Some(4)), 12).unwrap();
        assert_eq!(feed.context_key, "proj1|c|5");
        assert_eq!(feed.items, sample(&pool(), "c", "proj1|c|5", 4));
        assert_eq!(feed.seed, seed_for("proj1|c|5"));
        assert_eq!(feed.pool_size, 5);
    }

    #[test]
    fn test_reference_defaults_to_first_item() {
        let feed = build_feed("proj1", &pool(), query(None, None), 12).unwrap();
        assert_eq!(feed.reference, "a");
        assert_eq!(feed.items.len(), 12);
    }

    #[test]
    fn test_foreign_reference_is_rejected() {
        let err = build_feed("proj1", &pool(), query(Some("z"), None), 12).unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[test]
    fn test_size_bounds() {
        for size in [0, MAX_FEED_SIZE + 1] {
            let err = build_feed("proj1", &pool(), query(None, Some(size)), 12).unwrap_err();
            assert!(matches!(err, AppError::InvalidPayload(_)));
        }
    }

    #[test]
    fn test_empty_pool_is_empty_feed() {
        let feed = build_feed("proj1", &[], query(None, None), 12).unwrap();
        assert!(feed.items.is_empty());
        assert_eq!(feed.pool_size, 0);
    }
}
