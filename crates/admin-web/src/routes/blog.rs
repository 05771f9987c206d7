//! Blog proxy routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use issue_cms::{Comment, Post, Reaction};
use serde::{Deserialize, Serialize};

use crate::error::{AdminError, Result};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// New comment body.
#[derive(Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

/// Vote request body.
#[derive(Deserialize)]
pub struct VoteRequest {
    pub vote: String,
}

/// The reader's vote after toggling.
#[derive(Serialize)]
pub struct VoteState {
    pub vote: Option<Reaction>,
}

/// List published posts.
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>> {
    Ok(Json(state.blog()?.list_posts().await?))
}

/// Comments on a post.
pub async fn list_comments(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<Vec<Comment>>> {
    Ok(Json(state.blog()?.get_comments(id).await?))
}

/// Add a comment to a post.
pub async fn add_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
    AppJson(req): AppJson<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>)> {
    let comment = state.blog()?.add_comment(id, &req.body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Toggle the reader's vote on a post.
///
/// A new vote is forwarded to the provider as a reaction; clearing a vote
/// only updates the local ledger.
pub async fn vote(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
    AppJson(req): AppJson<VoteRequest>,
) -> Result<Json<VoteState>> {
    let blog = state.blog()?;
    let reaction: Reaction = req.vote.parse().map_err(AdminError::BadRequest)?;

    let vote = state.votes.cast(id, reaction, &**blog).await?;
    Ok(Json(VoteState { vote }))
}
