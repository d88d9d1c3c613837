use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use naming_types::{Finding, Identifier, Position, Role, TypeCategory};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::grammar::{Grammar, WordProfile};
use crate::rules::review_all;
use crate::tokenize::split_words;

/// Longest word accepted by the word lookup endpoint.
pub const MAX_WORD_LEN: usize = 64;

#[derive(Clone)]
pub struct AppState {
    pub grammar: Arc<Grammar>,
    pub max_batch: usize,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub identifiers: Vec<IdentifierInput>,
}

/// One identifier as sent by a source inspector.
#[derive(Debug, Deserialize)]
pub struct IdentifierInput {
    pub name: String,
    pub role: String,
    #[serde(rename = "type", default)]
    pub type_category: Option<String>,
    #[serde(default)]
    pub position: Option<PositionDto>,
    #[serde(default)]
    pub params: Vec<IdentifierInput>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PositionDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub reviewed: usize,
    pub findings: Vec<FindingDto>,
}

#[derive(Debug, Serialize)]
pub struct FindingDto {
    pub name: String,
    pub rule: &'static str,
    pub message: String,
    pub position: PositionDto,
}

#[derive(Deserialize)]
pub struct WordQuery {
    pub word: String,
}

#[derive(Deserialize)]
pub struct SplitQuery {
    pub name: String,
}

#[derive(Serialize)]
pub struct SplitResponse {
    name: String,
    words: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Rejected identifier input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown role '{0}' (expected variable, type, parameter or function)")]
    UnknownRole(String),
    #[error("unknown type '{0}' (expected bool, fixed-array, dynamic-array, map, other or unknown)")]
    UnknownCategory(String),
    #[error("'{0}' declares params but is not a function")]
    UnexpectedParams(String),
}

impl From<PositionDto> for Position {
    fn from(dto: PositionDto) -> Self {
        Position {
            file: dto.file,
            line: dto.line,
            column: dto.column,
        }
    }
}

impl From<&Position> for PositionDto {
    fn from(position: &Position) -> Self {
        PositionDto {
            file: position.file.clone(),
            line: position.line,
            column: position.column,
        }
    }
}

impl From<Finding> for FindingDto {
    fn from(finding: Finding) -> Self {
        FindingDto {
            position: PositionDto::from(&finding.position),
            rule: finding.rule.code(),
            name: finding.name,
            message: finding.message,
        }
    }
}

impl IdentifierInput {
    /// This identifier plus all nested parameters.
    pub fn count(&self) -> usize {
        1 + self.params.iter().map(IdentifierInput::count).sum::<usize>()
    }

    pub fn into_identifier(self) -> Result<Identifier, InputError> {
        let declared = self.type_category.is_some();
        let mut category = parse_category(self.type_category.as_deref())?;
        let role = match self.role.trim().to_ascii_lowercase().as_str() {
            "function" => {
                let params = self
                    .params
                    .into_iter()
                    .map(IdentifierInput::into_identifier)
                    .collect::<Result<Vec<_>, _>>()?;
                Role::Function { params }
            }
            other => {
                if !self.params.is_empty() {
                    return Err(InputError::UnexpectedParams(self.name));
                }
                match other {
                    "variable" => Role::Variable,
                    "type" => Role::Type,
                    "parameter" => Role::Parameter,
                    _ => return Err(InputError::UnknownRole(self.role)),
                }
            }
        };
        if role == Role::Type && !declared {
            category = Some(TypeCategory::Other);
        }
        Ok(Identifier {
            name: self.name,
            role,
            category,
            position: self.position.map(Position::from).unwrap_or_default(),
        })
    }
}

/// Parse a type category; missing and `unknown` both mean not known.
pub fn parse_category(raw: Option<&str>) -> Result<Option<TypeCategory>, InputError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let name = raw.trim().to_ascii_lowercase();
    if name.is_empty() || name == "unknown" {
        return Ok(None);
    }
    TypeCategory::from_name(&name)
        .map(Some)
        .ok_or_else(|| InputError::UnknownCategory(raw.to_string()))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/review", post(review))
        .route("/v1/words", get(word_profile))
        .route("/v1/split", get(split))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn review(
    State(state): State<AppState>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let submitted: usize = request.identifiers.iter().map(IdentifierInput::count).sum();
    if submitted > state.max_batch {
        return Err(ApiError::bad_request(format!(
            "at most {} identifiers per request, parameters included (got {submitted})",
            state.max_batch
        )));
    }

    let identifiers = request
        .identifiers
        .into_iter()
        .map(IdentifierInput::into_identifier)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let reviewed = identifiers.len();
    let grammar = Arc::clone(&state.grammar);
    let findings = tokio::task::spawn_blocking(move || review_all(&grammar, &identifiers))
        .await
        .map_err(|err| {
            error!("review task failed: {err}");
            ApiError::Internal
        })?;
    Ok(Json(ReviewResponse {
        reviewed,
        findings: findings.into_iter().map(FindingDto::from).collect(),
    }))
}

async fn word_profile(
    State(state): State<AppState>,
    Query(params): Query<WordQuery>,
) -> Result<Json<WordProfile>, ApiError> {
    let word = params.word.trim().to_ascii_lowercase();
    if word.is_empty() {
        return Err(ApiError::bad_request("word is required"));
    }
    if word.len() > MAX_WORD_LEN {
        return Err(ApiError::bad_request(format!(
            "word must be at most {MAX_WORD_LEN} letters"
        )));
    }
    if !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(ApiError::bad_request("word must contain only letters a-z"));
    }
    Ok(Json(state.grammar.profile(&word)))
}

async fn split(Query(params): Query<SplitQuery>) -> Result<Json<SplitResponse>, ApiError> {
    if params.name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }
    let words = split_words(&params.name);
    Ok(Json(SplitResponse {
        name: params.name,
        words,
    }))
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal => {
                let body = Json(json!({ "error": "internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
