//! Request extractors whose rejections render as [`AppError`] JSON.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body; any parse failure is a 400
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Query string parameters; any parse failure is a 400
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);
