//! JSON body extractor whose rejection is an `ApiError`

use crate::error::ApiError;
use axum::extract::FromRequest;

/// `Json<T>` that reports undecodable bodies as malformed requests
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
