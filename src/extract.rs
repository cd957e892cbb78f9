use axum::extract::FromRequest;

use crate::error::Error;

/// `axum::Json` whose rejections render as the crate's failure body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);
