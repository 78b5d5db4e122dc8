//! Response types shared by the content handlers.

use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use portfolio_db::resilient::Sourced;
use serde::Serialize;

/// Response header naming the source that served a read.
pub const DATA_SOURCE_HEADER: &str = "x-data-source";

/// JSON body plus an `x-data-source: live|fallback` header.
#[derive(Debug)]
pub struct SourcedJson<T>(pub Sourced<T>);

impl<T: Serialize> IntoResponse for SourcedJson<T> {
    fn into_response(self) -> Response {
        let Sourced { data, source } = self.0;
        (
            [(
                HeaderName::from_static(DATA_SOURCE_HEADER),
                HeaderValue::from_static(source.as_str()),
            )],
            Json(data),
        )
            .into_response()
    }
}
