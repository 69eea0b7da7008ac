use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

pub mod pages;

/// `302 Found` to `location`; every mutating route answers this way.
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
