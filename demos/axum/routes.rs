use axum::{
    Extension,
    extract::Path,
    http::{StatusCode, header::LOCATION},
    response::{Html, IntoResponse},
};

use crate::storefront::Storefront;

pub async fn home(Extension(storefront): Extension<Storefront>) -> impl IntoResponse {
    Html(format!(
        "<h1>Storefront</h1><p>language: {}</p><p>region: {}</p>\
         <p>Try <a href=\"/de/firefox/\">/de/firefox/</a> or <a href=\"/?region=br\">?region=br</a>.</p>",
        storefront.language, storefront.region
    ))
}

pub async fn app_detail(
    Path(id): Path<u32>,
    Extension(storefront): Extension<Storefront>,
) -> impl IntoResponse {
    Html(format!(
        "<h1>App {id}</h1><p>Listed for {} in {}.</p>",
        storefront.region, storefront.language
    ))
}

/// Answers with a plain 302 so hijacked form posts render the detail fragment.
pub async fn submit_review(Path(id): Path<u32>) -> impl IntoResponse {
    (StatusCode::FOUND, [(LOCATION, format!("/apps/{id}?reviewed=1"))])
}
