use std::fmt::Display;
use std::net::SocketAddr;

use axum::{
    body::{Body, to_bytes},
    extract::{ConnectInfo, Request, State},
    http::{
        StatusCode,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
        request::Parts,
    },
    middleware::Next,
    response::Response,
};
use storefront_middleware_rs::{ChainError, CookieWrite, RequestContext};

use super::{AppState, Storefront};

const BODY_LIMIT: usize = 1 << 20;

pub async fn storefront_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let body = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err),
    };

    let mut ctx = RequestContext::new(interceptor_request(&parts, &body));
    if let Some(mut early) = state.chain.process_request(&mut ctx) {
        early.apply_cookies(ctx.cookies.take_writes());
        return into_axum(early);
    }

    parts.extensions.insert(Storefront {
        language: ctx.language.clone(),
        region: ctx.region.clone().unwrap_or_default(),
    });
    let inner = next.run(Request::from_parts(parts, Body::from(body))).await;

    let (inner_parts, inner_body) = inner.into_parts();
    let bytes = match to_bytes(inner_body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, err),
    };
    let mut response = storefront_middleware_rs::Response::new(inner_parts.status.as_u16());
    for (name, value) in inner_parts.headers.iter() {
        let Ok(value) = value.to_str() else {
            continue;
        };
        if *name == SET_COOKIE {
            if let Some(write) = CookieWrite::parse(value) {
                response.apply_cookie(write);
            }
        } else {
            response.headers.append(name.as_str(), value);
        }
    }
    response.body = String::from_utf8_lossy(&bytes).into_owned();

    match state.chain.process_response(&mut ctx, response) {
        Ok(response) => into_axum(response),
        Err(err) => chain_error_response(err),
    }
}

fn interceptor_request(parts: &Parts, body: &[u8]) -> storefront_middleware_rs::Request {
    let full_path = parts
        .uri
        .path_and_query()
        .map(|value| value.as_str())
        .unwrap_or("/");
    let mut request = storefront_middleware_rs::Request::new(parts.method.as_str(), full_path);

    for (name, value) in parts.headers.iter() {
        if let Ok(value) = value.to_str() {
            request = request.with_header(name.as_str(), value);
        }
    }

    if let Some(cookies) = parts.headers.get(COOKIE).and_then(|value| value.to_str().ok()) {
        for pair in cookies.split(';') {
            if let Some((name, value)) = pair.split_once('=') {
                request = request.with_cookie(name.trim(), value.trim());
            }
        }
    }

    let is_form = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));
    if is_form {
        for (name, value) in url::form_urlencoded::parse(body) {
            request = request.with_form(name.into_owned(), value.into_owned());
        }
    }

    if let Some(ConnectInfo(addr)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
        request = request.with_remote_addr(addr.ip());
    }

    request
}

fn into_axum(response: storefront_middleware_rs::Response) -> Response {
    let mut builder = Response::builder().status(response.status);
    for (name, value) in response.headers.iter() {
        builder = builder.header(name, value);
    }
    for cookie in response.set_cookie_headers() {
        builder = builder.header(SET_COOKIE, cookie);
    }

    builder
        .body(Body::from(response.body))
        .unwrap_or_else(|err| error_response(StatusCode::INTERNAL_SERVER_ERROR, err))
}

fn chain_error_response(err: ChainError) -> Response {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    error_response(status, err)
}

fn error_response(status: StatusCode, err: impl Display) -> Response {
    let mut response = Response::new(Body::from(format!("storefront error: {err}")));
    *response.status_mut() = status;
    response
}
