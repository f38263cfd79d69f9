//! HTTP response handlers.

use super::route::Reply;
use crate::utils::{
    html::escape,
    mime::types::{HTML, PLAIN},
};
use anyhow::{Result, anyhow};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Send a rendered reply; HEAD requests get the headers only.
pub fn respond(request: Request, reply: Reply) -> Result<()> {
    let mut headers = vec![make_header("Content-Type", reply.content_type)?];
    for (key, value) in &reply.headers {
        headers.push(make_header(key, value)?);
    }

    let body = if is_head_request(&request) {
        Vec::new()
    } else {
        reply.body
    };

    let mut response = Response::from_data(body).with_status_code(StatusCode(reply.status));
    for header in headers {
        response.add_header(header);
    }
    request.respond(response)?;
    Ok(())
}

/// Respond with 500 and the escaped error chain.
pub fn respond_error(request: Request, error: &anyhow::Error) -> Result<()> {
    let error_str = format!("{error:#}");
    let msg = escape(&error_str);
    let body = format!("<html><body><h1>Internal Server Error</h1><pre>{msg}</pre></body></html>");
    respond(
        request,
        Reply {
            status: 500,
            content_type: HTML,
            headers: Vec::new(),
            body: body.into_bytes(),
        },
    )
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    respond(
        request,
        Reply {
            status: 503,
            content_type: PLAIN,
            headers: Vec::new(),
            body: b"503 Service Unavailable".to_vec(),
        },
    )
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn make_header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header `{key}: {value}`"))
}
