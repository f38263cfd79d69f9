//! Development server.
//!
//! Renders every route on request from the posts directory, so edits show
//! up on reload without a rebuild.

mod lifecycle;
mod response;
mod route;

use route::Route;

use crate::{config::SiteConfig, core::is_shutdown, log};
use anyhow::{Context, Result};
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Number of request worker threads.
const WORKERS: usize = 4;

/// Bind the server and run the request loop until Ctrl+C.
pub fn serve_site(config: Arc<SiteConfig>) -> Result<()> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    crate::core::register_server(Arc::clone(&server));

    log!("serve"; "http://{}{}", addr, config.blog_route());
    run_request_loop(&server, &config)
}

fn run_request_loop(server: &Server, config: &Arc<SiteConfig>) -> Result<()> {
    // Use thread pool to handle requests concurrently
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(WORKERS)
        .build()
        .context("Failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let config = Arc::clone(config);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    let route = Route::parse(request.url(), config);
    crate::debug!("serve"; "{} {} -> {:?}", request.method(), request.url(), route);

    match route::render(&route, config) {
        Ok(reply) => response::respond(request, reply),
        Err(e) => {
            log!("error"; "{}: {e:#}", request.url());
            response::respond_error(request, &e)
        }
    }
}
