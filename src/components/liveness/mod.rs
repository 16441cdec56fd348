use crate::error::{BotResult, Error};
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};
use tiny_http::{Method, Request, Response, Server};
use tracing::{debug, info, warn};

/// Body served before the bot has connected
pub const RUNNING_BODY: &str = "Bot is running!";

/// Connection state shared read-only with the liveness thread
#[derive(Debug, Clone, Default)]
pub struct BotStatus {
    connected_as: Arc<OnceLock<String>>,
}

impl BotStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the bot's user name once it is connected
    pub fn mark_connected(&self, name: &str) {
        let _ = self.connected_as.set(name.to_string());
    }

    pub fn connected_as(&self) -> Option<&str> {
        self.connected_as.get().map(String::as_str)
    }

    /// Text returned by the liveness endpoint
    pub fn body(&self) -> String {
        match self.connected_as() {
            Some(name) => format!("Bot is running as {}!", name),
            None => RUNNING_BODY.to_string(),
        }
    }
}

/// Bound liveness server, not yet serving
pub struct LivenessServer {
    server: Arc<Server>,
    status: BotStatus,
}

impl LivenessServer {
    /// Bind the endpoint to `addr`, e.g. `0.0.0.0:10000`
    pub fn bind(addr: &str, status: BotStatus) -> BotResult<Self> {
        let server = Server::http(addr)
            .map_err(|e| Error::Liveness(format!("Failed to bind {}: {}", addr, e)))?;

        Ok(Self {
            server: Arc::new(server),
            status,
        })
    }

    /// Address actually bound, useful when binding port 0
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serve requests on a dedicated OS thread
    pub fn spawn(self) -> BotResult<LivenessHandle> {
        let server = Arc::clone(&self.server);
        let status = self.status;

        if let Some(addr) = self.server.server_addr().to_ip() {
            info!("Liveness endpoint listening on http://{}", addr);
        }

        let thread = thread::Builder::new()
            .name("liveness".to_string())
            .spawn(move || {
                for request in server.incoming_requests() {
                    handle_request(request, &status);
                }
                debug!("Liveness endpoint stopped accepting requests");
            })?;

        Ok(LivenessHandle {
            server: self.server,
            thread,
        })
    }
}

/// Running liveness server
pub struct LivenessHandle {
    server: Arc<Server>,
    thread: JoinHandle<()>,
}

impl LivenessHandle {
    /// Stop serving and wait for the thread to exit
    pub fn shutdown(self) {
        self.server.unblock();
        if self.thread.join().is_err() {
            warn!("Liveness thread panicked");
        }
    }
}

fn handle_request(request: Request, status: &BotStatus) {
    let path = request.url().split('?').next().unwrap_or("");

    // Bodies are served as text/plain by tiny_http
    let response = match (request.method(), path) {
        (Method::Get | Method::Head, "/") => Response::from_string(status.body()),
        (_, "/") => Response::from_string("Method Not Allowed").with_status_code(405),
        _ => Response::from_string("Not Found").with_status_code(404),
    };

    if let Err(e) = request.respond(response) {
        warn!("Failed to answer liveness request: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_reflects_connection() {
        let status = BotStatus::new();
        assert_eq!(status.body(), RUNNING_BODY);

        status.mark_connected("BanBot");
        assert_eq!(status.body(), "Bot is running as BanBot!");

        // First name wins
        status.mark_connected("Other");
        assert_eq!(status.connected_as(), Some("BanBot"));
    }
}
