use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use anyhow::Context;
use axum::{extract::State, routing, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;
use url::Url;

pub const ACCOUNT_ROUTE: &str = "/user";

/// Hands out fake test accounts that all point to the same SMTP server.
#[derive(Debug)]
pub struct FakeTestAccountServer {
    smtp_host: String,
    smtp_port: u16,
    web: Url,
    next_id: AtomicU64,
}

impl FakeTestAccountServer {
    pub fn new(smtp_host: String, smtp_port: u16, web: Url) -> Self {
        Self {
            smtp_host,
            smtp_port,
            web,
            next_id: AtomicU64::new(1),
        }
    }
}

pub fn router(server: FakeTestAccountServer) -> Router<()> {
    Router::new()
        .route(ACCOUNT_ROUTE, routing::post(create_account))
        .with_state(Arc::new(server))
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    server: FakeTestAccountServer,
) -> anyhow::Result<()> {
    info!("Starting test account api testing server on {host}:{port}");
    info!("Account endpoint: http://{host}:{port}{ACCOUNT_ROUTE}");
    info!(
        "Accounts deliver to {}:{}, requests with an empty requestor are rejected",
        server.smtp_host, server.smtp_port
    );

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(server))
        .await
        .context("Failed to start HTTP server")
}

/// Serves the fake api on a random local port in the background and returns
/// its address.
pub async fn spawn(server: FakeTestAccountServer) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind to a local port")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router(server)).await });
    Ok(addr)
}

#[derive(Deserialize)]
struct CreateAccountRequest {
    requestor: String,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum CreateAccountResponse {
    Success {
        user: String,
        pass: String,
        smtp: SmtpSettings,
        web: Url,
    },
    Error {
        error: &'static str,
    },
}

#[derive(Serialize)]
struct SmtpSettings {
    host: String,
    port: u16,
    secure: bool,
}

async fn create_account(
    state: State<Arc<FakeTestAccountServer>>,
    Json(CreateAccountRequest { requestor }): Json<CreateAccountRequest>,
) -> Json<CreateAccountResponse> {
    if requestor.trim().is_empty() {
        return Json(CreateAccountResponse::Error {
            error: "Missing requestor",
        });
    }

    let id = state.next_id.fetch_add(1, Ordering::Relaxed);

    Json(CreateAccountResponse::Success {
        user: format!("{requestor}-{id}@{}", state.smtp_host),
        pass: format!("password-{id}"),
        smtp: SmtpSettings {
            host: state.smtp_host.clone(),
            port: state.smtp_port,
            secure: false,
        },
        web: state.web.clone(),
    })
}
