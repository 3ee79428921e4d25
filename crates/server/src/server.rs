use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use std::sync::Arc;

use crate::{
    accounts, ai, auth::{AuthKeys, AuthUser}, budgets, claims, contacts, employees, goals,
    invoices, journal, products, purchase_orders, timesheets, transactions, users, wallets,
};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub auth: Arc<AuthKeys>,
    pub ai: Option<ai::AiProvider>,
    pub http: reqwest::Client,
}

/// Verifies the bearer token and injects the principal as an [`AuthUser`]
/// extension. Everything behind the router requires it; a missing or
/// invalid token is rejected before any persistence access.
async fn auth(
    State(state): State<ServerState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(bearer)) = bearer else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let claims = state
        .auth
        .verify(bearer.token())
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/accounts", get(accounts::list).post(accounts::create))
        .route(
            "/api/accounts/:id",
            axum::routing::put(accounts::update).delete(accounts::delete),
        )
        .route("/api/budgets", get(budgets::list).post(budgets::create))
        .route(
            "/api/budgets/:id",
            axum::routing::put(budgets::update).delete(budgets::delete),
        )
        .route("/api/contacts", get(contacts::list).post(contacts::create))
        .route(
            "/api/contacts/:id",
            axum::routing::put(contacts::update).delete(contacts::delete),
        )
        .route(
            "/api/employees",
            get(employees::list).post(employees::create),
        )
        .route(
            "/api/employees/:id",
            axum::routing::put(employees::update).delete(employees::delete),
        )
        .route(
            "/api/timesheets",
            get(timesheets::list).post(timesheets::create),
        )
        .route(
            "/api/timesheets/:id",
            axum::routing::put(timesheets::update).delete(timesheets::delete),
        )
        .route(
            "/api/expense-claims",
            get(claims::list).post(claims::create),
        )
        .route(
            "/api/expense-claims/:id",
            axum::routing::put(claims::update).delete(claims::delete),
        )
        .route("/api/expense-claims/:id/approve", post(claims::approve))
        .route("/api/expense-claims/:id/reject", post(claims::reject))
        .route("/api/goals", get(goals::list).post(goals::create))
        .route(
            "/api/goals/:id",
            axum::routing::put(goals::update).delete(goals::delete),
        )
        .route("/api/goals/:id/contribute", post(goals::contribute))
        .route("/api/invoices", get(invoices::list).post(invoices::create))
        .route(
            "/api/invoices/:id",
            axum::routing::put(invoices::update).delete(invoices::delete),
        )
        .route(
            "/api/journal-entries",
            get(journal::list).post(journal::create),
        )
        .route(
            "/api/journal-entries/:id",
            axum::routing::put(journal::update).delete(journal::delete),
        )
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/:id",
            axum::routing::put(products::update).delete(products::delete),
        )
        .route(
            "/api/purchase-orders",
            get(purchase_orders::list).post(purchase_orders::create),
        )
        .route(
            "/api/purchase-orders/:id",
            axum::routing::put(purchase_orders::update).delete(purchase_orders::delete),
        )
        .route(
            "/api/purchase-orders/:id/receive",
            post(purchase_orders::receive),
        )
        .route(
            "/api/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/api/transactions/:id",
            axum::routing::put(transactions::update).delete(transactions::delete),
        )
        .route("/api/users", get(users::list).post(users::create))
        .route(
            "/api/users/:id",
            axum::routing::put(users::update).delete(users::delete),
        )
        .route("/api/wallets", get(wallets::list).post(wallets::create))
        .route(
            "/api/wallets/:id",
            axum::routing::put(wallets::update).delete(wallets::delete),
        )
        .route("/api/ai/query", post(ai::query))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run(engine: Engine, auth_keys: AuthKeys, ai: Option<ai::AiProvider>) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, auth_keys, ai, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    auth_keys: AuthKeys,
    ai: Option<ai::AiProvider>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        auth: Arc::new(auth_keys),
        ai,
        http: reqwest::Client::new(),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    auth_keys: AuthKeys,
    ai: Option<ai::AiProvider>,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, auth_keys, ai, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
