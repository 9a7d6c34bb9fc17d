use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use assist::{Assistant, RateSource, SpeechToText};
use engine::Engine;

use crate::{challenges, expenses, incomes, rates, special_payments, stats, suggestions, users, voice};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub assistant: Arc<dyn Assistant>,
    pub speech: Arc<dyn SpeechToText>,
    pub rates: Arc<dyn RateSource>,
}

impl ServerState {
    pub fn new(
        engine: Engine,
        assistant: Arc<dyn Assistant>,
        speech: Arc<dyn SpeechToText>,
        rates: Arc<dyn RateSource>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            assistant,
            speech,
            rates,
        }
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/expenses",
            post(expenses::create)
                .get(expenses::list)
                .put(expenses::update)
                .delete(expenses::remove),
        )
        .route(
            "/incomes",
            post(incomes::create)
                .get(incomes::list)
                .put(incomes::update)
                .delete(incomes::remove),
        )
        .route(
            "/special-payments",
            get(special_payments::list).post(special_payments::create),
        )
        .route(
            "/special-payments/{id}",
            get(special_payments::get_by_id)
                .put(special_payments::update)
                .delete(special_payments::remove),
        )
        .route(
            "/challenges",
            get(challenges::list).post(challenges::create),
        )
        .route(
            "/challenges/{id}",
            get(challenges::get_by_id)
                .put(challenges::update)
                .delete(challenges::remove),
        )
        .route(
            "/users",
            post(users::register)
                .get(users::list)
                .put(users::update)
                .delete(users::remove),
        )
        .route("/users/{id}", get(users::get_by_id))
        .route("/login", post(users::login))
        .route("/stats", get(stats::get_stats))
        .route("/assist/transcribe-audio", post(voice::transcribe))
        .route("/assist/voice-expense", post(voice::voice_expense))
        .route("/assist/voice-income", post(voice::voice_income))
        .route("/assist/challenges", post(suggestions::generate_challenges))
        .route("/rates", get(rates::get_rates))
        .with_state(state)
}

pub async fn run(state: ServerState) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(state, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
