//! Axum REST API handlers and router.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::Utc;
use intercobros_ledger::{ClientId, LedgerSummary, PaymentMethod};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::{self, Claims, TokenIssuer, UserStore};
use crate::cobros::{affiliate_code, loan_code, Cobro};
use crate::config::Config;
use crate::errors::{ApiError, Result};
use crate::extract::{AppJson, AppPath};
use crate::records::{ListQuery, Pagination, Person, PersonInput, RecordKind};
use crate::store::{NewPayment, PaymentEntry, Store};

pub struct AppState {
    pub store: Store,
    pub users: UserStore,
    pub tokens: TokenIssuer,
}

impl AppState {
    /// Seed the store and register the demo account.
    pub fn from_config(config: &Config) -> Result<Self> {
        let users = UserStore::new(config.bcrypt_cost);
        users.add_user(&config.admin_username, &config.admin_password)?;

        Ok(Self {
            store: Store::new(config.seed_clients, config.seed_avales),
            users,
            tokens: TokenIssuer::new(config.jwt_secret.clone(), config.token_ttl_secs),
        })
    }
}

/// Every route; all but `/health` and `/login` require a bearer token.
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/:id", put(update_client).delete(delete_client))
        .route("/clients/:id/ledger", get(get_client_ledger))
        .route("/avales", get(list_avales).post(create_aval))
        .route("/avales/:id", put(update_aval).delete(delete_aval))
        .route("/pagos", post(create_payment))
        .route("/pagos/:cliente_id", get(get_payments))
        .route("/cobros", get(list_cobros))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/login", post(auth::login))
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerResponse {
    pub client_id: ClientId,
    pub numero_afiliado: String,
    pub numero_prestamo: String,
    pub summary: LedgerSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsResponse {
    pub client_id: ClientId,
    pub summary: LedgerSummary,
    pub count: usize,
    pub payments: Vec<PaymentEntry>,
}

#[derive(Serialize)]
pub struct PaymentCreatedResponse {
    pub payment: PaymentEntry,
    pub summary: LedgerSummary,
}

#[derive(Serialize)]
pub struct ClientsResponse {
    pub clients: Vec<Person>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

#[derive(Serialize)]
pub struct AvalesResponse {
    pub avales: Vec<Person>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

#[derive(Serialize)]
pub struct CobrosResponse {
    pub cobros: Vec<Cobro>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// Body of `POST /pagos`. `amount` accepts a number or a numeric string;
/// anything else is rejected as an invalid amount.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(alias = "clienteId")]
    pub client_id: i64,
    #[serde(alias = "monto")]
    pub amount: Value,
    #[serde(default, alias = "metodo")]
    pub method: Option<PaymentMethod>,
    #[serde(default, alias = "referencia")]
    pub reference: Option<String>,
    #[serde(default, alias = "notas")]
    pub notes: Option<String>,
}

impl PaymentRequest {
    fn amount(&self) -> f64 {
        match &self.amount {
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// One page of matching records, the filtered total and the pagination used.
fn page_of(
    state: &AppState,
    kind: RecordKind,
    query: &ListQuery,
) -> (Vec<Person>, usize, Pagination) {
    let matching = state.store.list(kind, query.term());
    let pagination = query.pagination();
    (pagination.slice(&matching), matching.len(), pagination)
}

fn create_person(state: &AppState, kind: RecordKind, input: PersonInput) -> Result<Json<Person>> {
    let input = input.validate()?;
    Ok(Json(state.store.create(kind, input)))
}

fn update_person(
    state: &AppState,
    kind: RecordKind,
    id: u64,
    input: PersonInput,
) -> Result<Json<Person>> {
    let input = input.validate()?;
    Ok(Json(state.store.update(kind, id, input)?))
}

fn delete_person(
    state: &AppState,
    claims: &Claims,
    kind: RecordKind,
    id: u64,
) -> Result<Json<MessageResponse>> {
    state.store.delete(kind, id)?;
    info!("{} {id} deleted by {}", kind.label(), claims.username);
    Ok(Json(MessageResponse {
        message: format!("{} deleted", kind.label()),
    }))
}

/// `GET /clients?page&limit&search`
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<ClientsResponse> {
    let (clients, total, pagination) = page_of(&state, RecordKind::Client, &query);
    Json(ClientsResponse {
        clients,
        total,
        page: pagination.page,
        limit: pagination.limit,
    })
}

/// `POST /clients`
pub async fn create_client(
    State(state): State<Arc<AppState>>,
    AppJson(input): AppJson<PersonInput>,
) -> Result<Json<Person>> {
    create_person(&state, RecordKind::Client, input)
}

/// `PUT /clients/:id`
pub async fn update_client(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<u64>,
    AppJson(input): AppJson<PersonInput>,
) -> Result<Json<Person>> {
    update_person(&state, RecordKind::Client, id, input)
}

/// `DELETE /clients/:id`
pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<MessageResponse>> {
    delete_person(&state, &claims, RecordKind::Client, id)
}

/// `GET /avales?page&limit&search`
pub async fn list_avales(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<AvalesResponse> {
    let (avales, total, pagination) = page_of(&state, RecordKind::Aval, &query);
    Json(AvalesResponse {
        avales,
        total,
        page: pagination.page,
        limit: pagination.limit,
    })
}

/// `POST /avales`
pub async fn create_aval(
    State(state): State<Arc<AppState>>,
    AppJson(input): AppJson<PersonInput>,
) -> Result<Json<Person>> {
    create_person(&state, RecordKind::Aval, input)
}

/// `PUT /avales/:id`
pub async fn update_aval(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<u64>,
    AppJson(input): AppJson<PersonInput>,
) -> Result<Json<Person>> {
    update_person(&state, RecordKind::Aval, id, input)
}

/// `DELETE /avales/:id`
pub async fn delete_aval(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<MessageResponse>> {
    delete_person(&state, &claims, RecordKind::Aval, id)
}

/// Validate a path id and make sure the client exists.
fn existing_client(state: &AppState, raw: i64) -> Result<ClientId> {
    let client_id = ClientId::new(raw)?;
    state
        .store
        .get(RecordKind::Client, client_id.get())
        .ok_or(ApiError::NotFound(RecordKind::Client.label()))?;
    Ok(client_id)
}

/// `GET /clients/:id/ledger`
///
/// The client's session ledger, rounded for display.
pub async fn get_client_ledger(
    State(state): State<Arc<AppState>>,
    AppPath(raw_id): AppPath<i64>,
) -> Result<Json<LedgerResponse>> {
    let client_id = existing_client(&state, raw_id)?;
    let summary = state.store.summary_for(client_id).rounded();

    Ok(Json(LedgerResponse {
        client_id,
        numero_afiliado: affiliate_code(client_id.get()),
        numero_prestamo: loan_code(client_id.get()),
        summary,
    }))
}

/// `GET /pagos/:cliente_id`
///
/// Generated history followed by payments recorded this session.
pub async fn get_payments(
    State(state): State<Arc<AppState>>,
    AppPath(raw_id): AppPath<i64>,
) -> Result<Json<PaymentsResponse>> {
    let client_id = existing_client(&state, raw_id)?;
    let payments = state.store.payments_for(client_id, Utc::now());

    Ok(Json(PaymentsResponse {
        client_id,
        summary: state.store.summary_for(client_id).rounded(),
        count: payments.len(),
        payments,
    }))
}

/// `POST /pagos`
pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    AppJson(req): AppJson<PaymentRequest>,
) -> Result<Json<PaymentCreatedResponse>> {
    let amount = req.amount();
    let payment = NewPayment {
        client_id: ClientId::new(req.client_id)?,
        amount,
        method: req.method.unwrap_or_default(),
        reference: req.reference,
        notes: req.notes,
    };

    let (payment, summary) = state.store.record_payment(payment, Utc::now())?;
    info!(
        "Payment for client {} entered by {}",
        payment.record.client_id, claims.username
    );
    Ok(Json(PaymentCreatedResponse {
        payment,
        summary: summary.rounded(),
    }))
}

/// `GET /cobros?page&limit&search`
pub async fn list_cobros(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CobrosResponse>> {
    let mut cobros = Vec::new();
    for client in state.store.list(RecordKind::Client, None) {
        let client_id = ClientId::new(client.id as i64)?;
        let cobro = Cobro::build(&client, &state.store.summary_for(client_id));
        if query.term().map_or(true, |t| cobro.matches(t)) {
            cobros.push(cobro);
        }
    }

    let pagination = query.pagination();
    Ok(Json(CobrosResponse {
        cobros: pagination.slice(&cobros),
        total: cobros.len(),
        page: pagination.page,
        limit: pagination.limit,
    }))
}
