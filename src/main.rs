use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use axum::Router;
use payment_profiles::config::AppConfig;
use payment_profiles::gateways::authorize_net::AuthorizeNetGateway;
use payment_profiles::gateways::mock::MockGateway;
use payment_profiles::gateways::ProfileGateway;
use payment_profiles::http::handlers::{payments, vendor_plans};
use payment_profiles::http::middleware::api_key::{self, ApiKeyState};
use payment_profiles::http::middleware::origin_allowlist::{self, OriginState};
use payment_profiles::http::middleware::request_log;
use payment_profiles::repo::vendor_plans_repo::VendorPlansRepo;
use payment_profiles::service::partner_notifier::HttpPartnerNotifier;
use payment_profiles::service::profile_service::ProfileService;
use payment_profiles::store::PgLocalStore;
use payment_profiles::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let store = Arc::new(PgLocalStore::new(pool.clone()));
    let vendor_plans_repo = VendorPlansRepo { pool };

    let gateway: Arc<dyn ProfileGateway> = match cfg.gateway_adapter.as_str() {
        "mock" => Arc::new(MockGateway {
            behavior: std::env::var("MOCK_GATEWAY_BEHAVIOR").unwrap_or_default(),
        }),
        _ => Arc::new(AuthorizeNetGateway {
            endpoint: cfg.gateway.endpoint.clone(),
            validation_mode: cfg.gateway.validation_mode(),
            executor: cfg.gateway.executor(),
            client: reqwest::Client::new(),
        }),
    };

    let notifier = Arc::new(HttpPartnerNotifier {
        base_url: cfg.partner_base_url.clone(),
        client: reqwest::Client::new(),
    });

    let profile_service = ProfileService {
        store,
        gateway,
        notifier,
        gateway_settings: cfg.gateway.clone(),
    };

    let state = AppState {
        profile_service,
        vendor_plans_repo,
    };

    let api_routes = Router::new()
        .route(
            "/payments/payment-methods",
            get(payments::list_payment_methods).post(payments::add_payment_method),
        )
        .route("/payments/charge", post(payments::charge))
        .route(
            "/payments",
            put(payments::update_payment_method).delete(payments::delete_payment_method),
        )
        .route(
            "/vendor-plans",
            get(vendor_plans::list_plans)
                .post(vendor_plans::create_plan)
                .put(vendor_plans::update_plan)
                .delete(vendor_plans::delete_plan),
        )
        .route("/vendor-plans/by-vendor", get(vendor_plans::get_by_vendor))
        .route("/vendor-plans/:plan_name", get(vendor_plans::get_plan))
        .layer(from_fn_with_state(
            OriginState {
                allowed_origins: cfg.allowed_origins.clone(),
            },
            origin_allowlist::enforce,
        ))
        .layer(from_fn_with_state(
            ApiKeyState {
                allowed_keys: cfg.api_keys.clone(),
            },
            api_key::require_api_key,
        ));

    let app = Router::new()
        .route("/health", get(payments::health))
        .nest("/api/v1", api_routes)
        .layer(from_fn(request_log::assign_and_log))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
