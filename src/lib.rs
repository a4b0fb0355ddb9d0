pub mod config;
pub mod domain {
    pub mod plan;
    pub mod profile;
    pub mod requests;
    pub mod transaction;
}
pub mod error;
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod payments;
        pub mod vendor_plans;
    }
    pub mod middleware {
        pub mod api_key;
        pub mod origin_allowlist;
        pub mod request_log;
    }
    pub mod response;
}
pub mod repo {
    pub mod customer_profiles_repo;
    pub mod payment_profiles_repo;
    pub mod providers_repo;
    pub mod transactions_repo;
    pub mod vendor_plans_repo;
}
pub mod service {
    pub mod partner_notifier;
    pub mod profile_service;
}
pub mod store;
pub mod util {
    pub mod email;
}

#[derive(Clone)]
pub struct AppState {
    pub profile_service: service::profile_service::ProfileService,
    pub vendor_plans_repo: repo::vendor_plans_repo::VendorPlansRepo,
}
