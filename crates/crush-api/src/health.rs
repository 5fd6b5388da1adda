use axum::Json;

use crush_types::api::{HealthResponse, WelcomeResponse};

pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to Secret Crush Matcher!".to_string(),
        tagline: "Find your secret crush... privately".to_string(),
        powered_by: "Zama FHE (Fully Homomorphic Encryption)".to_string(),
        docs: "/docs".to_string(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "Secret Crush Matcher".to_string(),
        fhe_enabled: true,
    })
}
