use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode, web};
use chrono::{DateTime, Utc};

use super::respond;
use crate::config::AppConfig;
use crate::models::AppStartTime;
use crate::models::system::responses::HealthResponse;

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let started_at = request
            .app_data::<web::Data<AppStartTime>>()
            .map(|start| start.start_datetime)
            .unwrap_or_else(Utc::now);
        respond(
            Ok(health_report(&self.get_config().app.system_name, started_at, Utc::now())),
            StatusCode::OK,
            "Service is healthy",
        )
    }
}

pub fn health_report(
    system_name: &str,
    started_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> HealthResponse {
    HealthResponse {
        status: "ok".to_string(),
        system_name: system_name.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at,
        uptime_seconds: now.signed_duration_since(started_at).num_seconds().max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::at;

    #[test]
    fn test_health_uptime() {
        let report = health_report(
            "EduPortal",
            at("2026-01-01T00:00:00Z"),
            at("2026-01-01T00:01:30Z"),
        );
        assert_eq!(report.status, "ok");
        assert_eq!(report.uptime_seconds, 90);
    }
}
