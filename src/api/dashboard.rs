//! Dashboard Endpoints

use remote_collection::{ApiClient, ApiResult};

use super::HttpClient;
use crate::models::DashboardSummary;

pub const DASHBOARD_SUMMARY: &str = "/dashboard/summary";

/// Numbers summary requests so only the newest response is shown
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestSeq(u32);

impl RequestSeq {
    pub fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }

    pub fn is_latest(&self, issued: u32) -> bool {
        self.0 == issued
    }
}

pub async fn fetch_summary(client: &HttpClient) -> ApiResult<DashboardSummary> {
    let body = client.get(DASHBOARD_SUMMARY).await?;
    Ok(serde_json::from_value(body)?)
}
