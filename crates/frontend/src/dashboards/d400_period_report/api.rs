use crate::shared::api_utils::{api_url_with_query, fetch_json};
use contracts::dashboards::d400_period_report::{
    PeriodReportRequest, PeriodStatsResponse, PeriodSummary,
};

/// Raw `GET /period-stats` for one period
pub async fn get_period_stats(request: &PeriodReportRequest) -> Result<PeriodStatsResponse, String> {
    request.validate().map_err(|e| e.to_string())?;
    let url = api_url_with_query("/period-stats", request)?;
    fetch_json(&url).await
}

/// Period report with growth filled in.
///
/// When the service leaves `growth_rate` out, the previous period is fetched
/// and growth is computed against its total.
pub async fn get_period_report(request: &PeriodReportRequest) -> Result<PeriodStatsResponse, String> {
    let mut response = get_period_stats(request).await?;
    if response.summary.growth_rate.is_some() {
        return Ok(response);
    }
    let Some(previous) = request.previous() else {
        return Ok(response);
    };

    match get_period_stats(&previous).await {
        Ok(prev) => {
            let s = &response.summary;
            response.summary = PeriodSummary::from_totals(
                s.start_date,
                s.end_date,
                s.total_revenue,
                s.movie_count,
                Some(prev.summary.total_revenue),
            );
        }
        Err(e) => log::debug!("No previous period for {}: {}", previous.label(), e),
    }
    Ok(response)
}
