use crate::shared::api_utils::{api_url, fetch_json};
use contracts::dashboards::d402_trajectory_compare::{MovieTrajectory, TrajectoryRequest};

/// Per-movie weekly runs for the comparison chart
pub async fn get_trajectories(request: &TrajectoryRequest) -> Result<Vec<MovieTrajectory>, String> {
    if request.movie_ids.is_empty() {
        return Ok(Vec::new());
    }
    let url = api_url(&format!(
        "/movie-trajectory?movie_ids={}",
        urlencoding::encode(&request.movie_ids_param())
    ));
    fetch_json(&url).await
}
