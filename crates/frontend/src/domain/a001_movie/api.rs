use crate::shared::api_utils::{api_url, api_url_with_query, fetch_json};
use contracts::domain::a001_movie::{Movie, MovieDetail, MovieListResponse, MovieSearchRequest};

/// Movies whose name matches `query`, at most `limit` of them
pub async fn search_movies(query: &str, limit: usize) -> Result<Vec<Movie>, String> {
    let request = MovieSearchRequest {
        search: query.to_string(),
        limit,
    };
    let url = api_url_with_query("/movies", &request)?;
    let response: MovieListResponse = fetch_json(&url).await?;
    Ok(response.movies)
}

/// Metadata and full weekly history of one movie
pub async fn get_movie_detail(id: i64) -> Result<MovieDetail, String> {
    fetch_json(&api_url(&format!("/movies/{}", id))).await
}
