use super::error::AnalyticsError;
use crate::domain::a001_movie::Movie;

/// Movies picked for the trajectory comparison, in pick order
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSelection {
    max_movies: usize,
    movies: Vec<Movie>,
}

impl ComparisonSelection {
    pub fn new(max_movies: usize) -> Self {
        Self {
            max_movies,
            movies: Vec::new(),
        }
    }

    pub fn add(&mut self, movie: Movie) -> Result<(), AnalyticsError> {
        if self.contains(movie.id) {
            return Err(AnalyticsError::AlreadySelected(movie.id));
        }
        if self.movies.len() >= self.max_movies {
            return Err(AnalyticsError::SelectionFull(self.max_movies));
        }
        self.movies.push(movie);
        Ok(())
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.movies.len();
        self.movies.retain(|m| m.id != id);
        self.movies.len() != before
    }

    pub fn contains(&self, id: i64) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    pub fn ids(&self) -> Vec<i64> {
        self.movies.iter().map(|m| m.id).collect()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.movies.len() >= self.max_movies
    }
}
