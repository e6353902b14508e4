use serde::{Deserialize, Serialize};

/// Presentation state of one data block.
///
/// `Empty` and `Unavailable` are distinct so the view can show "no data" for
/// a successful empty answer and an error banner for a failed fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Empty,
    Unavailable(String),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, String>, is_empty: impl Fn(&T) -> bool) -> Self {
        match result {
            Ok(data) if is_empty(&data) => LoadState::Empty,
            Ok(data) => LoadState::Ready(data),
            Err(err) => LoadState::Unavailable(err),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Unavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> LoadState<Vec<T>> {
    pub fn from_vec_result(result: Result<Vec<T>, String>) -> Self {
        Self::from_result(result, Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_result() {
        assert_eq!(LoadState::from_vec_result(Ok(vec![1])), LoadState::Ready(vec![1]));
        assert_eq!(LoadState::<Vec<u8>>::from_vec_result(Ok(vec![])), LoadState::Empty);
        let failed = LoadState::<Vec<u8>>::from_vec_result(Err("HTTP error: 503".into()));
        assert_eq!(failed.error(), Some("HTTP error: 503"));
        assert!(failed.data().is_none());
    }

    #[test]
    fn test_default_is_idle() {
        let state: LoadState<u8> = LoadState::default();
        assert_eq!(state, LoadState::Idle);
        assert!(!state.is_loading());
    }
}
