use crate::api::ApiResponse;

/// What a screen shows for one request
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    /// Nothing to show, e.g. a search without matches; not an error
    Empty,
    /// Success without data, e.g. after a delete
    Notice(String),
    Ready(T),
}

impl<T> ViewState<T> {
    /// Map a single-record response
    pub fn from_response(response: ApiResponse<T>) -> Self {
        match response {
            ApiResponse::Success {
                data: Some(data), ..
            } => ViewState::Ready(data),
            ApiResponse::Success {
                data: None,
                message: Some(message),
            } => ViewState::Notice(message),
            ApiResponse::Success {
                data: None,
                message: None,
            } => ViewState::Empty,
            ApiResponse::Failure(failure) => ViewState::Error(failure.message),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ViewState::Error(_))
    }
}

impl<T> ViewState<Vec<T>> {
    /// Map a list response; an empty list is `Empty`
    pub fn from_list(response: ApiResponse<Vec<T>>) -> Self {
        match ViewState::from_response(response) {
            ViewState::Ready(items) if items.is_empty() => ViewState::Empty,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiFailure;

    #[test]
    fn test_empty_search_is_not_an_error() {
        let view = ViewState::<Vec<u32>>::from_list(ApiResponse::success(vec![]));
        assert_eq!(view, ViewState::Empty);
        assert!(!view.is_error());
    }

    #[test]
    fn test_list_with_items_is_ready() {
        let view = ViewState::from_list(ApiResponse::success(vec![1, 2]));
        assert_eq!(view, ViewState::Ready(vec![1, 2]));
    }

    #[test]
    fn test_failure_becomes_error() {
        let view = ViewState::<u32>::from_response(ApiFailure::status(500, "Error 500").into());
        assert_eq!(view, ViewState::Error("Error 500".to_string()));
    }

    #[test]
    fn test_acknowledgement_becomes_notice() {
        let view = ViewState::<()>::from_response(ApiResponse::acknowledged("Eliminada"));
        assert_eq!(view, ViewState::Notice("Eliminada".to_string()));
    }
}
