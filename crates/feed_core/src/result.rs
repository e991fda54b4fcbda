/// Outcome of the most recent content request of a view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchResult<T> {
    #[default]
    Idle,
    Loading,
    Success {
        items: Vec<T>,
        total_pages: u32,
    },
    Failure {
        message: String,
    },
}

impl<T> FetchResult<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchResult::Loading)
    }

    /// True once a request has resolved, either way.
    pub fn is_settled(&self) -> bool {
        matches!(self, FetchResult::Success { .. } | FetchResult::Failure { .. })
    }

    pub fn items(&self) -> &[T] {
        match self {
            FetchResult::Success { items, .. } => items,
            _ => &[],
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            FetchResult::Failure { message } => Some(message),
            _ => None,
        }
    }
}
