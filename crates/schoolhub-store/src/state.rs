/// What a screen renders: a spinner, data, or an error with a retry button.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            Self::Loading => ViewState::Loading,
            Self::Success(data) => ViewState::Success(f(data)),
            Self::Error(message) => ViewState::Error(message),
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let state = ViewState::Success(vec![1, 2]);
        assert_eq!(state.data(), Some(&vec![1, 2]));
        assert!(state.error().is_none());

        let failed: ViewState<()> = ViewState::Error("Room is full".into());
        assert_eq!(failed.error(), Some("Room is full"));
        assert!(ViewState::<()>::default().is_loading());
    }

    #[test]
    fn test_map_keeps_variant() {
        assert_eq!(ViewState::Success(2).map(|n| n * 2), ViewState::Success(4));
        assert_eq!(
            ViewState::<i32>::Error("x".into()).map(|n| n * 2),
            ViewState::Error("x".into())
        );
    }
}
