#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Api,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Api => "Could not connect to the API.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

impl<T> ViewState<T> {
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }
}
