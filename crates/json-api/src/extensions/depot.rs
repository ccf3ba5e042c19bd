//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_state_is_internal_server_error() {
        let depot = Depot::new();

        assert_eq!(
            depot.obtain_or_500::<Arc<String>>().err().map(|e| e.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }

    #[test]
    fn injected_state_is_returned() {
        let mut depot = Depot::new();

        depot.inject(Arc::new("state".to_string()));

        assert_eq!(
            depot.obtain_or_500::<Arc<String>>().ok().map(|s| s.as_str()),
            Some("state")
        );
    }
}
