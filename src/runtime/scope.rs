use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;

/// Lifetime of one screen (one CLI command)
///
/// Requests made through [`ScreenScope::client`] resolve to a `Cancelled`
/// failure once the scope is closed or dropped, so a late response can never
/// be written into a screen that is gone.
#[derive(Debug)]
pub struct ScreenScope {
    name: String,
    token: CancellationToken,
}

impl ScreenScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: CancellationToken::new(),
        }
    }

    /// Nested scope, closed together with its parent
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: self.token.child_token(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// API client bound to this scope
    pub fn client(&self, api: &ApiClient) -> ApiClient {
        api.with_cancellation(self.token.clone())
    }

    pub fn close(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!(scope = %self.name, "closing screen scope");
            self.token.cancel();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_closes_with_parent() {
        let parent = ScreenScope::new("property");
        let child = parent.child("assign-tenant");
        let sibling = ScreenScope::new("home");

        parent.close();

        assert!(parent.is_closed());
        assert!(child.is_closed());
        assert!(!sibling.is_closed());
    }

    #[test]
    fn test_closing_child_leaves_parent_open() {
        let parent = ScreenScope::new("property");
        let child = parent.child("assign-tenant");

        drop(child);
        assert!(!parent.is_closed());
    }

    #[tokio::test]
    async fn test_client_bound_to_closed_scope_is_cancelled() {
        let api = ApiClient::new("http://127.0.0.1:9").unwrap();
        let scope = ScreenScope::new("search");
        let client = scope.client(&api);
        scope.close();

        let response = client.list_properties().await;
        assert_eq!(
            response.failure().map(|f| f.kind),
            Some(crate::api::FailureKind::Cancelled)
        );
    }
}
