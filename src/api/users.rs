use reqwest::Method;

use super::client::{authorized, ApiClient};
use super::response::{ApiResponse, StatusFallback};
use crate::constants::{PROFILE_UPDATED_MESSAGE, USER_SEARCH_ERROR_MESSAGE};
use crate::models::{UpdateUserData, User};

impl ApiClient {
    /// Update name and/or email of the logged-in account
    #[tracing::instrument(skip(self, data, token), fields(user_id = %data.id))]
    pub async fn update_profile(&self, data: &UpdateUserData, token: &str) -> ApiResponse<User> {
        let request = authorized(self.put("/users/profile"), token).json(data);

        match self.send("updateProfile", request, StatusFallback::Server).await {
            Ok(envelope) => match envelope.extract_optional("user") {
                Ok(user) => ApiResponse::Success {
                    data: user,
                    message: Some(PROFILE_UPDATED_MESSAGE.to_string()),
                },
                Err(failure) => failure.into(),
            },
            Err(failure) => failure.into(),
        }
    }

    /// Find accounts by name or email, e.g. to pick a tenant for a contract
    ///
    /// A response without `usuarios` means no matches.
    #[tracing::instrument(skip(self, token))]
    pub async fn search_users(&self, query: &str, token: &str) -> ApiResponse<Vec<User>> {
        let request = authorized(self.get("/users/buscar"), token).query(&[("q", query)]);

        self.send(
            "searchUsers",
            request,
            StatusFallback::Fixed(USER_SEARCH_ERROR_MESSAGE),
        )
        .await
        .and_then(|envelope| envelope.extract_or_default("usuarios"))
        .into()
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn get_user(&self, id: &str, token: &str) -> ApiResponse<User> {
        let request = authorized(self.item(Method::GET, "/users", id), token);

        self.send("getUser", request, StatusFallback::Short)
            .await
            .and_then(|envelope| envelope.extract("user"))
            .into()
    }
}
