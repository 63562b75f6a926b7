use super::client::ApiClient;
use super::response::{ApiFailure, ApiResponse, StatusFallback};
use crate::constants::{
    INVALID_CREDENTIALS_MESSAGE, LOGIN_SUCCESS_MESSAGE, REGISTER_SUCCESS_MESSAGE,
};
use crate::models::{LoginData, RegisterData, Session};

impl ApiClient {
    /// Create an account
    ///
    /// Some backends log the new user in immediately; the session is
    /// returned as data when the response carries both token and user.
    #[tracing::instrument(skip(self, data), fields(email = %data.email, role = %data.role))]
    pub async fn register(&self, data: &RegisterData) -> ApiResponse<Session> {
        let request = self.post("/auth/register").json(data);

        match self.send("register", request, StatusFallback::Server).await {
            Ok(envelope) => ApiResponse::Success {
                data: envelope.session(),
                message: Some(REGISTER_SUCCESS_MESSAGE.to_string()),
            },
            Err(failure) => failure.into(),
        }
    }

    /// Exchange credentials for a bearer token
    #[tracing::instrument(skip(self, data), fields(email = %data.email))]
    pub async fn login(&self, data: &LoginData) -> ApiResponse<Session> {
        let request = self.post("/auth/login").json(data);

        match self.send("login", request, StatusFallback::Server).await {
            Ok(envelope) => match envelope.session() {
                Some(session) => {
                    ApiResponse::success(session).with_message(LOGIN_SUCCESS_MESSAGE)
                }
                None => ApiFailure::malformed(INVALID_CREDENTIALS_MESSAGE).into(),
            },
            Err(failure) => failure.into(),
        }
    }
}
