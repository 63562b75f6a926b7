use reqwest::Method;

use super::client::{authorized, ApiClient};
use super::response::{ApiResponse, StatusFallback};
use crate::constants::CONTRACT_CANCELLED_MESSAGE;
use crate::models::{Contract, CreateContractData};

impl ApiClient {
    #[tracing::instrument(
        skip(self, data, token),
        fields(tenant = %data.tenant_id, property = %data.property_id)
    )]
    pub async fn create_contract(
        &self,
        data: &CreateContractData,
        token: &str,
    ) -> ApiResponse<Contract> {
        let request = authorized(self.post("/contratos"), token).json(data);

        self.send("createContract", request, StatusFallback::Short)
            .await
            .and_then(|envelope| envelope.extract("contrato"))
            .into()
    }

    /// Contracts where the logged-in user is owner or tenant
    #[tracing::instrument(skip(self, token))]
    pub async fn list_contracts(&self, token: &str) -> ApiResponse<Vec<Contract>> {
        let request = authorized(self.get("/contratos"), token);

        self.send("listContracts", request, StatusFallback::Short)
            .await
            .and_then(|envelope| envelope.extract("contratos"))
            .into()
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn get_contract(&self, id: &str, token: &str) -> ApiResponse<Contract> {
        let request = authorized(self.item(Method::GET, "/contratos", id), token);

        self.send("getContract", request, StatusFallback::Short)
            .await
            .and_then(|envelope| envelope.extract("contrato"))
            .into()
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn cancel_contract(&self, id: &str, token: &str) -> ApiResponse<()> {
        let request = authorized(self.item(Method::DELETE, "/contratos", id), token);

        match self.send("cancelContract", request, StatusFallback::Short).await {
            Ok(envelope) => ApiResponse::acknowledged(
                envelope
                    .message()
                    .unwrap_or_else(|| CONTRACT_CANCELLED_MESSAGE.to_string()),
            ),
            Err(failure) => failure.into(),
        }
    }
}
