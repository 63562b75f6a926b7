use reqwest::Method;

use super::client::{authorized, ApiClient};
use super::response::{ApiResponse, StatusFallback};
use crate::constants::PROPERTY_DELETED_MESSAGE;
use crate::models::{CreatePropertyData, Property, UpdatePropertyData};

impl ApiClient {
    /// Every published property; no token needed
    #[tracing::instrument(skip(self))]
    pub async fn list_properties(&self) -> ApiResponse<Vec<Property>> {
        let request = self.get("/propiedades/");

        self.send("listProperties", request, StatusFallback::Short)
            .await
            .and_then(|envelope| envelope.extract("propiedades"))
            .into()
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_property(&self, id: &str) -> ApiResponse<Property> {
        let request = self.item(Method::GET, "/propiedades", id);

        self.send("getProperty", request, StatusFallback::Short)
            .await
            .and_then(|envelope| envelope.extract("propiedad"))
            .into()
    }

    #[tracing::instrument(skip(self, data, token), fields(name = %data.name))]
    pub async fn create_property(
        &self,
        data: &CreatePropertyData,
        token: &str,
    ) -> ApiResponse<Property> {
        let request = authorized(self.post("/propiedades/"), token).json(data);

        self.send("createProperty", request, StatusFallback::Short)
            .await
            .and_then(|envelope| envelope.extract("propiedad"))
            .into()
    }

    /// Send only the fields present in `data`; the rest stay as stored
    #[tracing::instrument(skip(self, data, token))]
    pub async fn update_property(
        &self,
        id: &str,
        data: &UpdatePropertyData,
        token: &str,
    ) -> ApiResponse<Property> {
        let request = authorized(self.item(Method::PUT, "/propiedades", id), token).json(data);

        self.send("updateProperty", request, StatusFallback::Short)
            .await
            .and_then(|envelope| envelope.extract("propiedad"))
            .into()
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn delete_property(&self, id: &str, token: &str) -> ApiResponse<()> {
        let request = authorized(self.item(Method::DELETE, "/propiedades", id), token);

        match self.send("deleteProperty", request, StatusFallback::Short).await {
            Ok(envelope) => ApiResponse::acknowledged(
                envelope
                    .message()
                    .unwrap_or_else(|| PROPERTY_DELETED_MESSAGE.to_string()),
            ),
            Err(failure) => failure.into(),
        }
    }

    /// Properties owned by the logged-in landlord
    #[tracing::instrument(skip(self, token))]
    pub async fn list_my_properties(&self, token: &str) -> ApiResponse<Vec<Property>> {
        let request = authorized(self.get("/propiedades/mine"), token);

        self.send("listMyProperties", request, StatusFallback::Short)
            .await
            .and_then(|envelope| envelope.extract("propiedades"))
            .into()
    }

    /// Available properties matching `query`
    #[tracing::instrument(skip(self, token))]
    pub async fn search_available_properties(
        &self,
        query: &str,
        token: &str,
    ) -> ApiResponse<Vec<Property>> {
        let request = authorized(self.get("/propiedades/buscar"), token).query(&[("q", query)]);

        self.send("searchAvailableProperties", request, StatusFallback::Short)
            .await
            .and_then(|envelope| envelope.extract("propiedades"))
            .into()
    }
}
