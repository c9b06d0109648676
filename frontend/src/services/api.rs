use gloo::net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    ApiErrorBody, CreateDeliveryServiceInput, CreateImmunizationInput, CreateMedicalCheckupInput,
    CreatePatientInput, DeliveryService, HealthStatus, Immunization, MedicalCheckup, Patient,
    UpdateMedicalCheckupInput, UpdatePatientInput,
};

const DEFAULT_BASE_URL: &str = "http://localhost:2022/rpc";

/// Client for the backend's RPC procedures
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn procedure_url(&self, procedure: &str, query: Option<(&str, i64)>) -> String {
        match query {
            Some((key, value)) => format!("{}/{}?{}={}", self.base_url, procedure, key, value),
            None => format!("{}/{}", self.base_url, procedure),
        }
    }

    async fn query<T: DeserializeOwned>(
        &self,
        procedure: &str,
        query: Option<(&str, i64)>,
    ) -> Result<T, String> {
        let url = self.procedure_url(procedure, query);

        match Request::get(&url).send().await {
            Ok(response) => Self::read_response(procedure, response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    async fn mutate<I: Serialize, T: DeserializeOwned>(
        &self,
        procedure: &str,
        input: &I,
    ) -> Result<T, String> {
        let url = self.procedure_url(procedure, None);

        match Request::post(&url)
            .json(input)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => Self::read_response(procedure, response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    async fn read_response<T: DeserializeOwned>(
        procedure: &str,
        response: Response,
    ) -> Result<T, String> {
        if response.ok() {
            return response
                .json::<T>()
                .await
                .map_err(|e| format!("Failed to parse {} response: {}", procedure, e));
        }

        let status = response.status();
        match response.json::<ApiErrorBody>().await {
            Ok(body) => Err(body.error),
            Err(_) => Err(format!("{} failed with status {}", procedure, status)),
        }
    }

    pub async fn healthcheck(&self) -> Result<HealthStatus, String> {
        self.query("healthcheck", None).await
    }

    // Patients

    pub async fn create_patient(&self, input: &CreatePatientInput) -> Result<Patient, String> {
        self.mutate("createPatient", input).await
    }

    pub async fn get_patients(&self) -> Result<Vec<Patient>, String> {
        self.query("getPatients", None).await
    }

    /// `None` when the patient does not exist
    pub async fn get_patient_by_id(&self, id: i64) -> Result<Option<Patient>, String> {
        self.query("getPatientById", Some(("id", id))).await
    }

    pub async fn update_patient(&self, input: &UpdatePatientInput) -> Result<Patient, String> {
        self.mutate("updatePatient", input).await
    }

    // Deliveries

    pub async fn create_delivery_service(
        &self,
        input: &CreateDeliveryServiceInput,
    ) -> Result<DeliveryService, String> {
        self.mutate("createDeliveryService", input).await
    }

    pub async fn get_delivery_services(&self) -> Result<Vec<DeliveryService>, String> {
        self.query("getDeliveryServices", None).await
    }

    pub async fn get_delivery_services_by_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<DeliveryService>, String> {
        self.query("getDeliveryServicesByPatient", Some(("patientId", patient_id)))
            .await
    }

    // Immunizations

    pub async fn create_immunization(
        &self,
        input: &CreateImmunizationInput,
    ) -> Result<Immunization, String> {
        self.mutate("createImmunization", input).await
    }

    pub async fn get_immunizations(&self) -> Result<Vec<Immunization>, String> {
        self.query("getImmunizations", None).await
    }

    pub async fn get_immunizations_by_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<Immunization>, String> {
        self.query("getImmunizationsByPatient", Some(("patientId", patient_id)))
            .await
    }

    // Medical checkups

    pub async fn create_medical_checkup(
        &self,
        input: &CreateMedicalCheckupInput,
    ) -> Result<MedicalCheckup, String> {
        self.mutate("createMedicalCheckup", input).await
    }

    pub async fn get_medical_checkups(&self) -> Result<Vec<MedicalCheckup>, String> {
        self.query("getMedicalCheckups", None).await
    }

    pub async fn get_medical_checkups_by_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<MedicalCheckup>, String> {
        self.query("getMedicalCheckupsByPatient", Some(("patientId", patient_id)))
            .await
    }

    pub async fn update_medical_checkup(
        &self,
        input: &UpdateMedicalCheckupInput,
    ) -> Result<MedicalCheckup, String> {
        self.mutate("updateMedicalCheckup", input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedure_urls() {
        let client = ApiClient::new();
        assert_eq!(
            client.procedure_url("getPatients", None),
            "http://localhost:2022/rpc/getPatients"
        );
        assert_eq!(
            client.procedure_url("getMedicalCheckupsByPatient", Some(("patientId", 7))),
            "http://localhost:2022/rpc/getMedicalCheckupsByPatient?patientId=7"
        );

        let client = ApiClient::with_base_url("https://clinic.example.org/rpc/".to_string());
        assert_eq!(
            client.procedure_url("getPatientById", Some(("id", 3))),
            "https://clinic.example.org/rpc/getPatientById?id=3"
        );
    }
}
