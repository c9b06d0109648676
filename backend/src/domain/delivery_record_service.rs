use shared::{CreateDeliveryServiceInput, DeliveryService, Validate};
use tracing::info;

use crate::domain::error::{ClinicError, ClinicResult};
use crate::storage::{codec, DbConnection, DeliveryServiceRepository};

/// Records deliveries (births). Records cannot be changed once written.
#[derive(Clone)]
pub struct DeliveryRecordService {
    repository: DeliveryServiceRepository,
}

impl DeliveryRecordService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: DeliveryServiceRepository::new(db),
        }
    }

    pub async fn create_delivery(
        &self,
        input: CreateDeliveryServiceInput,
    ) -> ClinicResult<DeliveryService> {
        info!(
            "Recording delivery: patient_id={}, date={}, type={}",
            input.patient_id, input.delivery_date, input.delivery_type
        );

        input.validate()?;

        let delivery = self
            .repository
            .insert(&input, codec::now())
            .await
            .map_err(|e| ClinicError::from_patient_write(e, input.patient_id))?;

        info!("Recorded delivery {} for patient {}", delivery.id, delivery.patient_id);
        Ok(delivery)
    }

    pub async fn list_deliveries(&self) -> ClinicResult<Vec<DeliveryService>> {
        info!("Listing all deliveries");

        let deliveries = self.repository.list().await?;

        info!("Found {} deliveries", deliveries.len());
        Ok(deliveries)
    }

    pub async fn list_deliveries_by_patient(
        &self,
        patient_id: i64,
    ) -> ClinicResult<Vec<DeliveryService>> {
        info!("Listing deliveries for patient {}", patient_id);

        Ok(self.repository.list_by_patient(patient_id).await?)
    }
}
