//! `/addresses` endpoints.

use storefront_core::generation::Operation;
use storefront_core::types::{Address, AddressInput};

use super::{malformed, normalize, ApiClient};
use crate::error::RequestError;
use crate::wire::account::{AddressBody, AddressEnvelope, AddressListResponse};
use crate::wire::Ack;

impl ApiClient {
    pub async fn list_addresses(&self) -> Result<Vec<Address>, RequestError> {
        let op = Operation::FetchAddresses;
        let response: AddressListResponse = self.get(op, "/addresses").await?;
        normalize(op, response)
    }

    pub async fn get_address(&self, id: u64) -> Result<Address, RequestError> {
        let op = Operation::FetchAddress;
        let envelope: AddressEnvelope = self.get(op, &format!("/addresses/{id}")).await?;
        normalize(op, envelope.address)
    }

    /// Returns the new address id.
    pub async fn create_address(&self, input: &AddressInput) -> Result<u64, RequestError> {
        let op = Operation::CreateAddress;
        let ack: Ack = self.post(op, "/addresses", &AddressBody::from(input)).await?;
        ack.created_id().map_err(|e| malformed(op, e))
    }

    pub async fn update_address(&self, id: u64, input: &AddressInput) -> Result<(), RequestError> {
        let _: Ack = self
            .put(Operation::UpdateAddress, &format!("/addresses/{id}"), &AddressBody::from(input))
            .await?;
        Ok(())
    }

    pub async fn delete_address(&self, id: u64) -> Result<(), RequestError> {
        let _: Ack = self.delete(Operation::DeleteAddress, &format!("/addresses/{id}")).await?;
        Ok(())
    }
}
