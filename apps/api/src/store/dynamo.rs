//! DynamoDB-backed guide store.

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::models::guide::GuideRecord;
use crate::store::{GuideStore, StoreError};

/// Constructs a DynamoDB client for AWS or a local endpoint.
pub async fn build_dynamo_client(config: &Config) -> Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "coffeechat-static",
    );

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .credentials_provider(credentials);

    if let Some(endpoint) = &config.dynamo_endpoint {
        loader = loader.endpoint_url(endpoint.as_str());
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}

pub struct DynamoGuideStore {
    client: Client,
    table: String,
}

impl DynamoGuideStore {
    pub fn new(client: Client, table: String) -> Self {
        Self { client, table }
    }
}

#[async_trait]
impl GuideStore for DynamoGuideStore {
    async fn put(&self, record: &GuideRecord) -> Result<(), StoreError> {
        let item = serde_dynamo::to_item(record)
            .map_err(|e| StoreError::WriteFailure(format!("record failed to serialize: {e}")))?;

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::WriteFailure(DisplayErrorContext(e).to_string()))?;

        info!("Guide {} stored in table {}", record.id, self.table);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<GuideRecord>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(classify_get_error)?;

        match output.item {
            Some(item) => {
                let record: GuideRecord = serde_dynamo::from_item(item).map_err(|e| {
                    StoreError::InfrastructureFailure(format!(
                        "stored record failed to deserialize: {e}"
                    ))
                })?;
                Ok(Some(record))
            }
            // Unknown identifier: an absent resource, not an error.
            None => Ok(None),
        }
    }
}

/// Every `get` fault is an infrastructure failure — a missing item is the
/// Ok(None) path, never an error. A missing *table* gets a pointed message
/// because it is the most common misconfiguration; access-denied and
/// transport faults keep the SDK's full context.
fn classify_get_error(err: SdkError<GetItemError>) -> StoreError {
    if let SdkError::ServiceError(ctx) = &err {
        if ctx.err().is_resource_not_found_exception() {
            return StoreError::InfrastructureFailure(
                "guides table does not exist; check table configuration".to_string(),
            );
        }
    }
    StoreError::InfrastructureFailure(DisplayErrorContext(err).to_string())
}

#[cfg(test)]
mod tests {
    use crate::models::guide::test_fixtures::{sample_document, sample_profile};
    use crate::models::guide::GuideRecord;
    use serde_dynamo::Item;

    #[test]
    fn record_round_trips_through_dynamo_item() {
        let record = GuideRecord::create(sample_profile(), sample_document(), true, true);
        let item: Item = serde_dynamo::to_item(&record).unwrap();
        let recovered: GuideRecord = serde_dynamo::from_item(item).unwrap();
        assert_eq!(recovered.id, record.id);
        assert_eq!(recovered.created_at, record.created_at);
        assert!(recovered.has_artifact && recovered.delivered);
        assert_eq!(
            recovered.guide_content.key_strengths,
            record.guide_content.key_strengths
        );
    }
}
