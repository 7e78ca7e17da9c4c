use schoolhub_core::Envelope;
use schoolhub_models::ids::MessageId;
use schoolhub_models::{Message, MessageForm};
use tracing::instrument;

use super::invalidate_all;
use crate::resource::Resource;
use crate::resource::resources::Messages;
use crate::{ApiClient, ApiError};

pub struct MessagesApi;

impl MessagesApi {
    /// `POST /messages`.
    #[instrument(skip(client, form), fields(recipient_id = %form.recipient_id))]
    pub async fn send(client: &ApiClient, form: &MessageForm) -> Result<Message, ApiError> {
        let message: Envelope<Message> = client.post(Messages::PATH, form).await?;
        invalidate_all(client, &[Messages::KEY]).await;
        Ok(message.into_inner())
    }

    /// `PUT /messages/{id}/read`.
    #[instrument(skip(client))]
    pub async fn mark_read(client: &ApiClient, message_id: &MessageId) -> Result<(), ApiError> {
        let path = format!("{}/read", Messages::item_path(message_id));
        client.put_unit(&path, &serde_json::json!({})).await?;
        invalidate_all(client, &[Messages::KEY]).await;
        Ok(())
    }
}
