//! Best-effort event publishing over NATS.
//!
//! The bus is optional: without `NATS_URL` the service runs standalone and
//! every publish is a no-op. Publish failures are logged, never surfaced.

use serde::Serialize;

#[derive(Clone)]
pub struct EventBus {
    client: Option<async_nats::Client>,
}

impl EventBus {
    pub async fn connect(url: Option<&str>) -> Self {
        let client = match url {
            Some(url) => match async_nats::connect(url).await {
                Ok(client) => Some(client),
                Err(err) => {
                    tracing::warn!(error = %err, "NATS unavailable, events disabled");
                    None
                }
            },
            None => None,
        };
        Self { client }
    }

    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub async fn publish<T: Serialize>(&self, subject: &str, payload: &T) {
        let Some(client) = &self.client else {
            return;
        };
        let bytes = match serde_json::to_vec(payload) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(subject, error = %err, "event payload serialization failed");
                return;
            }
        };
        if let Err(err) = client.publish(subject.to_string(), bytes.into()).await {
            tracing::warn!(subject, error = %err, "event publish failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_bus_swallows_publishes() {
        let bus = EventBus::disabled();
        bus.publish("order.created", &serde_json::json!({ "orderId": 1 }))
            .await;
    }
}
