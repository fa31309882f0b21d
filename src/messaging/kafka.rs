use async_trait::async_trait;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::error::KafkaResult;
use rdkafka::message::Message;
use rdkafka::ClientConfig;

use super::consumer::{MessageSource, SourceError, StreamMessage};
use crate::config::KafkaConfig;

/// Kafka-backed [`MessageSource`].
///
/// Starts from the earliest available offset for a new group. Offsets are
/// auto-committed once a message has been handed out, whatever the handler
/// does with it.
pub struct KafkaSource {
    consumer: StreamConsumer,
}

impl KafkaSource {
    pub fn new(config: &KafkaConfig) -> KafkaResult<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", config.brokers.join(","))
            .set("group.id", &config.group_id)
            .set("auto.offset.reset", "earliest")
            .set("enable.auto.commit", "true")
            .set("auto.commit.interval.ms", "1000")
            .create()?;

        consumer.subscribe(&[config.topic.as_str()])?;
        log::info!(
            "kafka consumer subscribed: topic={} group_id={}",
            config.topic,
            config.group_id
        );

        Ok(Self { consumer })
    }
}

#[async_trait]
impl MessageSource for KafkaSource {
    async fn next_message(&mut self) -> Result<StreamMessage, SourceError> {
        let msg = self
            .consumer
            .recv()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        Ok(StreamMessage {
            partition: msg.partition(),
            offset: msg.offset(),
            payload: msg.payload().map(<[u8]>::to_vec).unwrap_or_default(),
        })
    }

    fn close(&mut self) {
        self.consumer.unsubscribe();
        log::info!("kafka consumer closed");
    }
}
