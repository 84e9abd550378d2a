use anyhow::Result;
use async_trait::async_trait;

use crate::alert::engine::AlertEvent;

#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send(&self, event: &AlertEvent) -> Result<()>;
}

pub struct StdoutSink;

#[async_trait]
impl AlertSink for StdoutSink {
    async fn send(&self, event: &AlertEvent) -> Result<()> {
        println!("[{:?}] {} - {}", event.kind, event.title, event.body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AlertSink, StdoutSink};
    use crate::alert::engine::AlertEvent;
    use crate::alert::rules::AlertEventKind;

    #[test]
    fn stdout_sink_accepts_events() {
        let event = AlertEvent {
            kind: AlertEventKind::DiagnosticChange,
            title: "Nouveau diagnostic pour Test".to_string(),
            body: "corps".to_string(),
        };
        tokio_test::block_on(StdoutSink.send(&event)).expect("stdout sink failed");
    }
}
