use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Tables whose mutations are announced on the change feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangedTable {
    Products,
    Documents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

/// A refresh signal. Carries no row data; subscribers re-run their normal
/// read path, which is idempotent and always reflects current store state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub table: ChangedTable,
    pub op: ChangeOp,
}

static CHANNEL: Lazy<broadcast::Sender<ChangeEvent>> = Lazy::new(|| {
    let (tx, _) = broadcast::channel(64);
    tx
});

/// Announce a mutation. Dropped silently when nobody is listening; lagged
/// subscribers miss events and catch up on their next read.
pub fn publish(table: ChangedTable, op: ChangeOp) {
    let _ = CHANNEL.send(ChangeEvent { table, op });
}

pub fn subscribe() -> broadcast::Receiver<ChangeEvent> {
    CHANNEL.subscribe()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let mut rx = subscribe();
        publish(ChangedTable::Products, ChangeOp::Insert);
        // The channel is global, so other tests may interleave events.
        loop {
            let event = rx.recv().await.unwrap();
            if event.table == ChangedTable::Products && event.op == ChangeOp::Insert {
                break;
            }
        }
    }

    #[test]
    fn publish_without_subscribers_does_not_panic() {
        publish(ChangedTable::Documents, ChangeOp::Delete);
    }
}
