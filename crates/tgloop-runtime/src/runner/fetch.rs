use serde_json::Value;
use tgloop_core::{
    config::DecodePolicy,
    error::TgError,
    request::GetUpdates,
    traits::{decode, BotApi, Transport},
    types::Update,
};

/// One entry of a fetched batch.
#[derive(Debug)]
pub(super) enum BatchItem {
    Update(Update),
    /// Lenient mode only: the record had an id but its payload did not decode.
    Undecodable { id: i64, error: TgError },
}

/// Fetch one batch, sorted by ascending update id.
pub(super) async fn fetch(
    api: &dyn Transport,
    request: GetUpdates,
    policy: DecodePolicy,
) -> Result<Vec<BatchItem>, TgError> {
    let mut items = match policy {
        DecodePolicy::Strict => api
            .get_updates(request)
            .await?
            .into_iter()
            .map(BatchItem::Update)
            .collect::<Vec<_>>(),
        DecodePolicy::Lenient => api
            .get_updates_raw(request)
            .await?
            .into_iter()
            .map(decode_lenient)
            .collect::<Result<Vec<_>, _>>()?,
    };
    items.sort_by_key(BatchItem::id);
    Ok(items)
}

/// Without an `update_id` the cursor cannot step past the record, so that
/// still fails the fetch.
fn decode_lenient(raw: Value) -> Result<BatchItem, TgError> {
    let id: i64 = decode(raw.get("update_id").cloned().unwrap_or(Value::Null))?;
    Ok(match decode::<Update>(raw) {
        Ok(update) => BatchItem::Update(update),
        Err(error) => BatchItem::Undecodable { id, error },
    })
}

impl BatchItem {
    fn id(&self) -> i64 {
        match self {
            Self::Update(update) => update.id,
            Self::Undecodable { id, .. } => *id,
        }
    }
}
