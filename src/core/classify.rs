use crate::domain::model::{AppId, RawCell};

/// Route one raw input cell to a storefront. Integer cells are iTunes track
/// ids, text cells are Play-Store package names. Anything else is logged and
/// dropped; a bad row never aborts the batch.
pub fn classify(cell: &RawCell) -> Option<AppId> {
    match cell {
        RawCell::Int(id) => Some(AppId::Numeric(*id)),
        RawCell::Text(package) => Some(AppId::Package(package.clone())),
        RawCell::Other(raw) => {
            tracing::warn!("Failure at: {}", raw);
            None
        }
    }
}
