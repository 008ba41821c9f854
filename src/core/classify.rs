// DeliverySleuth - core/classify.rs
//
// Timeliness classification of a validated delivery against its window.
// Pure logic, no I/O.

use crate::core::model::{DeliveryStatus, ParsedDelivery};

/// Classify a delivery.
///
/// - before the window start: `Early`
/// - at or after the window end: `Late`
/// - inside the window, before its midpoint: `EarlyOnTime`
/// - inside the window, at or after its midpoint: `LateOnTime`
///
/// The end check comes first, so a zero-width window only ever yields
/// `Early` or `Late`.
pub fn classify(delivery: &ParsedDelivery) -> DeliveryStatus {
    let at = delivery.delivered_at;

    if at < delivery.window_start {
        return DeliveryStatus::Early;
    }
    if at >= delivery.window_end {
        return DeliveryStatus::Late;
    }

    let midpoint = delivery.window_start + (delivery.window_end - delivery.window_start) / 2;
    if at < midpoint {
        DeliveryStatus::EarlyOnTime
    } else {
        DeliveryStatus::LateOnTime
    }
}
