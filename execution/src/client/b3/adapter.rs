
//! Event adapter for converting XmlGw events to Meridian AccountEvents

use crate::{balance::AssetBalance, error::AssetNameExchange, UnindexedAccountEvent};
// use crate::profitdll::{CallbackEvent, OrderSide};

use meridian_markets::Side;

// Removed: CallbackEvent conversion is obsolete after refactor.

// Removed: OrderSide conversion is obsolete after refactor.

// Removed: convert_to_profit_side is obsolete after refactor.

/// Create a balance snapshot from XmlGw data
pub fn create_balance_snapshot(
    _asset_data: &[(String, f64)],
) -> Vec<AssetBalance<AssetNameExchange>> {
    // Convert XmlGw balance data to Meridian format
    Vec::new()
}
