use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixed pause between per-item inventory requests. A configuration
/// constant, not derived from the marketplace rate limit: the inventory
/// pass is deliberately slower than any marketplace requires.
pub const INVENTORY_REQUEST_DELAY: Duration = Duration::from_millis(1200);

/// Marketplace fee rate applied when a listing has none configured.
pub const DEFAULT_MARKETPLACE_FEE_RATE: Decimal = dec!(0.15);

/// Decimal precision for stored and pushed prices.
pub const PRICE_DECIMAL_PRECISION: u32 = 2;

/// Runaway guard for snapshot pagination. At the gateway page size this
/// covers catalogs far beyond the scale this system targets.
pub const MAX_SNAPSHOT_PAGES: usize = 1000;
