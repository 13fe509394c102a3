// Domain model. Everything here is materialized fresh from the live
// fleet on each operation -- there is no store.

mod device;
mod tunnel;

pub use device::{Device, DeviceState, TransportKind};
pub use tunnel::{MANAGED_RULES, TunnelRule};
