// Domain models parsed from hdc output

mod app;
mod device;
mod device_info;
mod ui;

pub use app::AppRecord;
pub use device::{ConnectionType, Device, DeviceStatus};
pub use device_info::{DeviceInfo, UNKNOWN};
pub use ui::{SwipeDirection, UiOperationResult};
