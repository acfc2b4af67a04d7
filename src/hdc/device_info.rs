// Composite device info: six param queries plus screen, network and battery dumps.

use tracing::{instrument, warn};

use super::HdcClient;
use super::command::{CommandArgs, Verb};
use super::parser;
use crate::error::{HdcError, HdcResult};
use crate::models::DeviceInfo;

const PARAM_NAME: &str = "const.product.name";
const PARAM_BRAND: &str = "const.product.brand";
const PARAM_MODEL: &str = "const.product.model";
const PARAM_SOFTWARE_VERSION: &str = "const.product.software.version";
const PARAM_API_VERSION: &str = "const.ohos.apiversion";
const PARAM_CPU_ABI: &str = "const.product.cpu.abilist";

impl HdcClient {
    async fn param(&self, device: &str, key: &str) -> HdcResult<String> {
        let out = self
            .run_on(Verb::GetParam, device, CommandArgs::new().with("key", key))
            .await?;
        Ok(parser::parse_scalar(&out))
    }

    /// All-or-nothing: a failing sub-query fails the whole call with `AggregationFailure`
    /// and nothing gathered so far is returned. Unparseable output is not a failure; it
    /// degrades to "Unknown" / 0.
    #[instrument(skip(self), fields(client = "hdc", operation = "get_device_info"))]
    pub async fn get_device_info(&self, device: &str) -> HdcResult<DeviceInfo> {
        self.collect_device_info(device).await.map_err(|e| {
            warn!(device, error = %e, "device info query failed");
            HdcError::AggregationFailure {
                device: device.to_string(),
                source: Box::new(e),
            }
        })
    }

    async fn collect_device_info(&self, device: &str) -> HdcResult<DeviceInfo> {
        let name = self.param(device, PARAM_NAME).await?;
        let brand = self.param(device, PARAM_BRAND).await?;
        let model = self.param(device, PARAM_MODEL).await?;
        let version = self.param(device, PARAM_SOFTWARE_VERSION).await?;
        let api_version = self.param(device, PARAM_API_VERSION).await?;
        let cpu_arch = self.param(device, PARAM_CPU_ABI).await?;

        let screen = self
            .run_on(Verb::DumpScreen, device, CommandArgs::new())
            .await?;
        let network = self
            .run_on(Verb::DumpNetwork, device, CommandArgs::new())
            .await?;
        let battery_dump = self
            .run_on(Verb::DumpBattery, device, CommandArgs::new())
            .await?;

        Ok(DeviceInfo {
            name,
            brand,
            model,
            version,
            api_version,
            cpu_arch,
            resolution: parser::parse_resolution(&screen),
            ip_address: parser::parse_ip_address(&network),
            battery: parser::parse_battery(&battery_dump),
            temperature: parser::parse_temperature(&battery_dump),
        })
    }
}
