// Device listing endpoint.

use tracing::debug;

use crate::error::Error;
use crate::models::{Device, DeviceRecord};
use crate::session::Session;

impl Session {
    /// List the devices registered to the account.
    ///
    /// `GET {ads}/devices.json`
    pub async fn list_devices(&self) -> Result<Vec<Device>, Error> {
        let url = self.ads_url().join("devices.json")?;
        debug!("listing devices");

        let records: Vec<DeviceRecord> = self
            .run_authorized(|auth| self.get_json(url.clone(), auth))
            .await?;

        Ok(records.into_iter().map(Device::from).collect())
    }
}
