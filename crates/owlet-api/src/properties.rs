// Property read and datapoint write endpoints.

use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::models::{PropertyRecord, PropertySnapshot};
use crate::session::Session;

/// Datapoint target for base-station toggles. The vendor app posts every
/// toggle to this one fixed property id regardless of which device is
/// addressed -- kept faithful here rather than resolved per DSN.
const BASE_STATION_PROPERTY_ID: &str = "14852273";

impl Session {
    /// Fetch and decode the property snapshot for one device.
    ///
    /// `GET {ads}/dsns/{dsn}/properties.json`
    pub async fn get_properties(&self, dsn: &str) -> Result<PropertySnapshot, Error> {
        let url = self.ads_url().join(&format!("dsns/{dsn}/properties.json"))?;
        debug!(dsn, "fetching properties");

        let records: Vec<PropertyRecord> = self
            .run_authorized(|auth| self.get_json(url.clone(), auth))
            .await?;

        Ok(PropertySnapshot::from_records(records))
    }

    /// Turn the base station on or off.
    ///
    /// `POST {ads}/properties/{id}/datapoints.json` with
    /// `{datapoint: {value: 1|0}}`.
    pub async fn set_base_station(&self, dsn: &str, on: bool) -> Result<(), Error> {
        let url = self.ads_url().join(&format!(
            "properties/{BASE_STATION_PROPERTY_ID}/datapoints.json"
        ))?;
        debug!(dsn, on, "toggling base station");

        let body = json!({ "datapoint": { "value": i32::from(on) } });
        self.run_authorized(|auth| self.post_json(url.clone(), &body, auth))
            .await
    }
}
