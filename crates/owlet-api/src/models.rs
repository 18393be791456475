// Wire types for the Ayla device-data API.
//
// Every record comes wrapped in a single-key envelope (`{device: {...}}`,
// `{property: {...}}`). Fields use `#[serde(default)]` liberally because the
// cloud is inconsistent about field presence across firmware versions.
// Property values arrive as a mix of JSON numbers and strings, so they are
// carried as raw `serde_json::Value` until decoded into a snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Devices ──────────────────────────────────────────────────────────

/// Envelope around a single device record from `GET devices.json`.
#[derive(Debug, Deserialize)]
pub struct DeviceRecord {
    pub device: DeviceAttributes,
}

/// Raw device attributes as the cloud reports them.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceAttributes {
    pub dsn: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub connection_status: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
}

/// Read-only projection of a registered device.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    /// Vendor device serial number; addresses the device's properties.
    pub dsn: String,
    pub device_type: Option<String>,
    pub product: Option<String>,
    pub model: Option<String>,
    pub connection_status: Option<String>,
}

impl From<DeviceRecord> for Device {
    fn from(record: DeviceRecord) -> Self {
        let d = record.device;
        Self {
            dsn: d.dsn,
            device_type: d.device_type,
            product: d.product_name,
            model: d.model,
            connection_status: d.connection_status,
        }
    }
}

// ── Properties ───────────────────────────────────────────────────────

/// Envelope around a single property from `GET dsns/{dsn}/properties.json`.
#[derive(Debug, Deserialize)]
pub struct PropertyRecord {
    pub property: Property,
}

/// One named sensor/actuator reading.
#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// Decoded snapshot of the fixed property set a sock reports.
///
/// Every field is optional: the cloud omits properties the device has never
/// reported, and an absent reading is not an error. Boolean fields decode
/// strictly from the JSON number `1` -- the cloud encodes flags numerically,
/// and a string `"1"` does not count.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropertySnapshot {
    pub baby_name: Option<String>,
    pub is_base_station_on: Option<bool>,
    pub battery_level: Option<i64>,
    pub is_charging: Option<bool>,
    pub is_sock_off: Option<bool>,
    pub is_sock_connected: Option<bool>,
    pub is_wiggling: Option<bool>,
    pub heart_rate: Option<i64>,
    pub oxygen_level: Option<i64>,
}

impl PropertySnapshot {
    /// Fold raw property records into a snapshot.
    ///
    /// Unknown property names are ignored.
    pub fn from_records(records: Vec<PropertyRecord>) -> Self {
        let map: HashMap<String, Value> = records
            .into_iter()
            .map(|r| (r.property.name, r.property.value))
            .collect();

        Self {
            baby_name: text(&map, "BABY_NAME"),
            is_base_station_on: flag(&map, "BASE_STATION_ON"),
            battery_level: number(&map, "BATT_LEVEL"),
            is_charging: flag(&map, "CHARGE_STATUS"),
            is_sock_off: flag(&map, "SOCK_OFF"),
            is_sock_connected: flag(&map, "SOCK_CONNECTION"),
            is_wiggling: flag(&map, "MOVEMENT"),
            heart_rate: number(&map, "HEART_RATE"),
            oxygen_level: number(&map, "OXYGEN_LEVEL"),
        }
    }
}

fn text(map: &HashMap<String, Value>, name: &str) -> Option<String> {
    map.get(name)?.as_str().map(str::to_owned)
}

fn number(map: &HashMap<String, Value>, name: &str) -> Option<i64> {
    map.get(name)?.as_i64()
}

/// Numeric-encoded boolean: present and equal to the number 1.
fn flag(map: &HashMap<String, Value>, name: &str) -> Option<bool> {
    Some(map.get(name)?.as_i64() == Some(1))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn record(name: &str, value: Value) -> PropertyRecord {
        PropertyRecord {
            property: Property {
                name: name.to_owned(),
                value,
            },
        }
    }

    #[test]
    fn decodes_full_snapshot() {
        let snapshot = PropertySnapshot::from_records(vec![
            record("BABY_NAME", json!("Maja")),
            record("BASE_STATION_ON", json!(1)),
            record("BATT_LEVEL", json!(42)),
            record("CHARGE_STATUS", json!(1)),
            record("SOCK_OFF", json!(0)),
            record("SOCK_CONNECTION", json!(1)),
            record("MOVEMENT", json!(0)),
            record("HEART_RATE", json!(128)),
            record("OXYGEN_LEVEL", json!(98)),
        ]);

        assert_eq!(snapshot.baby_name.as_deref(), Some("Maja"));
        assert_eq!(snapshot.is_base_station_on, Some(true));
        assert_eq!(snapshot.battery_level, Some(42));
        assert_eq!(snapshot.is_charging, Some(true));
        assert_eq!(snapshot.is_sock_off, Some(false));
        assert_eq!(snapshot.is_sock_connected, Some(true));
        assert_eq!(snapshot.is_wiggling, Some(false));
        assert_eq!(snapshot.heart_rate, Some(128));
        assert_eq!(snapshot.oxygen_level, Some(98));
    }

    #[test]
    fn missing_properties_decode_as_absent() {
        let snapshot = PropertySnapshot::from_records(vec![record("BATT_LEVEL", json!(80))]);

        assert_eq!(snapshot.battery_level, Some(80));
        assert_eq!(snapshot.baby_name, None);
        assert_eq!(snapshot.is_charging, None);
        assert_eq!(snapshot.heart_rate, None);
    }

    #[test]
    fn unknown_properties_are_ignored() {
        let snapshot = PropertySnapshot::from_records(vec![
            record("APP_ACTIVE", json!(1)),
            record("OXYGEN_LEVEL", json!(97)),
        ]);

        assert_eq!(snapshot.oxygen_level, Some(97));
    }

    #[test]
    fn flags_require_the_number_one() {
        // The cloud occasionally reports string values; those never count
        // as "on", matching the strict numeric comparison upstream.
        let snapshot = PropertySnapshot::from_records(vec![
            record("CHARGE_STATUS", json!("1")),
            record("SOCK_OFF", json!(2)),
            record("MOVEMENT", json!(1.0)),
        ]);

        assert_eq!(snapshot.is_charging, Some(false));
        assert_eq!(snapshot.is_sock_off, Some(false));
        // A float is not the integer 1 either.
        assert_eq!(snapshot.is_wiggling, Some(false));
    }

    #[test]
    fn device_projection_maps_envelope_fields() {
        let record: DeviceRecord = serde_json::from_value(json!({
            "device": {
                "dsn": "AC000W000000001",
                "product_name": "Owlet Baby Monitors",
                "model": "AY001MX01",
                "connection_status": "Online",
                "device_type": "Wifi Node"
            }
        }))
        .unwrap();

        let device = Device::from(record);
        assert_eq!(device.dsn, "AC000W000000001");
        assert_eq!(device.product.as_deref(), Some("Owlet Baby Monitors"));
        assert_eq!(device.connection_status.as_deref(), Some("Online"));
    }
}
