//! Static metric table for the four sample fields.

use crate::frame::FieldKey;

/// Sensor identifier attached to every published measurement.
pub const SENSOR_ID: &str = "metek-sonic3D";

/// Sentinel string downstream consumers substitute for missing values.
pub const MISSING_VALUE: &str = "-9999.9";

/// Mapping from one sample field to its published metric identity.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    pub key: FieldKey,
    pub name: &'static str,
    pub units: &'static str,
    pub description: &'static str,
}

/// Published metric identities, in protocol field order.
pub const METRIC_SPECS: [MetricSpec; 4] = [
    MetricSpec {
        key: FieldKey::U,
        name: "sonic3d.uwind",
        units: "m/s",
        description: "E/W wind",
    },
    MetricSpec {
        key: FieldKey::V,
        name: "sonic3d.vwind",
        units: "m/s",
        description: "N/S wind",
    },
    MetricSpec {
        key: FieldKey::W,
        name: "sonic3d.wwind",
        units: "m/s",
        description: "Vertical wind",
    },
    MetricSpec {
        key: FieldKey::T,
        name: "sonic3d.temp",
        units: "degrees Celsius",
        description: "Ambient Temperature",
    },
];
