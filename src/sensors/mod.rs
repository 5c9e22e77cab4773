mod field_sensor;
mod field_types;

pub use field_sensor::FieldSensor;
pub use field_types::{canonical_names, field_type, FieldType, FIELD_TYPES, SENSOR_PREFIX};
