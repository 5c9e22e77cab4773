#![allow(dead_code)]
// Each test binary only uses some of these

pub const FULL_STATUS: &str = r#"
{
    "gateway": "eui-b827ebfffe000001",
    "hwversion": "v1",
    "blversion": "2.0",
    "fwversion": "1.0.7",
    "uptime": 104712,
    "connected": true,
    "interface": "WiFi",
    "ssid": "ttn-office",
    "activation_locked": false,
    "configured": true,
    "region": "EU",
    "gwcard": "rn2483",
    "connbroker": true,
    "pup": 42,
    "pdown": 7,
    "estor": true
}
"#;

pub const PARTIAL_STATUS: &str = r#"{"gateway":"gw1","pup":42}"#;
