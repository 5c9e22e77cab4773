use chrono::{DateTime, SecondsFormat, Utc};
use std::time::SystemTime;

pub fn now_iso() -> String {
    let now: DateTime<Utc> = SystemTime::now().into();
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_iso_is_rfc3339_utc() {
        let now = now_iso();
        assert!(DateTime::parse_from_rfc3339(&now).is_ok());
        assert!(now.ends_with('Z'));
    }
}
