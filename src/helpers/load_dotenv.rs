use std::env;

use crate::constants::envvars;

// Logging isn't initialised yet at this point, and stdout is reserved for command output
pub fn load_dotenv() {
    if dotenv::dotenv().is_ok() {
        eprintln!("Loaded local .env")
    }
    // Also load $SNAP_COMMON/.env if exists
    if let Ok(snap_common) = env::var(envvars::SNAP_COMMON) {
        let snap_common_dotenv = format!("{snap_common}/.env");
        if dotenv::from_path(&snap_common_dotenv).is_ok() {
            eprintln!("Loaded {snap_common_dotenv}");
        }
    }
}
