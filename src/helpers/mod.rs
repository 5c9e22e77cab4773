mod clock;
mod load_dotenv;
mod time;

pub use clock::{Clock, SystemClock};
pub use load_dotenv::load_dotenv;
pub use time::now_iso;

#[cfg(test)]
pub use clock::ManualClock;
