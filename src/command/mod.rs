mod fields;
mod run;
mod status;

pub use fields::fields;
pub use run::run;
pub use status::status;
