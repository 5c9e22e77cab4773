use std::path::PathBuf;

pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub once: bool,
}

pub struct StatusArgs {
    pub config: Option<PathBuf>,
    pub host: Option<String>,
}
