mod client;

pub use client::{
    status_url, ClientOptions, GatewayClient, GatewayError, StatusPayload, STATUS_PATH,
};
