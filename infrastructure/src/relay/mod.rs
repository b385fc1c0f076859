//! Relay client
//!
//! Adapter for the [`ModelGateway`](layers_application::ModelGateway) port
//! that talks to the layers relay over HTTP.

mod gateway;

pub use gateway::{HttpRelayGateway, RELAY_PATH};
