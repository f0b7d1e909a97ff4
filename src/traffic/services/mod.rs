//! Service orchestration for traffic configuration.

mod stream;

pub use stream::{
    LINK_LAYER, NETWORK_LAYER, StreamConfig, TrafficConfigError, TrafficConfigRequest,
    TrafficConfigResult, TrafficConfigService, generate_stream,
};
