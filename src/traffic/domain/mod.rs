//! Domain model for stream descriptors and legacy traffic parameters.

mod descriptor;
mod error;
mod layer;
mod mac;
mod mode;
mod protocol;

pub use descriptor::StreamDescriptor;
pub use error::{ParseNameError, StreamDomainError};
pub use layer::{FieldType, FieldValue, Layer, LayerKind};
pub use mac::MacAddress;
pub use mode::{TrafficMode, TransmitMode};
pub use protocol::{L2Encapsulation, L3Protocol, L4Protocol};
