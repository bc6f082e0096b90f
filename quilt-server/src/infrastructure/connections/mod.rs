mod registry;

pub use registry::{ClientInfo, ConnectionRegistry};
