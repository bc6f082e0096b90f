pub mod clock;
pub mod config;
pub mod connections;
pub mod event_publisher;
pub mod reflection;
pub mod repositories;

pub use clock::{FixedClock, SystemClock};
pub use config::{ConfigError, QuiltConfig, ReflectionConfig, ServerConfig, StorageConfig};
pub use connections::{ClientInfo, ConnectionRegistry};
pub use event_publisher::BroadcastEventPublisher;
pub use reflection::{CohereTextGenerator, DisabledTextGenerator};
pub use repositories::{InMemoryPatchRepository, SqlitePatchRepository};
