mod credentials;
mod endpoints;
mod environment;
mod identity;
mod sdk_logging;
mod service_config;
mod session;
mod settings;
mod shared_config;

pub use credentials::*;
pub use endpoints::*;
pub use environment::*;
pub use identity::*;
pub use sdk_logging::*;
pub use session::*;
pub use settings::*;
