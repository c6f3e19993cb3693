pub mod error;
pub mod instance;
pub mod registry;

pub use error::{InstanceError, RegistryError};
pub use instance::{Instance, InstanceSchema, ParamSpec, Params, validate_instance_name};
pub use registry::{DEFAULT_PROGRAM, Registry, SelectorTask};
