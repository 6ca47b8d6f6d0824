pub use lib_core::*;

#[cfg(feature = "aws")]
pub use lib_aws::*;
