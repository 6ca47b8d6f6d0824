mod cli_error;
mod constants;
mod files;
mod printer;

pub use cli_error::*;
pub use constants::*;
pub use files::*;
pub use printer::*;
