mod build;
mod pack;

pub use build::{BuildArgs, cmd_build};
pub use pack::cmd_pack;
