//! CLI subcommand implementations.

pub mod events;
pub mod life;
pub mod profile;
pub mod status;
pub mod util;
pub mod year;
