//! Command implementations for the CLI.

mod config;
mod critical;
mod latest;
mod login;
mod readings;
mod series;
mod status;
mod submit;
mod watch;

pub use config::cmd_config;
pub use critical::cmd_critical;
pub use latest::cmd_latest;
pub use login::{cmd_login, cmd_subscribe};
pub use readings::{ReadingsArgs, cmd_readings};
pub use series::{SeriesArgs, cmd_series};
pub use status::cmd_status;
pub use submit::{SubmitArgs, cmd_submit};
pub use watch::{WatchArgs, cmd_watch};
