mod aggregate;
mod args;
mod config;
mod distributed;
mod domain;
mod entry;
mod error;
mod exec;
mod logger;
mod report;
mod sinks;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
