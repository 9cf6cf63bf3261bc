mod io;
mod types;

#[cfg(test)]
pub(in crate::distributed) use io::MAX_MESSAGE_BYTES;
pub(in crate::distributed) use io::{read_message, send_message};
pub(in crate::distributed) use types::*;
