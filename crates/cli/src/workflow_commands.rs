//! GitHub Actions workflow-command emission.
//!
//! The runner picks up specially formatted stdout lines (`::debug::`,
//! `::error::`) and turns them into log annotations. Command data must
//! have `%`, `\r`, and `\n` escaped.

/// Emit a debug line, visible when the workflow runs with debug logging.
pub fn debug(message: &str) {
    println!("::debug::{}", escape_data(message));
}

/// Emit an error annotation marking the action run as failed.
pub fn set_failed(message: &str) {
    println!("::error::{}", escape_data(message));
}

fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
