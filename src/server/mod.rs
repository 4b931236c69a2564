// Server module entry point
// Address resolution, listener creation, accept loop and signal handling

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use listener::{create_listener, resolve_bind_addr};
pub use server_loop::start_server_loop;
pub use signal::shutdown_signal;
