pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use commands::command_argument_builder;
pub use handlers::{
    build_request_headers, handle_recon, parse_depth, parse_header_arg, usage_exit_code,
};
