//! Crate errors, generated by `error_chain!`.
//!
//! Other modules `use errors::*;` to get `Error`, `ErrorKind`, `Result` and `ResultExt`.

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
    }

    errors {
        InvalidDimension(axis: &'static str, value: usize) {
            description("invalid grid dimension")
            display("invalid grid {} {}: must be at least 1", axis, value)
        }
        UnreachableTarget(x: u32, y: u32) {
            description("unsolvable maze")
            display("unsolvable maze: no passage reaches the target cell ({}, {})", x, y)
        }
        MalformedMazeInput(reason: String) {
            description("malformed maze input")
            display("malformed maze input: {}", reason)
        }
    }
}
