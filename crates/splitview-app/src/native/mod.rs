//! Browser native messaging transport.
//!
//! The extension launches this binary and talks to it over stdin/stdout
//! with length-prefixed JSON frames. Commands flow in, replies and
//! events flow out, and the controller reaches back into the browser
//! through [`NativeHost`].

pub mod codec;
pub mod host;
pub mod protocol;
pub mod server;


pub use host::NativeHost;
pub use server::serve;
