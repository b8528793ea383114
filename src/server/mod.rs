mod tools;

pub use tools::{GUIDE_URI_PREFIX, PONG, RampDocs, tool_result};
