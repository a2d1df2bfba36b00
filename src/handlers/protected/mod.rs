// Endpoints behind the session gate. Every handler here reads the
// authenticated subject from the request extensions and runs an ownership
// check before touching a command or query.
pub mod expenses;
pub mod users;
