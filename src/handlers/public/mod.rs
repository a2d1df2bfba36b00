// Endpoints reachable without a session cookie: account creation and login,
// the token-acquisition path.
pub mod auth;
