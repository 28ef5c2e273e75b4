mod session;
mod verifier;

pub use session::Handshake;
pub use session::PLAYLIST_DESCRIPTION;
pub use session::Redirect;
pub use session::Session;
pub use session::redirect_to_auth_code_flow;
pub use verifier::VerifierStore;
