use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::{sync::Mutex, task::JoinHandle, time::Instant};

use crate::{
    api,
    error::{Error, Result},
    types::CallbackOutcome,
};

pub type CallbackState = Arc<Mutex<Option<CallbackOutcome>>>;

/// A running callback server.
pub struct CallbackServer {
    pub local_addr: SocketAddr,
    pub state: CallbackState,
    handle: JoinHandle<()>,
}

/// Binds the callback server and serves it in the background.
///
/// Binding happens before this returns, so the browser can be sent to the
/// provider right after without racing the listener.
pub async fn start_callback_server(addr: SocketAddr) -> Result<CallbackServer> {
    let state: CallbackState = Arc::new(Mutex::new(None));

    let app = Router::new().route(
        "/callback",
        get(api::callback).layer(Extension(Arc::clone(&state))),
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            crate::warning!("Callback server stopped: {}", e);
        }
    });

    Ok(CallbackServer {
        local_addr,
        state,
        handle,
    })
}

impl CallbackServer {
    /// Waits for the provider redirect, polling once a second.
    ///
    /// Returns the authorization code, [`Error::Callback`] if the user denied
    /// access, or [`Error::CallbackTimeout`] after `max_wait`.
    pub async fn wait_for_code(&self, max_wait: Duration) -> Result<String> {
        let start = Instant::now();

        while start.elapsed() < max_wait {
            let lock = self.state.lock().await;
            match lock.as_ref() {
                Some(CallbackOutcome::Code(code)) => return Ok(code.clone()),
                Some(CallbackOutcome::Denied(error)) => return Err(Error::Callback(error.clone())),
                None => {}
            }
            drop(lock);
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        Err(Error::CallbackTimeout(max_wait.as_secs()))
    }

    pub fn shutdown(self) {
        self.handle.abort();
    }
}
