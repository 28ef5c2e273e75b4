use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::types::CallbackOutcome;

/// Receives the provider redirect and hands the outcome to the waiting command.
///
/// The code exchange itself happens in the command, with the verifier from
/// the verifier store. Only the first outcome is kept; a reloaded browser tab
/// cannot replace a code that is already being exchanged.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<CallbackOutcome>>>>,
) -> Html<&'static str> {
    let outcome = match (params.get("code"), params.get("error")) {
        (Some(code), _) if !code.is_empty() => CallbackOutcome::Code(code.clone()),
        (_, Some(error)) => CallbackOutcome::Denied(error.clone()),
        _ => return Html("<h4>Missing authorization code.</h4>"),
    };

    let mut state = shared_state.lock().await;
    if state.is_some() {
        return Html("<h4>Authorization already received.</h4><p>Close browser window.</p>");
    }

    let page = match outcome {
        CallbackOutcome::Code(_) => {
            "<h2>Authorization received.</h2><p>Close browser window.</p>"
        }
        CallbackOutcome::Denied(_) => "<h4>Authorization denied.</h4>",
    };
    *state = Some(outcome);
    Html(page)
}
