//! Message processing through the TEA update loop

use reqwest::Client;
use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message and every follow-up it produces, dispatching actions
/// as they come out of `update`
pub fn process_message(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    client: &Client,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), client);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
