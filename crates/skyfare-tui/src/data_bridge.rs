//! Data bridge: connects [`Session`] events and store streams to TUI actions.
//!
//! Runs as a background task, forwarding every session event and every
//! change of the offer list as an [`Action`] until cancelled.

use futures::{Stream, StreamExt, stream};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use skyfare_core::{AppStore, LocationField, Session, SessionEvent};

use crate::action::Action;

pub async fn spawn_data_bridge(
    session: Session,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut events = session.subscribe_events();
    let store = session.store();
    // Yields the current list first, so the results screen starts in sync
    let mut offers = store.subscribe_flight_offers().into_stream();
    let mut suggestions = stream::select(
        suggestion_changes(store, LocationField::Origin),
        suggestion_changes(store, LocationField::Destination),
    );

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            event = events.recv() => match event {
                Ok(event) => {
                    let _ = action_tx.send(event_to_action(event));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "data bridge lagged behind session events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },

            Some(list) = offers.next() => {
                debug!(count = list.len(), "dispatching OffersUpdated");
                let _ = action_tx.send(Action::OffersUpdated(list));
            }

            Some(action) = suggestions.next() => {
                let _ = action_tx.send(action);
            }
        }
    }

    debug!("data bridge stopped");
}

/// Changes of one field's suggestion list after the bridge subscribed.
fn suggestion_changes(store: &AppStore, field: LocationField) -> impl Stream<Item = Action> + Unpin {
    store
        .subscribe_suggestions(field)
        .into_changes()
        .map(move |list| Action::SuggestionsUpdated {
            field,
            count: list.len(),
        })
}

fn event_to_action(event: SessionEvent) -> Action {
    match event {
        SessionEvent::LookupFailed { field, message } => Action::LookupFailed { field, message },
        SessionEvent::SearchCompleted { count } => Action::SearchCompleted { count },
        SessionEvent::SearchFailed { message } => Action::SearchFailed(message),
    }
}
