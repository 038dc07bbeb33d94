use crate::events::{AnomServerEvent, ClientEvent, EventQueue};

/// Per-flow inspection state.
///
/// Two independent queues: one for request-side evasion events, one for
/// anomalous-server events. The normalization engine only ever appends to
/// the client queue; draining and clearing is the caller's business, so a
/// session may accumulate events across several requests on one flow.
#[derive(Default)]
pub struct Session {
    pub client_events: EventQueue<ClientEvent>,
    pub anom_server_events: EventQueue<AnomServerEvent>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
