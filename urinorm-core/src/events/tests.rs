use crate::events::*;
use pretty_assertions::assert_eq;

#[test]
fn test_log_dedups_and_counts() {
    let mut q: EventQueue<ClientEvent> = EventQueue::new();

    q.log(ClientEvent::MultiSlash, None);
    q.log(ClientEvent::MultiSlash, None);
    q.log(ClientEvent::MultiSlash, None);

    assert_eq!(q.len(), 1);
    assert_eq!(q.count(ClientEvent::MultiSlash), 3);
    assert_eq!(q.count(ClientEvent::DirTraversal), 0);
}

#[test]
fn test_insertion_order_preserved() {
    let mut q: EventQueue<ClientEvent> = EventQueue::new();

    q.log(ClientEvent::AsciiEncoding, None);
    q.log(ClientEvent::DirTraversal, None);
    q.log(ClientEvent::AsciiEncoding, None);
    q.log(ClientEvent::NonRfcChar, None);

    let kinds: Vec<ClientEvent> = q.iter().map(|(k, _)| k).collect();
    assert_eq!(
        kinds,
        vec![
            ClientEvent::AsciiEncoding,
            ClientEvent::DirTraversal,
            ClientEvent::NonRfcChar,
        ]
    );
}

#[test]
fn test_first_payload_wins() {
    let mut q: EventQueue<ClientEvent> = EventQueue::new();

    q.log(ClientEvent::OversizeDir, Some(Box::new(481_usize)));
    q.log(ClientEvent::OversizeDir, Some(Box::new(9000_usize)));

    let (_, event) = q.iter().next().unwrap();
    assert_eq!(event.count(), 2);
    let len = event.data().unwrap().downcast_ref::<usize>().unwrap();
    assert_eq!(*len, 481);
}

#[test]
fn test_kind_metadata() {
    assert_eq!(ClientEvent::DoubleDecode.priority(), Priority::High);
    assert_eq!(ClientEvent::AsciiEncoding.priority(), Priority::Low);
    assert_eq!(
        AnomServerEvent::AnomalousServer.description(),
        "anomalous http server on undefined http port"
    );
}
