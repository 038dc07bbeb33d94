use std::sync::{Arc, Once};

use tracing::debug;
use tracing_subscriber::EnvFilter;
use urinorm_core::{IisUnicodeMap, NormalizeConf, Session, normalize_uri};

static TRACING: Once = Once::new();

/// Route engine tracing into the test harness output. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .init();
    });
}

/// A small codepoint table in the shape a real IIS codepage produces:
/// fullwidth solidus and fraction slash fold onto `/`, fullwidth full stop
/// onto `.`.
pub fn iis_map() -> Arc<IisUnicodeMap> {
    Arc::new(IisUnicodeMap::from_pairs([
        (0x2044, b'/'),
        (0xff0f, b'/'),
        (0xff0e, b'.'),
    ]))
}

/// One-shot normalization with a same-sized output buffer, the way the
/// inspection path calls it per request.
pub fn normalize(conf: &NormalizeConf, input: &[u8]) -> (Vec<u8>, Session) {
    let mut session = Session::new();
    let mut out = vec![0u8; input.len()];

    let written = normalize_uri(conf, &mut session, input, &mut out)
        .expect("normalization should succeed");
    out.truncate(written);

    debug!(
        input_len = input.len(),
        written,
        events = session.client_events.len(),
        "normalized test uri"
    );

    (out, session)
}
