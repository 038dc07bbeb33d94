use crate::conf::NormalizeConf;
use crate::events::ClientEvent;
use crate::norm::decode::{Decoded, UriDecoder};
use crate::norm::path::{
    DirOut, NormBuf, UriNormState, check_long_dir, dir_norm, dir_set, dir_trav,
};
use crate::session::Session;

use thiserror::Error;
use tracing::debug;

/// Degenerate normalization outcomes. Both mean the request's URI is
/// unusable; neither is a crash.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum NormalizeError {
    #[error("normalized uri is empty")]
    Empty,

    /// Decoding can only shrink a URI; growth means a normalization bug,
    /// so the result is rejected rather than trusted.
    #[error("normalized uri grew from {input_len} to {written} bytes")]
    Expanded { written: usize, input_len: usize },
}

enum Inspect {
    /// The normalizer consumed the byte and wrote whatever it needed to.
    Handled,
    /// Nothing special; the driver writes the byte as-is.
    Verbatim,
    /// Input or output exhausted mid-sequence.
    End,
}

/// Dispatch one decoded byte through the path-normalization rules.
fn inspect_uri_char(
    dec: &mut UriDecoder<'_, '_>,
    state: &mut UriNormState,
    out: &mut NormBuf<'_>,
    byte: u8,
) -> Inspect {
    // "scheme://" before any directory: write the ':' and skip one of the
    // two slashes, so the first directory tracked is the one inside the
    // authority. Otherwise a fake "evil://" prefix seeds a directory for
    // traversals to resolve into.
    if state.no_dirs()
        && byte == b':'
        && dec.raw_ahead(2).is_some()
        && dec.raw_ahead(0) == Some(b'/')
        && dec.raw_ahead(1) == Some(b'/')
    {
        if !out.in_bounds_at(2) {
            return Inspect::End;
        }

        out.push(b':');
        dec.skip_raw();
        return Inspect::Handled;
    }

    if byte == b'/' {
        check_long_dir(dec, state, out.pos());

        match dir_norm(dec, state) {
            DirOut::Traversal => dir_trav(state, out),

            DirOut::End => {
                // The slash itself still lands in the output.
                dir_set(state, out);
                return Inspect::End;
            }

            DirOut::Byte(next) => {
                dir_set(state, out);

                if !out.in_bounds() {
                    return Inspect::End;
                }

                if dec.conf().is_non_rfc(next) {
                    dec.alert(ClientEvent::NonRfcChar);
                }

                out.push(next);
            }
        }

        return Inspect::Handled;
    }

    if byte == b'?' {
        // One last directory check; everything after this is query string.
        check_long_dir(dec, state, out.pos());
        state.mark_param(out.pos());
    }

    Inspect::Verbatim
}

/// Normalize one request URI into the caller's output buffer.
///
/// Decodes byte by byte through the layered pipeline, resolves directory
/// constructs as it writes, and reports the number of output bytes. Evasion
/// techniques encountered along the way are logged, deduplicated, into the
/// session's client event queue.
///
/// A full output buffer ends the walk early with whatever was written; only
/// an empty result or an output longer than the input is an error.
pub fn normalize_uri(
    conf: &NormalizeConf,
    session: &mut Session,
    uri: &[u8],
    out: &mut [u8],
) -> Result<usize, NormalizeError> {
    let mut dec = UriDecoder::new(conf, &mut session.client_events, uri);
    let mut state = UriNormState::new();
    let mut out = NormBuf::new(out);

    while out.in_bounds() {
        let byte = match dec.next_decoded(state.in_param()) {
            Decoded::End => break,
            Decoded::Byte(b) => b,
        };

        if conf.is_non_rfc(byte) {
            dec.alert(ClientEvent::NonRfcChar);
        }

        match inspect_uri_char(&mut dec, &mut state, &mut out, byte) {
            Inspect::End => break,
            Inspect::Handled => {}
            Inspect::Verbatim => out.push(byte),
        }
    }

    // A trailing directory has no separator after it to trigger the check.
    check_long_dir(&mut dec, &state, out.pos());

    let written = out.pos();

    if written < 1 {
        debug!(input_len = uri.len(), "normalization produced no output");
        return Err(NormalizeError::Empty);
    }

    if written > uri.len() {
        debug!(
            written,
            input_len = uri.len(),
            "normalized uri longer than input"
        );
        return Err(NormalizeError::Expanded {
            written,
            input_len: uri.len(),
        });
    }

    Ok(written)
}
