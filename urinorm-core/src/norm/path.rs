use crate::events::ClientEvent;
use crate::norm::decode::{Decoded, UriDecoder};
use smallvec::SmallVec;

/// Hard cap on tracked directory positions. A path deeper than this keeps
/// normalizing, but traversals can only ever resolve back into the tracked
/// prefix.
pub(crate) const MAX_DIRS: usize = 2048;

/// Write cursor over the caller's output buffer. Offset-based so traversal
/// rewinds are plain position resets.
pub(crate) struct NormBuf<'o> {
    buf: &'o mut [u8],
    pos: usize,
}

impl<'o> NormBuf<'o> {
    pub(crate) fn new(buf: &'o mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub(crate) fn in_bounds(&self) -> bool {
        self.pos < self.buf.len()
    }

    /// Whether the position `offset` bytes ahead is still writable.
    pub(crate) fn in_bounds_at(&self, offset: usize) -> bool {
        self.pos + offset < self.buf.len()
    }

    /// Callers check bounds first, same as the read side.
    pub(crate) fn push(&mut self, byte: u8) {
        self.buf[self.pos] = byte;
        self.pos += 1;
    }
}

/// Directory bookkeeping for one normalization call: output offsets of the
/// directory separators written so far, and where the query string began.
pub(crate) struct UriNormState {
    dirs: SmallVec<[usize; 8]>,
    param: Option<usize>,
}

impl UriNormState {
    pub(crate) fn new() -> Self {
        Self {
            dirs: SmallVec::new(),
            param: None,
        }
    }

    pub(crate) fn in_param(&self) -> bool {
        self.param.is_some()
    }

    pub(crate) fn no_dirs(&self) -> bool {
        self.dirs.is_empty()
    }

    /// The first `?` wins; later ones are ordinary bytes.
    pub(crate) fn mark_param(&mut self, pos: usize) {
        if self.param.is_none() {
            self.param = Some(pos);
        }
    }
}

/// What `dir_norm` found after a `/`.
pub(crate) enum DirOut {
    /// The next real byte of the path; the caller writes the slash and
    /// then this byte.
    Byte(u8),
    /// A confirmed `../`; the input cursor has been reset to its slash.
    Traversal,
    End,
}

/// Consume everything directory-shaped after a slash: runs of further
/// slashes, `./` self-references, and `../` traversals.
///
/// Traversal is confirmed by lookahead: `.`, `.`, `/` in decoded sequence.
/// On confirmation the cursor is rewound to the traversal's slash so the
/// driver re-enters through the normal slash path after unwinding the
/// output position. Failed lookahead rewinds to just after the first `.`
/// and lets it through as an ordinary dotfile byte.
pub(crate) fn dir_norm(dec: &mut UriDecoder<'_, '_>, state: &UriNormState) -> DirOut {
    loop {
        let byte = match dec.next_decoded(state.in_param()) {
            Decoded::End => return DirOut::End,
            Decoded::Byte(b) => b,
        };

        let after_byte = dec.pos();

        // '/' and '.' both sort below 0x30; anything at or above it cannot
        // be directory syntax.
        if byte < 0x30 {
            if dec.conf().multiple_slash.enabled && byte == b'/' {
                dec.alert(ClientEvent::MultiSlash);
                continue;
            }

            if dec.conf().directory.enabled && byte == b'.' && !state.in_param() {
                match dec.next_decoded(state.in_param()) {
                    Decoded::Byte(b'.') => {
                        let dir_mark = dec.pos();

                        if let Decoded::Byte(b'/') = dec.next_decoded(state.in_param()) {
                            dec.alert(ClientEvent::DirTraversal);
                            dec.seek(dir_mark);
                            return DirOut::Traversal;
                        }

                        // "..x": a segment that merely starts with dots.
                        dec.seek(after_byte);
                        return DirOut::Byte(byte);
                    }

                    Decoded::Byte(b'/') => {
                        dec.alert(ClientEvent::SelfDirTraversal);
                        continue;
                    }

                    _ => {
                        dec.seek(after_byte);
                        return DirOut::Byte(byte);
                    }
                }
            }
        }

        return DirOut::Byte(byte);
    }
}

/// Write a `/` and track it as a directory start, unless the query string
/// has begun or the stack is at its cap.
pub(crate) fn dir_set(state: &mut UriNormState, out: &mut NormBuf<'_>) {
    let pos = out.pos();
    out.push(b'/');

    if state.param.is_none() && state.dirs.len() < MAX_DIRS {
        state.dirs.push(pos);
    }
}

/// Unwind one directory: reset the write position to the most recent
/// separator and pop it, keeping the last entry in place so an underflowing
/// `../` run pins to the buffer start instead of wrapping.
pub(crate) fn dir_trav(state: &mut UriNormState, out: &mut NormBuf<'_>) {
    match state.dirs.last() {
        Some(&top) => {
            out.set_pos(top);
            if state.dirs.len() > 1 {
                state.dirs.pop();
            }
        }
        None => out.set_pos(0),
    }
}

/// Oversize-directory check: distance from the most recent separator to
/// the current write position, path section only.
pub(crate) fn check_long_dir(dec: &mut UriDecoder<'_, '_>, state: &UriNormState, pos: usize) {
    let threshold = dec.conf().long_dir;
    if threshold == 0 || state.param.is_some() {
        return;
    }

    if let Some(&last) = state.dirs.last()
        && pos - last > threshold
    {
        dec.alert(ClientEvent::OversizeDir);
    }
}
