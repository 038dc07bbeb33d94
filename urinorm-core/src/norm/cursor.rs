/// Index cursor over the borrowed input buffer.
///
/// `idx` designates the byte currently under inspection. Layered decode
/// routines advance it as they consume digits, and lookahead that fails
/// rewinds by seeking back to a saved position; each completed top-level
/// fetch leaves it on the next unread byte.
pub(crate) struct Cursor<'i> {
    buf: &'i [u8],
    idx: usize,
}

impl<'i> Cursor<'i> {
    pub(crate) fn new(buf: &'i [u8]) -> Self {
        Self { buf, idx: 0 }
    }

    pub(crate) fn in_bounds(&self) -> bool {
        self.idx < self.buf.len()
    }

    /// Whether the byte `offset` positions ahead of the current one exists.
    pub(crate) fn in_bounds_at(&self, offset: usize) -> bool {
        self.idx + offset < self.buf.len()
    }

    /// The byte under the cursor. Callers check `in_bounds` first.
    pub(crate) fn current(&self) -> u8 {
        self.buf[self.idx]
    }

    pub(crate) fn peek(&self, offset: usize) -> u8 {
        self.buf[self.idx + offset]
    }

    pub(crate) fn advance(&mut self) {
        self.idx += 1;
    }

    pub(crate) fn pos(&self) -> usize {
        self.idx
    }

    pub(crate) fn seek(&mut self, pos: usize) {
        self.idx = pos;
    }
}
