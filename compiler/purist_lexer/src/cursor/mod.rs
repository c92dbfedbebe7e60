//! Character cursor that tracks source coordinates.
//!
//! The cursor is [`Copy`], so the scanner can snapshot it for lookahead and
//! simply discard the copy. Lines and columns are 1-based and columns count
//! characters. `\n`, `\r\n`, and a lone `\r` all end a line.

use purist_ir::SourcePos;

#[derive(Clone, Copy, Debug)]
pub struct Cursor<'src> {
    source: &'src str,
    pos: SourcePos,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Cursor {
            source,
            pos: SourcePos::START,
        }
    }

    #[inline]
    pub fn pos(&self) -> SourcePos {
        self.pos
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.pos.offset as usize
    }

    #[inline]
    fn rest(&self) -> &'src str {
        self.source.get(self.offset()..).unwrap_or("")
    }

    /// Current character, `None` at end of input.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Character `n` positions ahead of the current one.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    #[inline]
    pub fn starts_with(&self, text: &str) -> bool {
        self.rest().starts_with(text)
    }

    /// Consume one character, updating line and column.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.current()?;
        let width = u32::try_from(c.len_utf8()).unwrap_or(4);
        self.pos.offset += width;
        match c {
            '\n' => self.new_line(),
            '\r' if self.current() != Some('\n') => self.new_line(),
            // `\r\n` is one line break; the `\n` moves the line.
            '\r' => {}
            _ => self.pos.column += 1,
        }
        Some(c)
    }

    fn new_line(&mut self) {
        self.pos.line += 1;
        self.pos.column = 1;
    }

    /// Consume `text`, which must be what the cursor is looking at.
    pub fn bump_str(&mut self, text: &str) {
        for _ in text.chars() {
            self.bump();
        }
    }

    /// Consume characters while `pred` holds.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    /// Source text between `start` and the current position.
    pub fn slice_from(&self, start: SourcePos) -> &'src str {
        self.source
            .get(start.offset as usize..self.offset())
            .unwrap_or("")
    }
}
