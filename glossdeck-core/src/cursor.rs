/// Cursor state over one paragraph's visible text.
///
/// Tracks a (row, col) position and translates it to and from character
/// offsets into the raw text. Rows and columns are counted in characters,
/// so the offsets line up with `TextRange` regardless of byte widths.
#[derive(Debug, Clone)]
pub struct CursorState {
    /// Current cursor position (row, col)
    pub row: usize,
    pub col: usize,
    /// Character offset of each line's first character
    line_starts: Vec<usize>,
    /// Lines of content
    lines: Vec<String>,
    /// Total character count of the content
    char_len: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            row: 0,
            col: 0,
            line_starts: vec![0],
            lines: Vec::new(),
            char_len: 0,
        }
    }

    /// Load content and compute line offsets
    pub fn set_content(&mut self, content: &str) {
        self.lines = content.lines().map(String::from).collect();
        self.line_starts.clear();
        self.line_starts.push(0);

        let mut offset = 0;
        for ch in content.chars() {
            offset += 1;
            if ch == '\n' {
                self.line_starts.push(offset);
            }
        }
        self.char_len = offset;

        self.row = 0;
        self.col = 0;
    }

    /// Get current cursor position as (row, col)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Character offset of the current cursor position
    pub fn offset(&self) -> usize {
        self.cursor_to_offset(self.row, self.col)
    }

    /// Convert (row, col) to character offset
    pub fn cursor_to_offset(&self, row: usize, col: usize) -> usize {
        match self.line_starts.get(row) {
            Some(start) => {
                let line_len = self.line_len(row);
                (start + col.min(line_len)).min(self.char_len)
            }
            None => self.char_len,
        }
    }

    /// Convert character offset to (row, col)
    pub fn offset_to_cursor(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.char_len);
        for (i, &start) in self.line_starts.iter().enumerate().rev() {
            if offset >= start {
                return (i, (offset - start).min(self.line_len(i)));
            }
        }
        (0, 0)
    }

    /// Set cursor to character offset
    pub fn set_offset(&mut self, offset: usize) {
        let (row, col) = self.offset_to_cursor(offset);
        self.row = row;
        self.col = col;
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|s| s.as_str())
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|l| l.chars().count()).unwrap_or(0)
    }

    // Cursor movement methods

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            // Move to end of previous line
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            // Move to start of next line
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_to_start(&mut self) {
        self.col = 0;
    }

    pub fn move_to_end(&mut self) {
        self.col = self.line_len(self.row);
    }

    pub fn move_to_top(&mut self) {
        self.row = 0;
        self.col = 0;
    }

    pub fn move_to_bottom(&mut self) {
        if !self.lines.is_empty() {
            self.row = self.lines.len() - 1;
            self.col = 0;
        }
    }

    pub fn move_word_forward(&mut self) {
        if let Some(line) = self.lines.get(self.row) {
            let chars: Vec<char> = line.chars().collect();
            let mut col = self.col;

            // Skip current word (non-whitespace)
            while col < chars.len() && !chars[col].is_whitespace() {
                col += 1;
            }
            // Skip whitespace
            while col < chars.len() && chars[col].is_whitespace() {
                col += 1;
            }

            if col >= chars.len() && self.row + 1 < self.lines.len() {
                // Move to next line
                self.row += 1;
                self.col = 0;
            } else {
                self.col = col;
            }
        }
    }

    pub fn move_word_back(&mut self) {
        if self.col == 0 {
            if self.row > 0 {
                self.row -= 1;
                self.col = self.line_len(self.row);
            }
            return;
        }

        if let Some(line) = self.lines.get(self.row) {
            let chars: Vec<char> = line.chars().collect();
            let mut col = self.col;

            // Skip whitespace backwards
            while col > 0 && chars.get(col - 1).map(|c| c.is_whitespace()).unwrap_or(false) {
                col -= 1;
            }
            // Skip word backwards
            while col > 0 && chars.get(col - 1).map(|c| !c.is_whitespace()).unwrap_or(false) {
                col -= 1;
            }

            self.col = col;
        }
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}
