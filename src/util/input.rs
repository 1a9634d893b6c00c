/// Single-line text field with a char-indexed cursor, shared by the login,
/// comment, reassignment, and creation forms.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    value: String,
    cursor: usize,
}

impl InputField {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        let byte_idx = self.byte_index();
        self.value.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let byte_idx = self.byte_index();
        self.value.remove(byte_idx);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_at_cursor() {
        let mut field = InputField::default();
        for c in "DEMO".chars() {
            field.insert(c);
        }
        field.move_left();
        field.move_left();
        field.insert('X');
        assert_eq!(field.value(), "DEXMO");
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut field = InputField::with_value("abc");
        field.backspace();
        assert_eq!(field.value(), "ab");
        field.move_left();
        field.move_left();
        field.backspace();
        assert_eq!(field.value(), "ab");
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn handles_multibyte_chars() {
        let mut field = InputField::with_value("로그인");
        assert_eq!(field.cursor(), 3);
        field.backspace();
        assert_eq!(field.value(), "로그");
        field.insert('!');
        assert_eq!(field.value(), "로그!");
    }

    #[test]
    fn clear_resets_the_field() {
        let mut field = InputField::with_value("a comment");
        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut field = InputField::with_value("ab");
        field.move_right();
        field.move_right();
        assert_eq!(field.cursor(), 2);
        field.move_left();
        field.move_left();
        field.move_left();
        assert_eq!(field.cursor(), 0);
    }
}
