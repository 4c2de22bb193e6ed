//! Deterministic synthetic identifiers.
//!
//! Tokens are windows over the lowercase alphabet: `a`..`z`, then `ab`, `bc`,
//! .., `yz`, `za`, then `abc`, .. and so on. Windows that run past `z` wrap to
//! the start of the alphabet. Within one run-length every token starts with a
//! different letter, and run-lengths never repeat, so a single generator
//! never yields the same token twice.

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone)]
pub struct IdentifierGenerator {
    /// Index of the next window's first letter, `None` before the first call
    cursor: Option<usize>,
    run_length: usize,
}

impl IdentifierGenerator {
    /// `min_length` below 1 is treated as 1.
    pub fn new(min_length: usize) -> Self {
        Self {
            cursor: None,
            run_length: min_length.max(1),
        }
    }

    pub fn next_name(&mut self) -> String {
        let cursor = match self.cursor {
            None => 0,
            Some(c) if c + 1 == ALPHABET.len() => {
                self.run_length += 1;
                0
            }
            Some(c) => c + 1,
        };
        self.cursor = Some(cursor);

        (0..self.run_length)
            .map(|offset| ALPHABET[(cursor + offset) % ALPHABET.len()] as char)
            .collect()
    }

    /// Next token for which `is_taken` returns false.
    pub fn next_free(&mut self, is_taken: impl Fn(&str) -> bool) -> String {
        loop {
            let name = self.next_name();
            if !is_taken(&name) {
                return name;
            }
        }
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Iterator for IdentifierGenerator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_name())
    }
}
