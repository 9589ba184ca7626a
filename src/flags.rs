//! Compile flags forwarded to the regex engine.

use bitflags::bitflags;
use regex::RegexBuilder;

bitflags! {
    /// Options applied when a raw expression is compiled into a rule.
    ///
    /// Flags only affect string-to-rule adaptation. Rules that are already
    /// compiled keep the flags they were built with.
    ///
    /// # Example
    ///
    /// ```
    /// use recompose::Flags;
    ///
    /// let flags = Flags::IGNORE_CASE | Flags::MULTI_LINE;
    /// assert!(flags.contains(Flags::IGNORE_CASE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// `(?i)`: case-insensitive matching.
        const IGNORE_CASE = 1 << 0;
        /// `(?m)`: `^` and `$` match at line boundaries.
        const MULTI_LINE = 1 << 1;
        /// `(?s)`: `.` also matches `\n`.
        const DOT_ALL = 1 << 2;
        /// `(?x)`: insignificant whitespace and `#` comments.
        const VERBOSE = 1 << 3;
        /// Disable Unicode: `\w`, `\d` and friends match ASCII only.
        const ASCII = 1 << 4;
    }
}

impl Flags {
    /// Parse a single-letter flag as used in inline groups and rule files
    /// (`i`, `m`, `s`, `x`, `a`).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'i' => Some(Flags::IGNORE_CASE),
            'm' => Some(Flags::MULTI_LINE),
            's' => Some(Flags::DOT_ALL),
            'x' => Some(Flags::VERBOSE),
            'a' => Some(Flags::ASCII),
            _ => None,
        }
    }

    /// Parse a flag word such as `"im"`; `None` if any letter is unknown.
    pub fn parse(word: &str) -> Option<Self> {
        word.chars()
            .try_fold(Flags::empty(), |acc, letter| Some(acc | Self::from_letter(letter)?))
    }

    pub(crate) fn builder(self, pattern: &str) -> RegexBuilder {
        let mut builder = RegexBuilder::new(pattern);
        builder
            .case_insensitive(self.contains(Flags::IGNORE_CASE))
            .multi_line(self.contains(Flags::MULTI_LINE))
            .dot_matches_new_line(self.contains(Flags::DOT_ALL))
            .ignore_whitespace(self.contains(Flags::VERBOSE))
            .unicode(!self.contains(Flags::ASCII));
        builder
    }
}
