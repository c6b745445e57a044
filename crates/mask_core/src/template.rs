//! Fixed-width mask templates.
//!
//! A template is a string of literal characters interleaved with digit
//! slots. Literals never change; each slot holds either one digit or the
//! blank placeholder.

use crate::text::is_mask_digit;
use std::fmt;

/// Character written into an unfilled digit slot.
pub const SLOT_PLACEHOLDER: char = ' ';

/// Character that marks a digit slot in a pattern string.
pub const PATTERN_SLOT: char = '#';

/// Pattern for a 10-digit US phone number without country code.
pub const US_PHONE_PATTERN: &str = "(###) ###-#### ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskTemplateError {
    Empty,
    NoSlots,
    /// A literal ASCII digit would be read back as user input.
    DigitLiteral {
        position: usize,
        ch: char,
    },
}

impl fmt::Display for MaskTemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskTemplateError::Empty => write!(f, "mask pattern is empty"),
            MaskTemplateError::NoSlots => {
                write!(f, "mask pattern has no '{PATTERN_SLOT}' digit slots")
            }
            MaskTemplateError::DigitLiteral { position, ch } => {
                write!(f, "mask pattern has digit literal {ch:?} at position {position}")
            }
        }
    }
}

impl std::error::Error for MaskTemplateError {}

/// A parsed mask: the blank template plus its slot layout.
///
/// Positions are character positions into the rendered value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskTemplate {
    chars: Vec<char>,
    blank: String,
    slots: Vec<usize>,
    special: Vec<usize>,
}

impl MaskTemplate {
    /// The `(XXX) XXX-XXXX` template: `"(   )    -     "`, 15 characters,
    /// slots `[1, 2, 3, 6, 7, 8, 10, 11, 12, 13]`.
    pub fn us_phone() -> Self {
        // The built-in pattern is a constant and always parses.
        match Self::from_pattern(US_PHONE_PATTERN) {
            Ok(t) => t,
            Err(err) => unreachable!("built-in US phone pattern is invalid: {err}"),
        }
    }

    /// Parse a pattern where `#` marks a digit slot and every other
    /// character is a literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use mask_core::MaskTemplate;
    ///
    /// let t = MaskTemplate::from_pattern("###-####").unwrap();
    /// assert_eq!(t.blank(), "   -    ");
    /// assert_eq!(t.slots(), &[0, 1, 2, 4, 5, 6, 7]);
    /// ```
    pub fn from_pattern(pattern: &str) -> Result<Self, MaskTemplateError> {
        if pattern.is_empty() {
            return Err(MaskTemplateError::Empty);
        }

        let mut chars = Vec::with_capacity(pattern.len());
        let mut slots = Vec::new();
        for (position, ch) in pattern.chars().enumerate() {
            if ch == PATTERN_SLOT {
                slots.push(position);
                chars.push(SLOT_PLACEHOLDER);
            } else if is_mask_digit(ch) {
                return Err(MaskTemplateError::DigitLiteral { position, ch });
            } else {
                chars.push(ch);
            }
        }

        let Some(&last_slot) = slots.last() else {
            return Err(MaskTemplateError::NoSlots);
        };

        // Literals left of the last slot are the ones a backspace can land on
        // while digits remain to their left.
        let special = (0..last_slot)
            .filter(|pos| slots.binary_search(pos).is_err())
            .collect();

        Ok(Self {
            blank: chars.iter().collect(),
            chars,
            slots,
            special,
        })
    }

    /// Length of the rendered value in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Templates always contain at least one slot, so never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The template with every slot blank.
    #[inline]
    pub fn blank(&self) -> &str {
        &self.blank
    }

    /// Digit slot positions, left to right.
    #[inline]
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn first_slot(&self) -> usize {
        self.slots[0]
    }

    /// Literal positions a caret can sit on when backspacing over punctuation.
    ///
    /// For the US phone template this is `[0, 4, 5, 9]`.
    #[inline]
    pub fn special_positions(&self) -> &[usize] {
        &self.special
    }

    #[inline]
    pub fn is_special(&self, pos: usize) -> bool {
        self.special.binary_search(&pos).is_ok()
    }

    #[inline]
    pub fn is_slot(&self, pos: usize) -> bool {
        self.slots.binary_search(&pos).is_ok()
    }

    /// The literal character at `pos`, or `None` for slots and positions
    /// past the end.
    pub fn literal_at(&self, pos: usize) -> Option<char> {
        if self.is_slot(pos) {
            return None;
        }
        self.chars.get(pos).copied()
    }

    /// Closest slot strictly left of `pos`.
    pub fn prev_slot_before(&self, pos: usize) -> Option<usize> {
        self.slots.iter().rev().copied().find(|&slot| slot < pos)
    }

    /// First slot at or right of `pos`.
    pub fn next_slot_at_or_after(&self, pos: usize) -> Option<usize> {
        self.slots.iter().copied().find(|&slot| slot >= pos)
    }

    /// Render `digits` into a fresh copy of the template.
    ///
    /// Digit `i` lands in slot `i`; surplus digits are dropped and
    /// unfilled slots stay blank. Callers pass digit-only strings.
    pub fn render(&self, digits: &str) -> String {
        let mut out = self.chars.clone();
        for (&slot, digit) in self.slots.iter().zip(digits.chars()) {
            out[slot] = digit;
        }
        out.into_iter().collect()
    }
}

impl Default for MaskTemplate {
    fn default() -> Self {
        Self::us_phone()
    }
}
