//! Length-preserving case conversion.
//!
//! The std case mappings may expand one character into several ("ß" to
//! "SS", the ligatures, some Greek forms). The text buffer folds case in
//! place, one unit per unit, so this fold keeps any character whose
//! mapping would change the unit count.

pub trait CharCaseFold {
    /// Uppercase form when the mapping is one-to-one, `self` otherwise.
    fn to_uppercase_single(self) -> Self;

    /// Lowercase form when the mapping is one-to-one, `self` otherwise.
    fn to_lowercase_single(self) -> Self;
}

impl CharCaseFold for char {
    fn to_uppercase_single(self) -> char {
        let mut mapped = self.to_uppercase();
        match (mapped.next(), mapped.next()) {
            (Some(upper), None) => upper,
            _ => self,
        }
    }

    fn to_lowercase_single(self) -> char {
        let mut mapped = self.to_lowercase();
        match (mapped.next(), mapped.next()) {
            (Some(lower), None) => lower,
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_mappings() {
        assert_eq!('a'.to_uppercase_single(), 'A');
        assert_eq!('Z'.to_lowercase_single(), 'z');
        assert_eq!('é'.to_uppercase_single(), 'É');
        assert_eq!('Σ'.to_lowercase_single(), 'σ');
    }

    #[test]
    fn test_uncased_characters_pass_through() {
        for c in ['7', ' ', '-', '中', '🎉'] {
            assert_eq!(c.to_uppercase_single(), c);
            assert_eq!(c.to_lowercase_single(), c);
        }
    }

    #[test]
    fn test_expanding_mappings_are_skipped() {
        // "ß".to_uppercase() is "SS"; the fold keeps the original unit.
        assert_eq!('ß'.to_uppercase_single(), 'ß');
        // U+0130 lowercases to "i" plus a combining dot.
        assert_eq!('İ'.to_lowercase_single(), 'İ');
        assert_eq!('ﬁ'.to_uppercase_single(), 'ﬁ');
    }
}
