//! Block padding arithmetic.
//!
//! These helpers reason about lengths in fixed-size blocks, as used when
//! aligning stream output or sizing block-structured payloads. A `block`
//! of zero means no blocking is in effect: lengths pass through unchanged
//! and no padding is required.

/// Rounds `len` up to the next multiple of `block`.
pub fn padded_len(len: u64, block: u64) -> u64 {
    len + padding_len(len, block)
}

/// Returns how many bytes of padding take `len` to a multiple of `block`.
pub fn padding_len(len: u64, block: u64) -> u64 {
    if block == 0 {
        return 0;
    }
    let rem = len % block;
    if rem == 0 { 0 } else { block - rem }
}

/// Returns how many whole blocks cover `len`.
pub fn block_count(len: u64, block: u64) -> u64 {
    if block == 0 {
        return 0;
    }
    padded_len(len, block) / block
}

/// Rounds `padded` down to the previous multiple of `block`.
pub fn unpadded_len(padded: u64, block: u64) -> u64 {
    if block == 0 {
        return padded;
    }
    padded - padded % block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_round_up() {
        assert_eq!(padded_len(0, 4), 0);
        assert_eq!(padded_len(1, 4), 4);
        assert_eq!(padded_len(4, 4), 4);
        assert_eq!(padded_len(5, 4), 8);
        assert_eq!(padding_len(10, 4), 2);
        assert_eq!(padding_len(12, 4), 0);
    }

    #[test]
    fn test_block_count() {
        assert_eq!(block_count(0, 16), 0);
        assert_eq!(block_count(1, 16), 1);
        assert_eq!(block_count(16, 16), 1);
        assert_eq!(block_count(17, 16), 2);
    }

    #[test]
    fn test_round_down() {
        assert_eq!(unpadded_len(10, 4), 8);
        assert_eq!(unpadded_len(12, 4), 12);
        assert_eq!(unpadded_len(3, 4), 0);
    }

    #[test]
    fn test_zero_block_passes_through() {
        assert_eq!(padded_len(37, 0), 37);
        assert_eq!(padding_len(37, 0), 0);
        assert_eq!(block_count(37, 0), 0);
        assert_eq!(unpadded_len(37, 0), 37);
    }
}
