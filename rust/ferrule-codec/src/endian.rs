//! Caller-selected byte order.

/// Byte order applied to a multi-byte value on the wire.
///
/// Every fixed-width operation takes the order explicitly; nothing in the
/// codec consults the host byte order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}
