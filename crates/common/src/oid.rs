//! ASN.1 object identifiers.

use std::fmt;

/// Arcs of the secp256k1 named curve, `1.3.132.0.10`.
pub const SECP256K1_ARCS: [u64; 5] = [1, 3, 132, 0, 10];

/// An object identifier as its list of arcs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier(Vec<u64>);

impl ObjectIdentifier {
    #[must_use]
    pub fn new(arcs: Vec<u64>) -> Self {
        Self(arcs)
    }

    /// The curve identifier every loaded key must carry.
    #[must_use]
    pub fn secp256k1() -> Self {
        Self(SECP256K1_ARCS.to_vec())
    }

    #[must_use]
    pub fn arcs(&self) -> &[u64] {
        &self.0
    }

    /// Splits the first encoded sub-identifier into the first two arcs
    /// (X.690 §8.19.4).
    #[must_use]
    pub fn split_first_subidentifier(value: u64) -> (u64, u64) {
        let first = if value < 80 { value / 40 } else { 2 };
        (first, value - 40 * first)
    }
}

impl PartialEq<[u64]> for ObjectIdentifier {
    fn eq(&self, other: &[u64]) -> bool {
        self.0 == other
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut arcs = self.0.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{first}")?;
            for arc in arcs {
                write!(f, ".{arc}")?;
            }
        }
        Ok(())
    }
}
