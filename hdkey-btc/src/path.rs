//! Child indices and BIP-32 derivation paths.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use hdkey::Error;

/// Child key index for BIP-32 derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChildIndex {
    /// Normal (non-hardened) derivation: 0 to 2^31 - 1
    Normal(u32),
    /// Hardened derivation: 2^31 to 2^32 - 1, stored without the offset
    Hardened(u32),
}

impl ChildIndex {
    /// Hardened index offset (2^31)
    pub const HARDENED_OFFSET: u32 = 0x8000_0000;

    /// Create a normal child index.
    pub const fn normal(index: u32) -> Self {
        Self::Normal(index)
    }

    /// Create a hardened child index.
    pub const fn hardened(index: u32) -> Self {
        Self::Hardened(index)
    }

    /// Create from an index and a hardened flag.
    pub const fn new(index: u32, hardened: bool) -> Self {
        if hardened {
            Self::Hardened(index)
        } else {
            Self::Normal(index)
        }
    }

    /// The index without the hardened offset.
    pub const fn value(&self) -> u32 {
        match self {
            Self::Normal(i) | Self::Hardened(i) => *i,
        }
    }

    /// Convert to the raw u32 value used in derivation.
    pub const fn to_u32(&self) -> u32 {
        match self {
            Self::Normal(i) => *i,
            Self::Hardened(i) => *i | Self::HARDENED_OFFSET,
        }
    }

    /// Check if this is a hardened index.
    pub const fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /// Fail with [`Error::IndexTooLarge`] unless the index fits below 2^31.
    pub(crate) fn check(self) -> Result<Self, Error> {
        if self.value() >= Self::HARDENED_OFFSET {
            Err(Error::IndexTooLarge(self.value()))
        } else {
            Ok(self)
        }
    }
}

impl From<u32> for ChildIndex {
    fn from(value: u32) -> Self {
        if value >= Self::HARDENED_OFFSET {
            Self::Hardened(value & !Self::HARDENED_OFFSET)
        } else {
            Self::Normal(value)
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(i) => write!(f, "{i}"),
            Self::Hardened(i) => write!(f, "{i}H"),
        }
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    /// Parse `<digits>` or `<digits>H` (either case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || Error::MalformedPath(s.to_string());

        let (digits, hardened) = match s.strip_suffix(['H', 'h']) {
            Some(digits) => (digits, true),
            None => (s, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let index: u32 = digits.parse().map_err(|_| malformed())?;
        ChildIndex::new(index, hardened)
            .check()
            .map_err(|_| malformed())
    }
}

/// A BIP-32 derivation path such as `m/44H/0H/0H/0/1`.
///
/// Text form follows `m(/<digits>[H])*` where the hardened marker may be
/// `H` or `h`. Display always renders an uppercase `H`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<ChildIndex>,
}

impl DerivationPath {
    /// The empty path `m`.
    pub const fn master() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    /// Number of derivation steps.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether this is the master path `m`.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the child indices in order.
    pub fn iter(&self) -> core::slice::Iter<'_, ChildIndex> {
        self.indices.iter()
    }

    /// Append one step, returning the extended path.
    pub fn child(mut self, index: ChildIndex) -> Self {
        self.indices.push(index);
        self
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split('/');
        if segments.next() != Some("m") {
            return Err(Error::MalformedPath(s.to_string()));
        }

        let indices = segments
            .map(|segment| {
                segment
                    .parse::<ChildIndex>()
                    .map_err(|_| Error::MalformedPath(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { indices })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.indices {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl From<Vec<ChildIndex>> for DerivationPath {
    fn from(indices: Vec<ChildIndex>) -> Self {
        Self { indices }
    }
}

impl AsRef<[ChildIndex]> for DerivationPath {
    fn as_ref(&self) -> &[ChildIndex] {
        &self.indices
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildIndex;
    type IntoIter = core::slice::Iter<'a, ChildIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_child_index_to_u32() {
        assert_eq!(ChildIndex::Normal(5).to_u32(), 5);
        assert_eq!(ChildIndex::Hardened(0).to_u32(), 0x8000_0000);
        assert_eq!(ChildIndex::Hardened(44).to_u32(), 0x8000_002c);
    }

    #[test]
    fn test_child_index_from_u32() {
        assert_eq!(ChildIndex::from(7), ChildIndex::Normal(7));
        assert_eq!(ChildIndex::from(0x8000_0007), ChildIndex::Hardened(7));
        assert_eq!(ChildIndex::from(u32::MAX), ChildIndex::Hardened(0x7fff_ffff));
    }

    #[test]
    fn test_child_index_check() {
        assert!(ChildIndex::Normal(0x7fff_ffff).check().is_ok());
        assert_eq!(
            ChildIndex::Hardened(0x8000_0000).check(),
            Err(Error::IndexTooLarge(0x8000_0000))
        );
    }

    #[test]
    fn test_parse_path() {
        let path: DerivationPath = "m/44H/0h/0H/0/1".parse().unwrap();
        assert_eq!(
            path.as_ref(),
            &[
                ChildIndex::Hardened(44),
                ChildIndex::Hardened(0),
                ChildIndex::Hardened(0),
                ChildIndex::Normal(0),
                ChildIndex::Normal(1),
            ]
        );
        assert_eq!(path.to_string(), "m/44H/0H/0H/0/1");
    }

    #[test]
    fn test_parse_master() {
        let path: DerivationPath = "m".parse().unwrap();
        assert!(path.is_empty());
        assert_eq!(path, DerivationPath::master());
        assert_eq!(path.to_string(), "m");
    }

    #[test]
    fn test_parse_max_index() {
        let path: DerivationPath = "m/2147483647H/2147483647".parse().unwrap();
        assert_eq!(
            path.as_ref(),
            &[
                ChildIndex::Hardened(0x7fff_ffff),
                ChildIndex::Normal(0x7fff_ffff)
            ]
        );
    }

    #[test]
    fn test_parse_malformed() {
        let cases = [
            "",
            "M",
            "m/",
            "m//1",
            "0/1",
            "/0",
            "m/0'",
            "m/H",
            "m/1HH",
            "m/-1",
            "m/+1",
            "m/ 1",
            "m/0x10",
            "m/2147483648",
            "m/2147483648H",
            "m/99999999999",
            "n/0",
        ];
        for case in cases {
            assert_eq!(
                case.parse::<DerivationPath>(),
                Err(Error::MalformedPath(case.to_string())),
                "{case:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_path_builder() {
        let path = DerivationPath::master()
            .child(ChildIndex::hardened(44))
            .child(ChildIndex::normal(3));
        assert_eq!(path.len(), 2);
        assert_eq!(path.to_string(), "m/44H/3");
        assert_eq!(
            DerivationPath::from(vec![ChildIndex::Normal(1)]).to_string(),
            "m/1"
        );
    }
}
