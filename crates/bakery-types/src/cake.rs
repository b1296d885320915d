use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;
use crate::hasher::CakeHasher;

/// Size of a cake digest in bytes (BLAKE3 output).
pub const DIGEST_SIZE: usize = 32;

/// What the hashed payload represents.
///
/// Variant order is significant: it matches the ordering of the kind labels
/// in the canonical string (`blob` < `folder`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CakeKind {
    /// Opaque leaf content.
    Blob,
    /// Canonical serialization of a rack.
    Folder,
}

impl CakeKind {
    /// Label used in the canonical string encoding.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Folder => "folder",
        }
    }

    /// Single byte used in the binary encoding.
    pub fn code(&self) -> u8 {
        match self {
            Self::Blob => 0,
            Self::Folder => 1,
        }
    }

    fn from_label(label: &str) -> Result<Self, ParseError> {
        match label {
            "blob" => Ok(Self::Blob),
            "folder" => Ok(Self::Folder),
            other => Err(ParseError::UnknownKind(other.to_string())),
        }
    }

    fn from_code(code: u8) -> Result<Self, ParseError> {
        match code {
            0 => Ok(Self::Blob),
            1 => Ok(Self::Folder),
            other => Err(ParseError::UnknownKind(format!("code {other}"))),
        }
    }
}

impl fmt::Display for CakeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Content address key.
///
/// A `Cake` is the BLAKE3 digest of a payload tagged with the payload's
/// [`CakeKind`]. Two cakes are equal iff both digest and kind match.
///
/// The canonical string form is `<kind>:<hex digest>`, e.g.
/// `blob:af1349b9...`. Ordering follows that string: kind first, then digest
/// bytes (lowercase hex preserves byte order).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cake {
    kind: CakeKind,
    digest: [u8; DIGEST_SIZE],
}

impl Cake {
    /// Hash `payload` and tag the digest with `kind`.
    pub fn from_bytes(payload: &[u8], kind: CakeKind) -> Self {
        let mut hasher = CakeHasher::new(kind);
        hasher.update(payload);
        hasher.finalize()
    }

    /// Stream everything from `reader` through the hasher.
    pub fn from_reader<R: Read>(mut reader: R, kind: CakeKind) -> std::io::Result<Self> {
        let mut hasher = CakeHasher::new(kind);
        std::io::copy(&mut reader, &mut hasher)?;
        Ok(hasher.finalize())
    }

    /// Create a cake from a pre-computed digest.
    pub const fn from_digest(digest: [u8; DIGEST_SIZE], kind: CakeKind) -> Self {
        Self { kind, digest }
    }

    /// The cake of the empty payload, tagged as a blob.
    pub fn null() -> Self {
        Self::from_bytes(b"", CakeKind::Blob)
    }

    /// Parse the canonical `<kind>:<hex>` encoding.
    ///
    /// Only lowercase hex is accepted, so every cake has exactly one string
    /// form.
    pub fn parse(encoded: &str) -> Result<Self, ParseError> {
        let (label, hex_digest) = encoded
            .split_once(':')
            .ok_or_else(|| ParseError::MissingKind(encoded.to_string()))?;
        let kind = CakeKind::from_label(label)?;
        if let Some(bad) = hex_digest
            .chars()
            .find(|c| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(ParseError::InvalidHex(format!(
                "invalid character {bad:?}, expected lowercase hex"
            )));
        }
        let bytes = hex::decode(hex_digest).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
        let digest = digest_from_slice(&bytes)?;
        Ok(Self { kind, digest })
    }

    /// Decode the 33-byte binary form produced by [`Cake::to_bytes`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        match bytes.split_last() {
            Some((code, digest)) if bytes.len() == DIGEST_SIZE + 1 => Ok(Self {
                kind: CakeKind::from_code(*code)?,
                digest: digest_from_slice(digest)?,
            }),
            _ => Err(ParseError::InvalidLength {
                expected: DIGEST_SIZE + 1,
                actual: bytes.len(),
            }),
        }
    }

    /// Binary form: digest followed by the kind code.
    pub fn to_bytes(&self) -> [u8; DIGEST_SIZE + 1] {
        let mut out = [0u8; DIGEST_SIZE + 1];
        out[..DIGEST_SIZE].copy_from_slice(&self.digest);
        out[DIGEST_SIZE] = self.kind.code();
        out
    }

    pub fn kind(&self) -> CakeKind {
        self.kind
    }

    /// The raw 32-byte digest.
    pub fn digest(&self) -> &[u8; DIGEST_SIZE] {
        &self.digest
    }

    pub fn is_folder(&self) -> bool {
        match self.kind {
            CakeKind::Folder => true,
            CakeKind::Blob => false,
        }
    }

    pub fn is_blob(&self) -> bool {
        !self.is_folder()
    }

    /// Short hex representation (first 8 characters of the digest).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.digest[..4])
    }
}

fn digest_from_slice(bytes: &[u8]) -> Result<[u8; DIGEST_SIZE], ParseError> {
    <[u8; DIGEST_SIZE]>::try_from(bytes).map_err(|_| ParseError::InvalidLength {
        expected: DIGEST_SIZE,
        actual: bytes.len(),
    })
}

impl fmt::Debug for Cake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cake({}:{})", self.kind, self.short_hex())
    }
}

impl fmt::Display for Cake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, hex::encode(self.digest))
    }
}

impl FromStr for Cake {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Cake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::parse(&encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &[u8] = b"The quick brown fox jumps over";

    #[test]
    fn from_bytes_is_deterministic() {
        let c1 = Cake::from_bytes(FOX, CakeKind::Blob);
        let c2 = Cake::from_bytes(FOX, CakeKind::Blob);
        assert_eq!(c1, c2);
    }

    #[test]
    fn different_data_produces_different_cakes() {
        let c1 = Cake::from_bytes(b"hello", CakeKind::Blob);
        let c2 = Cake::from_bytes(b"world", CakeKind::Blob);
        assert_ne!(c1, c2);
    }

    #[test]
    fn kind_is_part_of_identity() {
        let blob = Cake::from_bytes(FOX, CakeKind::Blob);
        let folder = Cake::from_bytes(FOX, CakeKind::Folder);
        assert_eq!(blob.digest(), folder.digest());
        assert_ne!(blob, folder);
        assert!(folder.is_folder());
        assert!(blob.is_blob());
    }

    #[test]
    fn digest_is_plain_blake3() {
        let cake = Cake::from_bytes(FOX, CakeKind::Blob);
        assert_eq!(cake.digest(), blake3::hash(FOX).as_bytes());
    }

    #[test]
    fn string_roundtrip() {
        for kind in [CakeKind::Blob, CakeKind::Folder] {
            let cake = Cake::from_bytes(FOX, kind);
            let parsed = Cake::parse(&cake.to_string()).unwrap();
            assert_eq!(cake, parsed);
        }
    }

    #[test]
    fn display_format() {
        let cake = Cake::from_bytes(FOX, CakeKind::Folder);
        let s = cake.to_string();
        assert!(s.starts_with("folder:"));
        assert_eq!(s.len(), "folder:".len() + 64);
        assert_eq!(format!("{cake:?}"), format!("Cake(folder:{})", cake.short_hex()));
    }

    #[test]
    fn parse_rejects_malformed() {
        let hex64 = "ab".repeat(32);
        assert!(matches!(
            Cake::parse(&hex64),
            Err(ParseError::MissingKind(_))
        ));
        assert!(matches!(
            Cake::parse(&format!("tree:{hex64}")),
            Err(ParseError::UnknownKind(_))
        ));
        assert!(matches!(
            Cake::parse(&format!("blob:{}", "zz".repeat(32))),
            Err(ParseError::InvalidHex(_))
        ));
        assert!(matches!(
            Cake::parse(&format!("blob:{}", "AB".repeat(32))),
            Err(ParseError::InvalidHex(_))
        ));
        assert_eq!(
            Cake::parse("blob:abcd"),
            Err(ParseError::InvalidLength {
                expected: 32,
                actual: 2
            })
        );
    }

    #[test]
    fn parse_rejects_uppercase_hex() {
        let cake = Cake::from_bytes(FOX, CakeKind::Blob);
        let upper = format!("blob:{}", hex::encode_upper(cake.digest()));
        assert!(matches!(Cake::parse(&upper), Err(ParseError::InvalidHex(_))));

        let mixed = format!("blob:A{}", &cake.to_string()["blob:".len() + 1..]);
        assert!(matches!(Cake::parse(&mixed), Err(ParseError::InvalidHex(_))));
    }

    #[test]
    fn binary_roundtrip() {
        let cake = Cake::from_bytes(FOX, CakeKind::Folder);
        let bytes = cake.to_bytes();
        assert_eq!(bytes[32], 1);
        assert_eq!(Cake::from_slice(&bytes).unwrap(), cake);
    }

    #[test]
    fn from_slice_rejects_bad_input() {
        assert!(matches!(
            Cake::from_slice(&[0u8; 10]),
            Err(ParseError::InvalidLength { expected: 33, actual: 10 })
        ));
        let mut bytes = Cake::null().to_bytes();
        bytes[32] = 9;
        assert!(matches!(
            Cake::from_slice(&bytes),
            Err(ParseError::UnknownKind(_))
        ));
    }

    #[test]
    fn from_reader_matches_from_bytes() {
        let data = vec![7u8; 100_000];
        let streamed = Cake::from_reader(&data[..], CakeKind::Blob).unwrap();
        assert_eq!(streamed, Cake::from_bytes(&data, CakeKind::Blob));
    }

    #[test]
    fn null_is_empty_blob() {
        assert_eq!(Cake::null(), Cake::from_bytes(b"", CakeKind::Blob));
        assert!(Cake::null().is_blob());
    }

    #[test]
    fn ordering_matches_canonical_string() {
        let mut cakes = vec![
            Cake::from_digest([9; 32], CakeKind::Blob),
            Cake::from_digest([0; 32], CakeKind::Folder),
            Cake::from_digest([1; 32], CakeKind::Blob),
            Cake::from_digest([0xff; 32], CakeKind::Folder),
        ];
        let mut by_string = cakes.clone();
        cakes.sort();
        by_string.sort_by_key(|c| c.to_string());
        assert_eq!(cakes, by_string);
    }

    #[test]
    fn serde_roundtrip() {
        let cake = Cake::from_bytes(b"serde test", CakeKind::Blob);
        let json = serde_json::to_string(&cake).unwrap();
        assert_eq!(json, format!("\"{cake}\""));
        let parsed: Cake = serde_json::from_str(&json).unwrap();
        assert_eq!(cake, parsed);
    }

    #[test]
    fn serde_rejects_bad_string() {
        let err = serde_json::from_str::<Cake>("\"blob:xyz\"");
        assert!(err.is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parse_inverts_display(digest in any::<[u8; 32]>(), folder in any::<bool>()) {
                let kind = if folder { CakeKind::Folder } else { CakeKind::Blob };
                let cake = Cake::from_digest(digest, kind);
                prop_assert_eq!(Cake::parse(&cake.to_string()).unwrap(), cake);
                prop_assert_eq!(Cake::from_slice(&cake.to_bytes()).unwrap(), cake);
            }
        }
    }
}
