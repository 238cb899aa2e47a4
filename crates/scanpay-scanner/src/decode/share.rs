use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Marker every scanned secret share starts with.
pub const SSS_PREFIX: &str = "SSS";

const HEADER_LENGTH: usize = 6;

/// One share of a Shamir-split secret.
///
/// Encoded as [`SSS_PREFIX`] followed by hex of
/// `[threshold][index][set id: 4 bytes][share data...]`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretShare {
    threshold: u8,
    index: u8,
    set_id: [u8; 4],
    data: Vec<u8>,
}

impl SecretShare {
    /// Parse a share from its scanned text.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let body = text.strip_prefix(SSS_PREFIX)?;
        let bytes = Zeroizing::new(hex::decode(body).ok()?);
        if bytes.len() <= HEADER_LENGTH {
            return None;
        }

        let threshold = bytes[0];
        let index = bytes[1];
        if threshold < 2 || index == 0 {
            return None;
        }

        let mut set_id = [0u8; 4];
        set_id.copy_from_slice(&bytes[2..HEADER_LENGTH]);

        Some(Self {
            threshold,
            index,
            set_id,
            data: bytes[HEADER_LENGTH..].to_vec(),
        })
    }

    /// Number of shares needed to rebuild the secret.
    #[must_use]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Position of this share in its set, starting at 1.
    #[must_use]
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Identifier shared by all shares of one secret.
    #[must_use]
    pub fn set_id(&self) -> [u8; 4] {
        self.set_id
    }

    /// Raw share bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether `other` belongs to the same split secret.
    #[must_use]
    pub fn same_set(&self, other: &Self) -> bool {
        self.set_id == other.set_id && self.threshold == other.threshold
    }

    /// Text form, as accepted by [`SecretShare::parse`].
    #[must_use]
    pub fn to_payload(&self) -> Zeroizing<String> {
        let mut bytes = Zeroizing::new(Vec::with_capacity(HEADER_LENGTH + self.data.len()));
        bytes.push(self.threshold);
        bytes.push(self.index);
        bytes.extend_from_slice(&self.set_id);
        bytes.extend_from_slice(&self.data);
        Zeroizing::new(format!("{SSS_PREFIX}{}", hex::encode(bytes.as_slice())))
    }
}

impl fmt::Debug for SecretShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretShare")
            .field("threshold", &self.threshold)
            .field("index", &self.index)
            .field("set_id", &hex::encode(self.set_id))
            .field("data", &"[REDACTED]")
            .finish()
    }
}
