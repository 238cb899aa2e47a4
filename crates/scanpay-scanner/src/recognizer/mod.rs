//! Per-category recognizers.
//!
//! Each category has an action enum whose variants are the things a caller
//! can ask for once a payload of that category is seen. All of them follow
//! the same shape: a cheap structural test decides whether the payload is
//! claimed at all, and only a claimed payload is decoded and acted upon.
//! Once claimed, a decode failure is reported as an error outcome rather
//! than handed to the next category.

mod address;
mod bitid;
mod key;
mod seed;
mod share;
mod uri;
mod website;

pub use address::AddressAction;
pub use bitid::BitIdAction;
pub use key::PrivateKeyAction;
pub use seed::MasterSeedAction;
pub use share::SecretShareAction;
pub use uri::BitcoinUriAction;
pub use website::WebsiteAction;

use crate::category::Category;
use crate::context::ScanContext;
use crate::error::Result;
use crate::outcome::Outcome;

/// Decides whether a payload belongs to one category and acts on it.
pub trait Recognizer: Send + Sync {
    /// Category this recognizer claims payloads for.
    fn category(&self) -> Category;

    /// Offer `payload` to this recognizer.
    ///
    /// # Errors
    /// Only when the wallet's own stored material cannot be used. Malformed
    /// input is an [`Outcome::CompletedWithError`].
    fn attempt(&self, payload: &str, context: &ScanContext) -> Result<Outcome>;
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
