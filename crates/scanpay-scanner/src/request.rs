//! Scan requests: which categories a scan accepts and what each one does.

use crate::category::Category;
use crate::recognizer::{
    AddressAction, BitIdAction, BitcoinUriAction, MasterSeedAction, PrivateKeyAction, Recognizer,
    SecretShareAction, WebsiteAction,
};
use serde::{Deserialize, Serialize};

/// One optional action per category. A `None` slot never claims anything.
///
/// Requests are built from the presets below (or [`ScanPreset::build`]) and
/// are not changed afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    private_key: Option<PrivateKeyAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<AddressAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bitcoin_uri: Option<BitcoinUriAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bitid: Option<BitIdAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    website: Option<WebsiteAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    master_seed: Option<MasterSeedAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secret_share: Option<SecretShareAction>,
}

impl ScanRequest {
    /// Return a key, an address or a whole payment URI.
    #[must_use]
    pub fn return_key_or_address_or_uri() -> Self {
        Self {
            private_key: Some(PrivateKeyAction::Return),
            address: Some(AddressAction::Return),
            bitcoin_uri: Some(BitcoinUriAction::Return),
            ..Self::default()
        }
    }

    /// Return a key or an address; URIs contribute only their address.
    #[must_use]
    pub fn return_key_or_address() -> Self {
        Self {
            private_key: Some(PrivateKeyAction::Return),
            address: Some(AddressAction::Return),
            bitcoin_uri: Some(BitcoinUriAction::ReturnAddress),
            secret_share: Some(SecretShareAction::StartCombining),
            ..Self::default()
        }
    }

    /// Sweep or inspect funds held outside the wallet.
    #[must_use]
    pub fn spend_from_cold_storage() -> Self {
        Self {
            private_key: Some(PrivateKeyAction::ColdSpending),
            address: Some(AddressAction::CheckBalance),
            bitcoin_uri: Some(BitcoinUriAction::CheckBalance),
            secret_share: Some(SecretShareAction::StartCombining),
            ..Self::default()
        }
    }

    /// Fill in an address book entry.
    #[must_use]
    pub fn address_book_entry() -> Self {
        Self {
            private_key: Some(PrivateKeyAction::Return),
            address: Some(AddressAction::Return),
            bitcoin_uri: Some(BitcoinUriAction::ReturnAddress),
            ..Self::default()
        }
    }

    /// The main scan button: pay, log in, open links, sweep keys.
    #[must_use]
    pub fn generic_scan() -> Self {
        Self {
            private_key: Some(PrivateKeyAction::ColdSpending),
            address: Some(AddressAction::Send),
            bitcoin_uri: Some(BitcoinUriAction::Send),
            bitid: Some(BitIdAction::Login),
            website: Some(WebsiteAction::OpenBrowser),
            secret_share: Some(SecretShareAction::StartCombining),
            ..Self::default()
        }
    }

    /// Collect one more secret share.
    #[must_use]
    pub fn get_share() -> Self {
        Self {
            secret_share: Some(SecretShareAction::ReturnShare),
            ..Self::default()
        }
    }

    /// Restore a wallet from its master seed.
    #[must_use]
    pub fn import_master_seed() -> Self {
        Self {
            master_seed: Some(MasterSeedAction::Import),
            ..Self::default()
        }
    }

    /// Check a paper backup of the seed or of a single key.
    #[must_use]
    pub fn verify_seed_or_key() -> Self {
        Self {
            private_key: Some(PrivateKeyAction::Verify),
            master_seed: Some(MasterSeedAction::Verify),
            ..Self::default()
        }
    }

    /// Action for private keys.
    #[must_use]
    pub fn private_key(&self) -> Option<PrivateKeyAction> {
        self.private_key
    }

    /// Action for plain addresses.
    #[must_use]
    pub fn address(&self) -> Option<AddressAction> {
        self.address
    }

    /// Action for payment URIs.
    #[must_use]
    pub fn bitcoin_uri(&self) -> Option<BitcoinUriAction> {
        self.bitcoin_uri
    }

    /// Action for `BitID` login requests.
    #[must_use]
    pub fn bitid(&self) -> Option<BitIdAction> {
        self.bitid
    }

    /// Action for web links.
    #[must_use]
    pub fn website(&self) -> Option<WebsiteAction> {
        self.website
    }

    /// Action for hex master seeds.
    #[must_use]
    pub fn master_seed(&self) -> Option<MasterSeedAction> {
        self.master_seed
    }

    /// Action for secret shares.
    #[must_use]
    pub fn secret_share(&self) -> Option<SecretShareAction> {
        self.secret_share
    }

    /// Recognizer configured for `category`, if the category is enabled.
    #[must_use]
    pub fn recognizer(&self, category: Category) -> Option<&dyn Recognizer> {
        match category {
            Category::PrivateKey => self.private_key.as_ref().map(|a| a as &dyn Recognizer),
            Category::Address => self.address.as_ref().map(|a| a as &dyn Recognizer),
            Category::BitcoinUri => self.bitcoin_uri.as_ref().map(|a| a as &dyn Recognizer),
            Category::BitId => self.bitid.as_ref().map(|a| a as &dyn Recognizer),
            Category::Website => self.website.as_ref().map(|a| a as &dyn Recognizer),
            Category::MasterSeed => self.master_seed.as_ref().map(|a| a as &dyn Recognizer),
            Category::SecretShare => self.secret_share.as_ref().map(|a| a as &dyn Recognizer),
        }
    }

    /// Enabled categories in priority order.
    #[must_use]
    pub fn enabled_categories(&self) -> Vec<Category> {
        Category::PRIORITY
            .into_iter()
            .filter(|category| self.recognizer(*category).is_some())
            .collect()
    }
}

/// Named scan request presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPreset {
    /// [`ScanRequest::return_key_or_address_or_uri`]
    ReturnKeyOrAddressOrUri,
    /// [`ScanRequest::return_key_or_address`]
    ReturnKeyOrAddress,
    /// [`ScanRequest::spend_from_cold_storage`]
    SpendFromColdStorage,
    /// [`ScanRequest::address_book_entry`]
    AddressBookEntry,
    /// [`ScanRequest::generic_scan`]
    GenericScan,
    /// [`ScanRequest::get_share`]
    GetShare,
    /// [`ScanRequest::import_master_seed`]
    ImportMasterSeed,
    /// [`ScanRequest::verify_seed_or_key`]
    VerifySeedOrKey,
}

impl ScanPreset {
    /// Get all presets.
    #[must_use]
    pub fn all() -> &'static [ScanPreset] {
        &[
            Self::ReturnKeyOrAddressOrUri,
            Self::ReturnKeyOrAddress,
            Self::SpendFromColdStorage,
            Self::AddressBookEntry,
            Self::GenericScan,
            Self::GetShare,
            Self::ImportMasterSeed,
            Self::VerifySeedOrKey,
        ]
    }

    /// Get a human-readable name for the preset.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ReturnKeyOrAddressOrUri => "Return Key, Address or URI",
            Self::ReturnKeyOrAddress => "Return Key or Address",
            Self::SpendFromColdStorage => "Spend From Cold Storage",
            Self::AddressBookEntry => "Address Book Entry",
            Self::GenericScan => "Scan",
            Self::GetShare => "Get Secret Share",
            Self::ImportMasterSeed => "Import Master Seed",
            Self::VerifySeedOrKey => "Verify Backup",
        }
    }

    /// Build the request this preset names.
    #[must_use]
    pub fn build(&self) -> ScanRequest {
        match self {
            Self::ReturnKeyOrAddressOrUri => ScanRequest::return_key_or_address_or_uri(),
            Self::ReturnKeyOrAddress => ScanRequest::return_key_or_address(),
            Self::SpendFromColdStorage => ScanRequest::spend_from_cold_storage(),
            Self::AddressBookEntry => ScanRequest::address_book_entry(),
            Self::GenericScan => ScanRequest::generic_scan(),
            Self::GetShare => ScanRequest::get_share(),
            Self::ImportMasterSeed => ScanRequest::import_master_seed(),
            Self::VerifySeedOrKey => ScanRequest::verify_seed_or_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_scan() {
        let request = ScanRequest::generic_scan();
        assert_eq!(request.private_key(), Some(PrivateKeyAction::ColdSpending));
        assert_eq!(request.address(), Some(AddressAction::Send));
        assert_eq!(request.bitcoin_uri(), Some(BitcoinUriAction::Send));
        assert_eq!(request.bitid(), Some(BitIdAction::Login));
        assert_eq!(request.website(), Some(WebsiteAction::OpenBrowser));
        assert_eq!(request.master_seed(), None);
        assert_eq!(
            request.secret_share(),
            Some(SecretShareAction::StartCombining)
        );
    }

    type Slots = (
        Option<PrivateKeyAction>,
        Option<AddressAction>,
        Option<BitcoinUriAction>,
        Option<BitIdAction>,
        Option<WebsiteAction>,
        Option<MasterSeedAction>,
        Option<SecretShareAction>,
    );

    fn slots(request: &ScanRequest) -> Slots {
        (
            request.private_key(),
            request.address(),
            request.bitcoin_uri(),
            request.bitid(),
            request.website(),
            request.master_seed(),
            request.secret_share(),
        )
    }

    fn expected_slots(preset: ScanPreset) -> Slots {
        use crate::recognizer::{
            AddressAction as A, BitcoinUriAction as U, PrivateKeyAction as K,
            SecretShareAction as S,
        };

        match preset {
            ScanPreset::ReturnKeyOrAddressOrUri => (
                Some(K::Return),
                Some(A::Return),
                Some(U::Return),
                None,
                None,
                None,
                None,
            ),
            ScanPreset::ReturnKeyOrAddress => (
                Some(K::Return),
                Some(A::Return),
                Some(U::ReturnAddress),
                None,
                None,
                None,
                Some(S::StartCombining),
            ),
            ScanPreset::SpendFromColdStorage => (
                Some(K::ColdSpending),
                Some(A::CheckBalance),
                Some(U::CheckBalance),
                None,
                None,
                None,
                Some(S::StartCombining),
            ),
            ScanPreset::AddressBookEntry => (
                Some(K::Return),
                Some(A::Return),
                Some(U::ReturnAddress),
                None,
                None,
                None,
                None,
            ),
            ScanPreset::GenericScan => (
                Some(K::ColdSpending),
                Some(A::Send),
                Some(U::Send),
                Some(BitIdAction::Login),
                Some(WebsiteAction::OpenBrowser),
                None,
                Some(S::StartCombining),
            ),
            ScanPreset::GetShare => (None, None, None, None, None, None, Some(S::ReturnShare)),
            ScanPreset::ImportMasterSeed => (
                None,
                None,
                None,
                None,
                None,
                Some(MasterSeedAction::Import),
                None,
            ),
            ScanPreset::VerifySeedOrKey => (
                Some(K::Verify),
                None,
                None,
                None,
                None,
                Some(MasterSeedAction::Verify),
                None,
            ),
        }
    }

    #[test]
    fn test_every_preset_enables_exactly_its_actions() {
        assert_eq!(ScanPreset::all().len(), 8);
        for preset in ScanPreset::all() {
            assert_eq!(
                slots(&preset.build()),
                expected_slots(*preset),
                "{}",
                preset.display_name()
            );
        }
    }

    #[test]
    fn test_enabled_categories_follow_priority() {
        assert_eq!(
            ScanRequest::spend_from_cold_storage().enabled_categories(),
            vec![
                Category::PrivateKey,
                Category::BitcoinUri,
                Category::Address,
                Category::SecretShare
            ]
        );
        assert_eq!(
            ScanRequest::verify_seed_or_key().enabled_categories(),
            vec![Category::PrivateKey, Category::MasterSeed]
        );
        assert_eq!(
            ScanRequest::get_share().enabled_categories(),
            vec![Category::SecretShare]
        );
        assert!(ScanRequest::default().enabled_categories().is_empty());
    }

    #[test]
    fn test_address_variants() {
        assert_eq!(
            ScanRequest::return_key_or_address().bitcoin_uri(),
            Some(BitcoinUriAction::ReturnAddress)
        );
        assert_eq!(
            ScanRequest::address_book_entry().bitcoin_uri(),
            Some(BitcoinUriAction::ReturnAddress)
        );
        assert_eq!(
            ScanRequest::return_key_or_address_or_uri().bitcoin_uri(),
            Some(BitcoinUriAction::Return)
        );
        assert_eq!(ScanRequest::address_book_entry().secret_share(), None);
    }

    #[test]
    fn test_recognizer_category_matches_slot() {
        let request = ScanRequest::generic_scan();
        for category in request.enabled_categories() {
            let recognizer = request.recognizer(category).expect("enabled slot");
            assert_eq!(recognizer.category(), category);
        }
        assert!(request.recognizer(Category::MasterSeed).is_none());
    }

    #[test]
    fn test_presets_are_deterministic() {
        for preset in ScanPreset::all() {
            assert_eq!(preset.build(), preset.build());
            assert!(!preset.build().enabled_categories().is_empty());
        }
        assert_eq!(ScanPreset::GenericScan.build(), ScanRequest::generic_scan());
    }

    #[test]
    fn test_request_serialization() {
        let json = serde_json::to_string(&ScanRequest::import_master_seed())
            .expect("serialize request");
        assert_eq!(json, r#"{"master_seed":"import"}"#);

        let request: ScanRequest =
            serde_json::from_str(r#"{"address":"check_balance"}"#).expect("deserialize request");
        assert_eq!(request.address(), Some(AddressAction::CheckBalance));
        assert_eq!(request.enabled_categories(), vec![Category::Address]);
    }
}
