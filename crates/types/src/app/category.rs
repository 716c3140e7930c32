// Path: crates/types/src/app/category.rs

//! The risk category table and its two on-chain encodings.
//!
//! A case stores a *set* of categories as a 32-bit mask of flag values. An
//! address stores a *single* category as its position in [`CATEGORIES`]. The
//! table order and the flag values are persisted on chain and never change.

use crate::error::{CodecError, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A risk classification tag. The discriminant is the tag's flag value.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
#[repr(u32)]
pub enum Category {
    // Tier 0
    /// No known risk.
    #[default]
    Safe = 0,

    // Tier 1
    /// Custodial or mixed wallet.
    WalletService = 1,
    /// Merchant service.
    MerchantService = 2,
    /// Mining pool.
    MiningPool = 4,
    /// Exchange with high KYC standards.
    LowRiskExchange = 8,

    // Tier 2
    /// Exchange with weaker KYC standards.
    MediumRiskExchange = 16,
    /// DeFi application.
    DeFi = 32,
    /// OTC broker.
    OTCBroker = 64,
    /// Cryptocurrency ATM.
    ATM = 128,
    /// Gambling.
    Gambling = 256,

    // Tier 3
    /// Illicit organization.
    IllicitOrganization = 512,
    /// Mixer.
    Mixer = 1024,
    /// Darknet market or service.
    DarknetService = 2048,
    /// Scam.
    Scam = 4096,
    /// Ransomware.
    Ransomware = 8192,
    /// Stolen funds.
    Theft = 16384,
    /// Counterfeit.
    Counterfeit = 32768,

    // Tier 4
    /// Terrorist financing.
    TerroristFinancing = 65536,
    /// Sanctioned entity.
    Sanctions = 131072,
    /// Child abuse material.
    ChildAbuse = 262144,
}

/// The number of entries in the category table.
pub const CATEGORY_COUNT: usize = 20;

/// The category table. An address record stores an index into this array.
pub const CATEGORIES: [Category; CATEGORY_COUNT] = [
    Category::Safe,
    Category::WalletService,
    Category::MerchantService,
    Category::MiningPool,
    Category::LowRiskExchange,
    Category::MediumRiskExchange,
    Category::DeFi,
    Category::OTCBroker,
    Category::ATM,
    Category::Gambling,
    Category::IllicitOrganization,
    Category::Mixer,
    Category::DarknetService,
    Category::Scam,
    Category::Ransomware,
    Category::Theft,
    Category::Counterfeit,
    Category::TerroristFinancing,
    Category::Sanctions,
    Category::ChildAbuse,
];

impl Category {
    /// The flag value of this category in a case bitmask. `Safe` is `0`.
    pub const fn value(self) -> u32 {
        self as u32
    }

    /// Looks a category up by its flag value.
    pub fn from_value(value: u32) -> Option<Self> {
        CATEGORIES.into_iter().find(|c| c.value() == value)
    }

    /// The position of this category in [`CATEGORIES`].
    pub fn index(self) -> u8 {
        // Flag values are 0 or a power of two, laid out in table order.
        match self.value() {
            0 => 0,
            v => (v.trailing_zeros() + 1) as u8,
        }
    }

    /// The severity tier, from 0 (safe) to 4 (severe).
    pub fn tier(self) -> u8 {
        match self {
            Self::Safe => 0,
            Self::WalletService | Self::MerchantService | Self::MiningPool | Self::LowRiskExchange => 1,
            Self::MediumRiskExchange | Self::DeFi | Self::OTCBroker | Self::ATM | Self::Gambling => 2,
            Self::IllicitOrganization
            | Self::Mixer
            | Self::DarknetService
            | Self::Scam
            | Self::Ransomware
            | Self::Theft
            | Self::Counterfeit => 3,
            Self::TerroristFinancing | Self::Sanctions | Self::ChildAbuse => 4,
        }
    }

    /// The display name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::WalletService => "WalletService",
            Self::MerchantService => "MerchantService",
            Self::MiningPool => "MiningPool",
            Self::LowRiskExchange => "LowRiskExchange",
            Self::MediumRiskExchange => "MediumRiskExchange",
            Self::DeFi => "DeFi",
            Self::OTCBroker => "OTCBroker",
            Self::ATM => "ATM",
            Self::Gambling => "Gambling",
            Self::IllicitOrganization => "IllicitOrganization",
            Self::Mixer => "Mixer",
            Self::DarknetService => "DarknetService",
            Self::Scam => "Scam",
            Self::Ransomware => "Ransomware",
            Self::Theft => "Theft",
            Self::Counterfeit => "Counterfeit",
            Self::TerroristFinancing => "TerroristFinancing",
            Self::Sanctions => "Sanctions",
            Self::ChildAbuse => "ChildAbuse",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORIES
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| super::enums::unknown_name("category", s))
    }
}

bitflags::bitflags! {
    /// The packed category set stored in a case record.
    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[serde(transparent)]
    pub struct CategoryMask: u32 {
        /// See [`Category::WalletService`].
        const WALLET_SERVICE = 1;
        /// See [`Category::MerchantService`].
        const MERCHANT_SERVICE = 1 << 1;
        /// See [`Category::MiningPool`].
        const MINING_POOL = 1 << 2;
        /// See [`Category::LowRiskExchange`].
        const LOW_RISK_EXCHANGE = 1 << 3;
        /// See [`Category::MediumRiskExchange`].
        const MEDIUM_RISK_EXCHANGE = 1 << 4;
        /// See [`Category::DeFi`].
        const DEFI = 1 << 5;
        /// See [`Category::OTCBroker`].
        const OTC_BROKER = 1 << 6;
        /// See [`Category::ATM`].
        const ATM = 1 << 7;
        /// See [`Category::Gambling`].
        const GAMBLING = 1 << 8;
        /// See [`Category::IllicitOrganization`].
        const ILLICIT_ORGANIZATION = 1 << 9;
        /// See [`Category::Mixer`].
        const MIXER = 1 << 10;
        /// See [`Category::DarknetService`].
        const DARKNET_SERVICE = 1 << 11;
        /// See [`Category::Scam`].
        const SCAM = 1 << 12;
        /// See [`Category::Ransomware`].
        const RANSOMWARE = 1 << 13;
        /// See [`Category::Theft`].
        const THEFT = 1 << 14;
        /// See [`Category::Counterfeit`].
        const COUNTERFEIT = 1 << 15;
        /// See [`Category::TerroristFinancing`].
        const TERRORIST_FINANCING = 1 << 16;
        /// See [`Category::Sanctions`].
        const SANCTIONS = 1 << 17;
        /// See [`Category::ChildAbuse`].
        const CHILD_ABUSE = 1 << 18;
    }
}

impl From<Category> for CategoryMask {
    fn from(c: Category) -> Self {
        CategoryMask::from_bits_retain(c.value())
    }
}

impl CategoryMask {
    /// Parses a raw mask, rejecting bits that map to no category.
    pub fn from_raw(bits: u32) -> Result<Self, CodecError> {
        Self::from_bits(bits).ok_or(CodecError::InvalidCategoryBits(bits))
    }

    /// The categories in this mask, sorted by flag value ascending.
    pub fn categories(self) -> BTreeSet<Category> {
        CATEGORIES
            .into_iter()
            .filter(|c| c.value() != 0 && self.contains(CategoryMask::from(*c)))
            .collect()
    }
}

impl FromIterator<Category> for CategoryMask {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CategoryMask::empty(), |acc, c| acc | CategoryMask::from(c))
    }
}

/// ORs together the flag values of `categories`. `Safe` contributes no bits.
pub fn categories_to_bitmask<'a>(categories: impl IntoIterator<Item = &'a Category>) -> u32 {
    categories
        .into_iter()
        .copied()
        .collect::<CategoryMask>()
        .bits()
}

/// ORs together raw category flag values, rejecting any value not in the table.
pub fn values_to_bitmask(values: &[u32]) -> Result<u32, ValidationError> {
    values.iter().try_fold(0u32, |acc, v| {
        Category::from_value(*v)
            .map(|c| acc | c.value())
            .ok_or(ValidationError::InvalidCategory(*v))
    })
}

/// Expands a case bitmask into its categories, sorted by flag value ascending.
///
/// Bits outside the table are an error, never dropped.
pub fn bitmask_to_categories(mask: u32) -> Result<Vec<Category>, CodecError> {
    Ok(CategoryMask::from_raw(mask)?.categories().into_iter().collect())
}

/// The table index of a category given by its raw flag value.
pub fn category_to_index(value: u32) -> Result<u8, ValidationError> {
    Category::from_value(value)
        .map(Category::index)
        .ok_or(ValidationError::UnknownCategory(value))
}

/// The category at a table index.
pub fn index_to_category(index: u8) -> Result<Category, ValidationError> {
    CATEGORIES
        .get(usize::from(index))
        .copied()
        .ok_or(ValidationError::IndexOutOfRange(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn table_is_ordered_and_indexed() {
        for (i, c) in CATEGORIES.iter().enumerate() {
            assert_eq!(usize::from(c.index()), i, "{c}");
            assert_eq!(index_to_category(i as u8), Ok(*c));
        }
        assert!(CATEGORIES.windows(2).all(|w| w[0].value() < w[1].value()));
        assert_eq!(
            index_to_category(20),
            Err(ValidationError::IndexOutOfRange(20))
        );
    }

    #[test]
    fn names_parse_back() {
        for c in CATEGORIES {
            assert_eq!(c.to_string().parse::<Category>(), Ok(c));
        }
        assert_eq!(Category::DeFi.to_string(), "DeFi");
        assert_eq!(
            "Phishing".parse::<Category>(),
            Err(ValidationError::UnknownName {
                kind: "category",
                value: "Phishing".into()
            })
        );
    }

    #[test]
    fn pinned_indices() {
        assert_eq!(Category::Theft.index(), 15);
        assert_eq!(Category::Mixer.index(), 11);
        assert_eq!(category_to_index(16384), Ok(15));
        assert_eq!(
            category_to_index(3),
            Err(ValidationError::UnknownCategory(3))
        );
    }

    #[test]
    fn mask_300_decodes_in_value_order() {
        assert_eq!(
            bitmask_to_categories(300),
            Ok(vec![
                Category::MiningPool,
                Category::LowRiskExchange,
                Category::DeFi,
                Category::Gambling,
            ])
        );
    }

    #[test]
    fn safe_contributes_no_bits() {
        assert_eq!(categories_to_bitmask(&[Category::Safe]), 0);
        assert_eq!(bitmask_to_categories(0), Ok(vec![]));
        assert_eq!(
            categories_to_bitmask(&[Category::Theft, Category::Scam]),
            0x5000
        );
    }

    #[test]
    fn unknown_bits_are_rejected() {
        assert_eq!(
            bitmask_to_categories(1 << 19),
            Err(CodecError::InvalidCategoryBits(1 << 19))
        );
        assert_eq!(
            values_to_bitmask(&[8, 3]),
            Err(ValidationError::InvalidCategory(3))
        );
        assert_eq!(values_to_bitmask(&[8, 32, 4, 256]), Ok(300));
    }

    #[test]
    fn tiers() {
        assert_eq!(Category::Safe.tier(), 0);
        assert_eq!(Category::LowRiskExchange.tier(), 1);
        assert_eq!(Category::Gambling.tier(), 2);
        assert_eq!(Category::Counterfeit.tier(), 3);
        assert_eq!(Category::ChildAbuse.tier(), 4);
    }

    #[test]
    fn full_table_round_trips() {
        let mask = categories_to_bitmask(&CATEGORIES);
        assert_eq!(mask, CategoryMask::all().bits());
        let decoded = bitmask_to_categories(mask).unwrap();
        assert_eq!(decoded.as_slice(), &CATEGORIES[1..]);
    }

    proptest! {
        #[test]
        fn any_subset_round_trips_sorted(picks in proptest::collection::vec(0usize..CATEGORY_COUNT, 0..40)) {
            let subset: Vec<Category> = picks.iter().map(|i| CATEGORIES[*i]).collect();
            let mask = categories_to_bitmask(&subset);
            let decoded = bitmask_to_categories(mask).unwrap();

            let expected: Vec<Category> = subset
                .into_iter()
                .filter(|c| *c != Category::Safe)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            prop_assert_eq!(decoded, expected);
        }
    }
}
