// Path: crates/types/src/instruction/mod.rs
//! Program instructions.
//!
//! Every payload starts with a one-byte [`InstructionTag`], written even for
//! instructions without fields, followed by the fields in the fixed order the
//! program expects. Instruction fields are validated types, so an instruction
//! that exists can always be encoded; the raw-input constructors
//! ([`HapiInstruction::create_case`] and friends) are where invalid input is
//! rejected, before anything is sent.

use crate::app::{
    index_to_category, values_to_bitmask, CaseStatus, Category, CategoryMask, Name, Pubkey,
    ReporterType, RiskScore,
};
use crate::codec::{Reader, Writer};
use crate::error::{CodecError, ValidationError};
use std::fmt;

mod builders;

pub use builders::*;

/// The instruction discriminant. Distinct from the account-type enum.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum InstructionTag {
    /// Create a community.
    CreateCommunity = 0,
    /// Rename a community or hand it to a new authority.
    UpdateCommunity = 1,
    /// Create a network.
    CreateNetwork = 2,
    /// Touch a network. Carries no fields.
    UpdateNetwork = 3,
    /// Register a reporter.
    CreateReporter = 4,
    /// Change a reporter's type or name.
    UpdateReporter = 5,
    /// Open a case.
    CreateCase = 6,
    /// Change a case's categories or status.
    UpdateCase = 7,
    /// Flag an address.
    CreateAddress = 8,
    /// Change a flagged address.
    UpdateAddress = 9,
}

impl InstructionTag {
    const ALL: [InstructionTag; 10] = [
        Self::CreateCommunity,
        Self::UpdateCommunity,
        Self::CreateNetwork,
        Self::UpdateNetwork,
        Self::CreateReporter,
        Self::UpdateReporter,
        Self::CreateCase,
        Self::UpdateCase,
        Self::CreateAddress,
        Self::UpdateAddress,
    ];

    /// The instruction name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateCommunity => "CreateCommunity",
            Self::UpdateCommunity => "UpdateCommunity",
            Self::CreateNetwork => "CreateNetwork",
            Self::UpdateNetwork => "UpdateNetwork",
            Self::CreateReporter => "CreateReporter",
            Self::UpdateReporter => "UpdateReporter",
            Self::CreateCase => "CreateCase",
            Self::UpdateCase => "UpdateCase",
            Self::CreateAddress => "CreateAddress",
            Self::UpdateAddress => "UpdateAddress",
        }
    }
}

impl TryFrom<u8> for InstructionTag {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(usize::from(value)).copied().ok_or(value)
    }
}

impl fmt::Display for InstructionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A program instruction payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HapiInstruction {
    /// Create a community.
    CreateCommunity {
        /// The community name.
        name: Name,
    },
    /// Update a community. The new authority travels as an account.
    UpdateCommunity {
        /// The new community name.
        name: Name,
    },
    /// Create a network.
    CreateNetwork {
        /// The network name.
        name: Name,
    },
    /// Update a network.
    UpdateNetwork,
    /// Register a reporter.
    CreateReporter {
        /// The permission level.
        reporter_type: ReporterType,
        /// The reporter name.
        name: Name,
    },
    /// Update a reporter.
    UpdateReporter {
        /// The new permission level.
        reporter_type: ReporterType,
        /// The new name.
        name: Name,
    },
    /// Open a case. `case_id` must equal the community's `next_case_id`.
    CreateCase {
        /// The case id.
        case_id: u64,
        /// The case categories.
        categories: CategoryMask,
        /// The initial status.
        status: CaseStatus,
        /// The case name.
        name: Name,
    },
    /// Update a case.
    UpdateCase {
        /// The new categories.
        categories: CategoryMask,
        /// The new status.
        status: CaseStatus,
    },
    /// Flag an address.
    CreateAddress {
        /// The raw flagged address.
        address: Pubkey,
        /// The risk score.
        risk: RiskScore,
        /// The owning case.
        case_id: u64,
        /// The address category.
        category: Category,
    },
    /// Update a flagged address.
    UpdateAddress {
        /// The new risk score.
        risk: RiskScore,
        /// The new owning case.
        case_id: u64,
        /// The new category.
        category: Category,
    },
}

impl HapiInstruction {
    /// Validates raw input for [`HapiInstruction::CreateCommunity`].
    pub fn create_community(name: &str) -> Result<Self, ValidationError> {
        Ok(Self::CreateCommunity {
            name: Name::new(name)?,
        })
    }

    /// Validates raw input for [`HapiInstruction::UpdateCommunity`].
    pub fn update_community(name: &str) -> Result<Self, ValidationError> {
        Ok(Self::UpdateCommunity {
            name: Name::new(name)?,
        })
    }

    /// Validates raw input for [`HapiInstruction::CreateNetwork`].
    pub fn create_network(name: &str) -> Result<Self, ValidationError> {
        Ok(Self::CreateNetwork {
            name: Name::new(name)?,
        })
    }

    /// Validates raw input for [`HapiInstruction::CreateReporter`].
    pub fn create_reporter(reporter_type: u8, name: &str) -> Result<Self, ValidationError> {
        Ok(Self::CreateReporter {
            reporter_type: ReporterType::try_from(reporter_type)?,
            name: Name::new(name)?,
        })
    }

    /// Validates raw input for [`HapiInstruction::UpdateReporter`].
    pub fn update_reporter(reporter_type: u8, name: &str) -> Result<Self, ValidationError> {
        Ok(Self::UpdateReporter {
            reporter_type: ReporterType::try_from(reporter_type)?,
            name: Name::new(name)?,
        })
    }

    /// Validates raw input for [`HapiInstruction::CreateCase`]. `categories`
    /// holds raw category flag values.
    pub fn create_case(
        case_id: u64,
        categories: &[u32],
        status: u8,
        name: &str,
    ) -> Result<Self, ValidationError> {
        let name = Name::new(name)?;
        let status = CaseStatus::try_from(status)?;
        let categories = CategoryMask::from_bits_retain(values_to_bitmask(categories)?);
        Ok(Self::CreateCase {
            case_id,
            categories,
            status,
            name,
        })
    }

    /// Validates raw input for [`HapiInstruction::UpdateCase`].
    pub fn update_case(categories: &[u32], status: u8) -> Result<Self, ValidationError> {
        let status = CaseStatus::try_from(status)?;
        let categories = CategoryMask::from_bits_retain(values_to_bitmask(categories)?);
        Ok(Self::UpdateCase { categories, status })
    }

    /// Validates raw input for [`HapiInstruction::CreateAddress`]. `category`
    /// is a raw category flag value.
    pub fn create_address(
        address: Pubkey,
        risk: i64,
        case_id: u64,
        category: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self::CreateAddress {
            address,
            risk: RiskScore::try_from(risk)?,
            case_id,
            category: Category::from_value(category)
                .ok_or(ValidationError::InvalidCategory(category))?,
        })
    }

    /// Validates raw input for [`HapiInstruction::UpdateAddress`].
    pub fn update_address(risk: i64, case_id: u64, category: u32) -> Result<Self, ValidationError> {
        Ok(Self::UpdateAddress {
            risk: RiskScore::try_from(risk)?,
            case_id,
            category: Category::from_value(category)
                .ok_or(ValidationError::InvalidCategory(category))?,
        })
    }

    /// The discriminant of this instruction.
    pub fn tag(&self) -> InstructionTag {
        match self {
            Self::CreateCommunity { .. } => InstructionTag::CreateCommunity,
            Self::UpdateCommunity { .. } => InstructionTag::UpdateCommunity,
            Self::CreateNetwork { .. } => InstructionTag::CreateNetwork,
            Self::UpdateNetwork => InstructionTag::UpdateNetwork,
            Self::CreateReporter { .. } => InstructionTag::CreateReporter,
            Self::UpdateReporter { .. } => InstructionTag::UpdateReporter,
            Self::CreateCase { .. } => InstructionTag::CreateCase,
            Self::UpdateCase { .. } => InstructionTag::UpdateCase,
            Self::CreateAddress { .. } => InstructionTag::CreateAddress,
            Self::UpdateAddress { .. } => InstructionTag::UpdateAddress,
        }
    }

    /// Encodes the payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(64);
        w.put_u8(self.tag() as u8);
        match self {
            Self::CreateCommunity { name }
            | Self::UpdateCommunity { name }
            | Self::CreateNetwork { name } => w.put_name(name.as_str()),
            Self::UpdateNetwork => {}
            Self::CreateReporter {
                reporter_type,
                name,
            }
            | Self::UpdateReporter {
                reporter_type,
                name,
            } => {
                w.put_u8((*reporter_type).into());
                w.put_name(name.as_str());
            }
            Self::CreateCase {
                case_id,
                categories,
                status,
                name,
            } => {
                w.put_u64(*case_id);
                w.put_u32(categories.bits());
                w.put_u8((*status).into());
                w.put_name(name.as_str());
            }
            Self::UpdateCase { categories, status } => {
                w.put_u32(categories.bits());
                w.put_u8((*status).into());
            }
            Self::CreateAddress {
                address,
                risk,
                case_id,
                category,
            } => {
                w.put_key(&address.0);
                w.put_u8((*risk).into());
                w.put_u64(*case_id);
                w.put_u8(category.index());
            }
            Self::UpdateAddress {
                risk,
                case_id,
                category,
            } => {
                w.put_u8((*risk).into());
                w.put_u64(*case_id);
                w.put_u8(category.index());
            }
        }
        w.into_vec()
    }

    /// Decodes a payload. Trailing bytes are ignored.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(data);
        let raw_tag = r.read_u8()?;
        let tag = InstructionTag::try_from(raw_tag).map_err(|value| CodecError::InvalidDiscriminant {
            field: "instruction",
            value,
        })?;
        let ix = match tag {
            InstructionTag::CreateCommunity => Self::CreateCommunity {
                name: read_name(&mut r)?,
            },
            InstructionTag::UpdateCommunity => Self::UpdateCommunity {
                name: read_name(&mut r)?,
            },
            InstructionTag::CreateNetwork => Self::CreateNetwork {
                name: read_name(&mut r)?,
            },
            InstructionTag::UpdateNetwork => Self::UpdateNetwork,
            InstructionTag::CreateReporter => Self::CreateReporter {
                reporter_type: read_reporter_type(&mut r)?,
                name: read_name(&mut r)?,
            },
            InstructionTag::UpdateReporter => Self::UpdateReporter {
                reporter_type: read_reporter_type(&mut r)?,
                name: read_name(&mut r)?,
            },
            InstructionTag::CreateCase => Self::CreateCase {
                case_id: r.read_u64()?,
                categories: CategoryMask::from_raw(r.read_u32()?)?,
                status: read_status(&mut r)?,
                name: read_name(&mut r)?,
            },
            InstructionTag::UpdateCase => Self::UpdateCase {
                categories: CategoryMask::from_raw(r.read_u32()?)?,
                status: read_status(&mut r)?,
            },
            InstructionTag::CreateAddress => Self::CreateAddress {
                address: Pubkey::new(r.read_key()?),
                risk: read_risk(&mut r)?,
                case_id: r.read_u64()?,
                category: read_category(&mut r)?,
            },
            InstructionTag::UpdateAddress => Self::UpdateAddress {
                risk: read_risk(&mut r)?,
                case_id: r.read_u64()?,
                category: read_category(&mut r)?,
            },
        };
        Ok(ix)
    }
}

fn read_name(r: &mut Reader<'_>) -> Result<Name, CodecError> {
    crate::app::decoded_name("name", r.read_name("name")?)
}

fn read_reporter_type(r: &mut Reader<'_>) -> Result<ReporterType, CodecError> {
    let value = r.read_u8()?;
    ReporterType::try_from(value).map_err(|_| CodecError::InvalidDiscriminant {
        field: "reporter_type",
        value,
    })
}

fn read_status(r: &mut Reader<'_>) -> Result<CaseStatus, CodecError> {
    let value = r.read_u8()?;
    CaseStatus::try_from(value).map_err(|_| CodecError::InvalidDiscriminant {
        field: "status",
        value,
    })
}

fn read_risk(r: &mut Reader<'_>) -> Result<RiskScore, CodecError> {
    let value = r.read_u8()?;
    RiskScore::try_from(value).map_err(|_| CodecError::InvalidDiscriminant {
        field: "risk",
        value,
    })
}

fn read_category(r: &mut Reader<'_>) -> Result<Category, CodecError> {
    let value = r.read_u8()?;
    index_to_category(value).map_err(|_| CodecError::InvalidDiscriminant {
        field: "category",
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    fn b64(ix: &HapiInstruction) -> String {
        STANDARD.encode(ix.encode())
    }

    fn assert_golden(ix: HapiInstruction, expected: &str) {
        assert_eq!(b64(&ix), expected, "{}", ix.tag());
        let decoded = HapiInstruction::decode(&STANDARD.decode(expected).unwrap()).unwrap();
        assert_eq!(decoded, ix);
    }

    #[test]
    fn create_community_golden() {
        let ix = HapiInstruction::create_community("hapi.one").unwrap();
        assert_eq!(ix.encode().len(), 13);
        assert_golden(ix, "AAgAAABoYXBpLm9uZQ==");
    }

    #[test]
    fn community_and_network_golden() {
        assert_golden(
            HapiInstruction::update_community("unhapi.one").unwrap(),
            "AQoAAAB1bmhhcGkub25l",
        );
        assert_golden(
            HapiInstruction::create_network("solana").unwrap(),
            "AgYAAABzb2xhbmE=",
        );
        assert_eq!(HapiInstruction::UpdateNetwork.encode(), vec![3]);
    }

    #[test]
    fn reporter_golden() {
        assert_golden(
            HapiInstruction::create_reporter(ReporterType::Authority as u8, "reporter").unwrap(),
            "BAMIAAAAcmVwb3J0ZXI=",
        );
        assert_golden(
            HapiInstruction::update_reporter(ReporterType::Full as u8, "updated reporter").unwrap(),
            "BQIQAAAAdXBkYXRlZCByZXBvcnRlcg==",
        );
    }

    #[test]
    fn case_golden() {
        assert_golden(
            HapiInstruction::create_case(1, &[8, 32, 4, 256], 0, "open and shut, Johnson!").unwrap(),
            "BgEAAAAAAAAALAEAAAAXAAAAb3BlbiBhbmQgc2h1dCwgSm9obnNvbiE=",
        );
        assert_golden(
            HapiInstruction::update_case(&[], CaseStatus::Closed as u8).unwrap(),
            "BwAAAAAB",
        );
    }

    #[test]
    fn address_golden() {
        assert_golden(
            HapiInstruction::create_address(Pubkey::default(), 5, 1, Category::Mixer.value()).unwrap(),
            "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABQEAAAAAAAAACw==",
        );
        assert_golden(
            HapiInstruction::update_address(5, 1, Category::Mixer.value()).unwrap(),
            "CQUBAAAAAAAAAAs=",
        );
    }

    #[test]
    fn validation_happens_before_encoding() {
        assert_eq!(
            HapiInstruction::create_community(&"x".repeat(29)),
            Err(ValidationError::NameTooLong { len: 29, max: 28 })
        );
        assert!(HapiInstruction::create_community(&"x".repeat(28)).is_ok());
        assert_eq!(
            HapiInstruction::create_address(Pubkey::default(), 11, 1, 1024),
            Err(ValidationError::RiskOutOfRange(11))
        );
        assert_eq!(
            HapiInstruction::update_address(-1, 1, 1024),
            Err(ValidationError::RiskOutOfRange(-1))
        );
        assert_eq!(
            HapiInstruction::update_case(&[8], 2),
            Err(ValidationError::InvalidStatus(2))
        );
        assert_eq!(
            HapiInstruction::create_case(0, &[8, 7], 0, "c"),
            Err(ValidationError::InvalidCategory(7))
        );
        assert_eq!(
            HapiInstruction::create_address(Pubkey::default(), 5, 1, 3),
            Err(ValidationError::InvalidCategory(3))
        );
    }

    #[test]
    fn decode_rejects_unknown_tag_and_truncation() {
        assert_eq!(
            HapiInstruction::decode(&[10]),
            Err(CodecError::InvalidDiscriminant {
                field: "instruction",
                value: 10
            })
        );
        assert_eq!(
            HapiInstruction::decode(&[]),
            Err(CodecError::TruncatedBuffer {
                needed: 1,
                remaining: 0
            })
        );
        assert!(matches!(
            HapiInstruction::decode(&[7, 0, 0]),
            Err(CodecError::TruncatedBuffer { .. })
        ));
    }
}
