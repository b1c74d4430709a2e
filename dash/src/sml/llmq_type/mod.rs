use std::fmt::{Display, Formatter};
use std::io;

use crate::consensus::{Decodable, Encodable, encode};

/// Blocks between a quorum's base block and the block whose chainlock the
/// quorum's members are assumed to have worked on (`WORK_DIFF_DEPTH`).
pub const WORK_DIFF_DEPTH: u32 = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Hash, Ord)]
pub enum LLMQType {
    LlmqtypeUnknown = 0, // other kind of
    Llmqtype50_60 = 1,   // 50 members,  30  (60%) threshold, 24 / day
    Llmqtype400_60 = 2,  // 400 members, 240 (60%) threshold, 2  / day
    Llmqtype400_85 = 3,  // 400 members, 340 (85%) threshold, 1  / day
    Llmqtype100_67 = 4,  // 100 members, 67  (67%) threshold, 24 / day
    Llmqtype60_75 = 5,   // 60 members,  45  (75%) threshold, 2  / day
    Llmqtype25_67 = 6,   // 25 members,  67  (67%) threshold, 24 / day

    // dev-only
    LlmqtypeTest = 100,            // 3 members, 2 (66%) threshold, one per hour
    LlmqtypeDevnet = 101,          // 10 members, 6 (60%) threshold, one per hour
    LlmqtypeTestV17 = 102,         // 3 members, 2 (66%) threshold, one per hour
    LlmqtypeTestDIP0024 = 103,     // 4 members, 2 (66%) threshold, one per hour
    LlmqtypeTestInstantSend = 104, // 3 members, 2 (66%) threshold, one per hour
    LlmqtypeDevnetDIP0024 = 105,   // 8 members, 4 (50%) threshold, one per hour
    LlmqtypeTestnetPlatform = 106, // 12 members, 8 (67%) threshold, one per hour
    LlmqtypeDevnetPlatform = 107,  // 12 members, 8 (67%) threshold, one per hour
}

impl Display for LLMQType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LLMQType::LlmqtypeUnknown => "0_Unknown",
                LLMQType::Llmqtype50_60 => "1_50/60",
                LLMQType::Llmqtype400_60 => "2_400/60",
                LLMQType::Llmqtype400_85 => "3_400/85",
                LLMQType::Llmqtype100_67 => "4_100/67",
                LLMQType::Llmqtype60_75 => "5_60/75",
                LLMQType::Llmqtype25_67 => "6_25/67",
                LLMQType::LlmqtypeTest => "100_Test",
                LLMQType::LlmqtypeDevnet => "101_Dev",
                LLMQType::LlmqtypeTestV17 => "102_Test-v17",
                LLMQType::LlmqtypeTestDIP0024 => "103_Test-dip-24",
                LLMQType::LlmqtypeTestInstantSend => "104_Test-IS",
                LLMQType::LlmqtypeDevnetDIP0024 => "105_Dev-dip-24",
                LLMQType::LlmqtypeTestnetPlatform => "106_Test-Platform",
                LLMQType::LlmqtypeDevnetPlatform => "107_Dev-Platform",
            }
        )
    }
}

impl LLMQType {
    /// Number of members in a quorum of this type.
    pub fn size(&self) -> u32 {
        match self {
            LLMQType::Llmqtype50_60 => 50,
            LLMQType::Llmqtype400_60 | LLMQType::Llmqtype400_85 => 400,
            LLMQType::Llmqtype100_67 => 100,
            LLMQType::Llmqtype60_75 => 60,
            LLMQType::Llmqtype25_67 => 25,
            LLMQType::LlmqtypeTest
            | LLMQType::LlmqtypeTestV17
            | LLMQType::LlmqtypeTestInstantSend => 3,
            LLMQType::LlmqtypeTestDIP0024 => 4,
            LLMQType::LlmqtypeDevnet => 12,
            LLMQType::LlmqtypeDevnetDIP0024 => 8,
            LLMQType::LlmqtypeTestnetPlatform | LLMQType::LlmqtypeDevnetPlatform => 12,
            LLMQType::LlmqtypeUnknown => 0,
        }
    }

    pub fn index(&self) -> u8 {
        u8::from(*self)
    }

    /// Rotating (DIP24) quorum types are split into `quorum_index` sub-quorums
    /// per cycle; every other type always has quorum index 0.
    pub fn is_rotating_quorum_type(&self) -> bool {
        matches!(
            self,
            LLMQType::Llmqtype60_75 | LLMQType::LlmqtypeDevnetDIP0024 | LLMQType::LlmqtypeTestDIP0024
        )
    }
}

impl From<u8> for LLMQType {
    fn from(orig: u8) -> Self {
        match orig {
            1 => LLMQType::Llmqtype50_60,
            2 => LLMQType::Llmqtype400_60,
            3 => LLMQType::Llmqtype400_85,
            4 => LLMQType::Llmqtype100_67,
            5 => LLMQType::Llmqtype60_75,
            6 => LLMQType::Llmqtype25_67,
            100 => LLMQType::LlmqtypeTest,
            101 => LLMQType::LlmqtypeDevnet,
            102 => LLMQType::LlmqtypeTestV17,
            103 => LLMQType::LlmqtypeTestDIP0024,
            104 => LLMQType::LlmqtypeTestInstantSend,
            105 => LLMQType::LlmqtypeDevnetDIP0024,
            106 => LLMQType::LlmqtypeTestnetPlatform,
            107 => LLMQType::LlmqtypeDevnetPlatform,
            _ => LLMQType::LlmqtypeUnknown,
        }
    }
}

impl From<LLMQType> for u8 {
    fn from(value: LLMQType) -> Self {
        value as u8
    }
}

impl Encodable for LLMQType {
    fn consensus_encode<S: io::Write + ?Sized>(&self, s: &mut S) -> Result<usize, io::Error> {
        self.index().consensus_encode(s)
    }
}

impl Decodable for LLMQType {
    fn consensus_decode<D: io::Read + ?Sized>(d: &mut D) -> Result<LLMQType, encode::Error> {
        let raw = u8::consensus_decode(d)?;
        match LLMQType::from(raw) {
            LLMQType::LlmqtypeUnknown if raw != 0 => Err(encode::Error::InvalidEnumValue {
                value: raw as u16,
                type_name: "LLMQType",
            }),
            llmq_type => Ok(llmq_type),
        }
    }
}
