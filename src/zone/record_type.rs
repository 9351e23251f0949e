//! DNS record type definitions and conversions

use std::fmt;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

/// `RecordType` represents the type of a DNS resource record
///
/// The specific type Unknown takes an integer parameter in order to retain
/// the code of a type this system has no dedicated handling for. An integer
/// can be converted to a record type using the `from_num` function, and back
/// to an integer using the `to_num` method.
#[derive(PartialEq, Eq, Debug, Clone, Hash, Copy, Serialize, Deserialize)]
pub enum RecordType {
    Unknown(u16),
    A,     // 1
    Ns,    // 2
    Cname, // 5
    Soa,   // 6
    Ptr,   // 12
    Mx,    // 15
    Txt,   // 16
    Aaaa,  // 28
    Srv,   // 33
    Caa,   // 257
}

impl RecordType {
    pub fn to_num(&self) -> u16 {
        match *self {
            RecordType::Unknown(x) => x,
            RecordType::A => 1,
            RecordType::Ns => 2,
            RecordType::Cname => 5,
            RecordType::Soa => 6,
            RecordType::Ptr => 12,
            RecordType::Mx => 15,
            RecordType::Txt => 16,
            RecordType::Aaaa => 28,
            RecordType::Srv => 33,
            RecordType::Caa => 257,
        }
    }

    pub fn from_num(num: u16) -> RecordType {
        match num {
            1 => RecordType::A,
            2 => RecordType::Ns,
            5 => RecordType::Cname,
            6 => RecordType::Soa,
            12 => RecordType::Ptr,
            15 => RecordType::Mx,
            16 => RecordType::Txt,
            28 => RecordType::Aaaa,
            33 => RecordType::Srv,
            257 => RecordType::Caa,
            _ => RecordType::Unknown(num),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = match *self {
            RecordType::Unknown(x) => return write!(f, "TYPE{}", x),
            RecordType::A => "A",
            RecordType::Ns => "NS",
            RecordType::Cname => "CNAME",
            RecordType::Soa => "SOA",
            RecordType::Ptr => "PTR",
            RecordType::Mx => "MX",
            RecordType::Txt => "TXT",
            RecordType::Aaaa => "AAAA",
            RecordType::Srv => "SRV",
            RecordType::Caa => "CAA",
        };
        write!(f, "{}", mnemonic)
    }
}

/// Error raised when a record type mnemonic cannot be parsed
#[derive(Debug, PartialEq)]
pub struct RecordTypeParseError {
    pub mnemonic: String,
}

impl fmt::Display for RecordTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown record type: {}", self.mnemonic)
    }
}

impl std::error::Error for RecordTypeParseError {}

impl FromStr for RecordType {
    type Err = RecordTypeParseError;

    fn from_str(s: &str) -> Result<RecordType, RecordTypeParseError> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "NS" => Ok(RecordType::Ns),
            "CNAME" => Ok(RecordType::Cname),
            "SOA" => Ok(RecordType::Soa),
            "PTR" => Ok(RecordType::Ptr),
            "MX" => Ok(RecordType::Mx),
            "TXT" => Ok(RecordType::Txt),
            "AAAA" => Ok(RecordType::Aaaa),
            "SRV" => Ok(RecordType::Srv),
            "CAA" => Ok(RecordType::Caa),
            _ => Err(RecordTypeParseError {
                mnemonic: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_roundtrip() {
        for num in 0..=u16::MAX {
            assert_eq!(RecordType::from_num(num).to_num(), num);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("aaaa".parse::<RecordType>(), Ok(RecordType::Aaaa));
        assert_eq!("CAA".parse::<RecordType>(), Ok(RecordType::Caa));
        assert!("BOGUS".parse::<RecordType>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(RecordType::Aaaa.to_string(), "AAAA");
        assert_eq!(RecordType::Unknown(999).to_string(), "TYPE999");
    }
}
