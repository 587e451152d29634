//! Predicates deciding whether a derived address is a hit.
//!
//! Text-pattern schemes compare against the address's lowercase hex body at
//! nibble granularity. Hook schemes instead compare the 14 reserved low bits
//! against a [`Permissions`] record.

use crate::error::{MineError, ParseError};
use crate::parse::{self, HexMode};
use alloy_primitives::{Address, FixedBytes};
use std::{fmt, str::FromStr};

const ADDRESS_BYTES: usize = 20;

/// Number of hex digits in an address body.
const ADDRESS_NIBBLES: usize = ADDRESS_BYTES * 2;

/// Bitmask that isolates the bottom 14 bits of an address, where the
/// Uniswap V4 pool manager reads hook permissions from.
const FLAGS_MASK: Address = Address(FixedBytes([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x3f, 0xff,
]));

/// The bitmask for all 14 hook flags.
pub const ALL_HOOK_MASK: u16 = (1 << 14) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternType {
    #[default]
    Prefix,
    Suffix,
    Contains,
}

impl FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prefix" | "start" => Ok(PatternType::Prefix),
            "suffix" | "end" => Ok(PatternType::Suffix),
            "contains" | "any" => Ok(PatternType::Contains),
            _ => Err(format!("unknown pattern type: {s}")),
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternType::Prefix => write!(f, "prefix"),
            PatternType::Suffix => write!(f, "suffix"),
            PatternType::Contains => write!(f, "contains"),
        }
    }
}

/// A byte pattern searched for in the hex rendering of an address.
#[derive(Clone, PartialEq, Eq)]
pub struct Pattern {
    bytes: Vec<u8>,
    kind: PatternType,
    /// Pre-split nibbles so matching never allocates.
    nibbles: [u8; ADDRESS_NIBBLES],
    len: usize,
}

impl Pattern {
    /// Builds a pattern from raw bytes. At most 20 bytes are allowed.
    pub fn new(bytes: &[u8], kind: PatternType) -> Result<Self, MineError> {
        if bytes.len() > ADDRESS_BYTES {
            return Err(MineError::InvalidPattern(format!(
                "{} bytes is longer than a {ADDRESS_BYTES}-byte address",
                bytes.len(),
            )));
        }

        let mut nibbles = [0u8; ADDRESS_NIBBLES];
        for (i, byte) in bytes.iter().enumerate() {
            nibbles[i * 2] = byte >> 4;
            nibbles[i * 2 + 1] = byte & 0x0f;
        }

        Ok(Self {
            bytes: bytes.to_vec(),
            kind,
            nibbles,
            len: bytes.len() * 2,
        })
    }

    /// Parses hex text into a pattern.
    pub fn from_hex(text: &str, kind: PatternType, mode: HexMode) -> Result<Self, MineError> {
        let bytes =
            parse::decode_hex(text, mode).map_err(|source| MineError::config("pattern", source))?;
        Self::new(&bytes, kind)
    }

    pub fn kind(&self) -> PatternType {
        self.kind
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    fn needle(&self) -> &[u8] {
        &self.nibbles[..self.len]
    }

    /// Tests the address's lowercase hex body against the pattern.
    #[inline]
    pub fn matches(&self, address: &Address) -> bool {
        let haystack = address_nibbles(address);
        let needle = self.needle();
        match self.kind {
            PatternType::Prefix => haystack.starts_with(needle),
            PatternType::Suffix => haystack.ends_with(needle),
            PatternType::Contains => {
                needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
            }
        }
    }

    /// Expected number of candidates per hit, assuming uniform addresses.
    pub fn expected_attempts(&self) -> f64 {
        let positions = match self.kind {
            PatternType::Contains if self.len > 0 => (ADDRESS_NIBBLES - self.len + 1) as f64,
            _ => 1.0,
        };
        16f64.powi(self.len as i32) / positions
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({} 0x{})", self.kind, hex::encode(&self.bytes))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 0x{}", self.kind, hex::encode(&self.bytes))
    }
}

/// Splits an address into 40 nibbles on the stack.
#[inline]
fn address_nibbles(address: &Address) -> [u8; ADDRESS_NIBBLES] {
    let mut nibbles = [0u8; ADDRESS_NIBBLES];
    for (i, byte) in address.iter().enumerate() {
        nibbles[i * 2] = byte >> 4;
        nibbles[i * 2 + 1] = byte & 0x0f;
    }
    nibbles
}

macro_rules! hook_permissions {
    ($($field:ident = $bit:literal, $name:literal;)*) => {
        /// Uniswap V4 hook permissions. Each flag owns one fixed bit among the
        /// 14 lowest bits of the hook address.
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
        pub struct Permissions {
            $(pub $field: bool,)*
        }

        impl Permissions {
            /// Flag names accepted by [`Permissions::from_str`], highest bit first.
            pub const FLAG_NAMES: &'static [&'static str] = &[$($name),*];

            /// Converts the boolean permissions into a `u16` bitmask.
            pub const fn to_flags(&self) -> u16 {
                let mut flags = 0u16;
                $(
                    if self.$field {
                        flags |= 1 << $bit;
                    }
                )*
                flags
            }

            /// Inverse of [`Permissions::to_flags`]. Bits above the 14 reserved ones are ignored.
            pub const fn from_flags(flags: u16) -> Self {
                Self {
                    $($field: flags & (1 << $bit) != 0,)*
                }
            }

            fn enable(&mut self, name: &str) -> bool {
                match name {
                    $($name => self.$field = true,)*
                    _ => return false,
                }
                true
            }
        }
    };
}

hook_permissions! {
    before_initialize = 13, "before-initialize";
    after_initialize = 12, "after-initialize";
    before_add_liquidity = 11, "before-add-liquidity";
    after_add_liquidity = 10, "after-add-liquidity";
    before_remove_liquidity = 9, "before-remove-liquidity";
    after_remove_liquidity = 8, "after-remove-liquidity";
    before_swap = 7, "before-swap";
    after_swap = 6, "after-swap";
    before_donate = 5, "before-donate";
    after_donate = 4, "after-donate";
    before_swap_return_delta = 3, "before-swap-return-delta";
    after_swap_return_delta = 2, "after-swap-return-delta";
    after_add_liquidity_return_delta = 1, "after-add-liquidity-return-delta";
    after_remove_liquidity_return_delta = 0, "after-remove-liquidity-return-delta";
}

impl Permissions {
    pub const NONE: Self = Self::from_flags(0);

    /// The address whose low 14 bits are these permissions and all others zero.
    pub fn as_address(&self) -> Address {
        let flags = self.to_flags().to_be_bytes();
        let mut address = Address::ZERO;
        address[18] = flags[0];
        address[19] = flags[1];
        address
    }
}

impl FromStr for Permissions {
    type Err = ParseError;

    /// Accepts either a hex/decimal bitmask (`0x2080`) or a comma separated
    /// list of flag names (`before-swap,after-swap`). Empty text means no flags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with(|c: char| c.is_ascii_digit()) {
            let flags = parse::parse_u64(s)?;
            if flags > ALL_HOOK_MASK as u64 {
                return Err(ParseError::Integer(format!(
                    "{s} sets bits outside the 14 hook flags"
                )));
            }
            return Ok(Self::from_flags(flags as u16));
        }

        let mut permissions = Self::NONE;
        for name in s.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let normalized = name.to_lowercase().replace('_', "-");
            if !permissions.enable(&normalized) {
                return Err(ParseError::Unknown(name.to_string()));
            }
        }
        Ok(permissions)
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = self.to_flags();
        let names: Vec<&str> = Self::FLAG_NAMES
            .iter()
            .enumerate()
            .filter(|(i, _)| flags & (1 << (13 - i)) != 0)
            .map(|(_, name)| *name)
            .collect();
        write!(f, "0x{flags:04x} [{}]", names.join(","))
    }
}

/// Tests whether the 14 reserved bits of `address` equal `permissions` exactly.
#[inline]
pub fn matches_permissions(address: &Address, permissions: &Permissions) -> bool {
    address.bit_and(FLAGS_MASK) == permissions.as_address()
}

/// The predicate a mining run tests every derived address against.
#[derive(Debug, Clone)]
pub enum Matcher {
    Pattern(Pattern),
    /// Precomputed [`Permissions::as_address`].
    Permissions(Address),
}

impl Matcher {
    pub fn permissions(permissions: &Permissions) -> Self {
        Matcher::Permissions(permissions.as_address())
    }

    #[inline]
    pub fn matches(&self, address: &Address) -> bool {
        match self {
            Matcher::Pattern(pattern) => pattern.matches(address),
            Matcher::Permissions(flags) => address.bit_and(FLAGS_MASK) == *flags,
        }
    }
}
