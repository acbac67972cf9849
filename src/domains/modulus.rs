//! Predefined fields shared by all peers of a reconciliation exchange.
//!
//! Every peer must select the same field, otherwise combining their elements
//! is a field mismatch.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use once_cell::sync::Lazy;

use super::finite_field::{parse_decimal, FiniteField};
use crate::error::FieldError;

/// A finite field that includes all 128-bit integers.
pub static P_128: Lazy<FiniteField> = Lazy::new(|| {
    FiniteField::from_be_bytes(&[
        0x1, 0x11, 0xd, 0xb2, 0x97, 0xcd, 0x30, 0x8d, 0x90, 0xe5, 0x3f, 0xb8, 0xa1, 0x30, 0x90,
        0x97, 0xe9,
    ])
});

/// A finite field that includes all 160-bit integers.
pub static P_160: Lazy<FiniteField> = Lazy::new(|| {
    FiniteField::from_be_bytes(&[
        0x1, 0xfe, 0x90, 0xe7, 0xb4, 0x19, 0x88, 0xa6, 0x41, 0xb1, 0xa6, 0xfe, 0xc8, 0x7d, 0x89,
        0xa3, 0x1e, 0x2a, 0x61, 0x31, 0xf5,
    ])
});

/// A finite field that includes all 256-bit integers.
pub static P_256: Lazy<FiniteField> = Lazy::new(|| {
    FiniteField::from_be_bytes(&[
        0x1, 0xdd, 0xf4, 0x8a, 0xc3, 0x45, 0x19, 0x18, 0x13, 0xab, 0x7d, 0x92, 0x27, 0x99, 0xe8,
        0x93, 0x96, 0x19, 0x43, 0x8, 0xa4, 0xa5, 0x9, 0xb, 0x36, 0xc9, 0x62, 0xd5, 0xd5, 0xd6,
        0xdd, 0x80, 0x27,
    ])
});

/// A finite field that includes all 512-bit integers.
pub static P_512: Lazy<FiniteField> = Lazy::new(|| {
    FiniteField::from_be_bytes(&[
        0x1, 0xc7, 0x19, 0x72, 0x25, 0xf4, 0xa5, 0xd5, 0x8a, 0xc0, 0x2, 0xa4, 0xdc, 0x8d, 0xb1,
        0xd9, 0xb0, 0xa1, 0x5b, 0x7a, 0x43, 0x22, 0x5d, 0x5b, 0x51, 0xa8, 0x1c, 0x76, 0x17, 0x44,
        0x2a, 0x4a, 0x9c, 0x62, 0xdc, 0x9e, 0x25, 0xd6, 0xe3, 0x12, 0x1a, 0xea, 0xef, 0xac, 0xd9,
        0xfd, 0x8d, 0x6c, 0xb7, 0x26, 0x6d, 0x19, 0x15, 0x53, 0xd7, 0xd, 0xb6, 0x68, 0x3b, 0x65,
        0x40, 0x89, 0x18, 0x3e, 0xbd,
    ])
});

const SKS_PRIME: &str = "530512889551602322505127520352579437339";

/// The finite field used by SKS, the Synchronizing Key Server.
pub static P_SKS: Lazy<FiniteField> = Lazy::new(|| match parse_decimal(SKS_PRIME) {
    Ok(p) => FiniteField::from_prime(p),
    Err(e) => unreachable!("{}", e),
});

/// Selects one of the predefined fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strength {
    P128,
    P160,
    P256,
    P512,
    Sks,
}

impl Strength {
    pub const ALL: [Strength; 5] = [
        Strength::P128,
        Strength::P160,
        Strength::P256,
        Strength::P512,
        Strength::Sks,
    ];

    pub fn field(&self) -> &'static FiniteField {
        match self {
            Strength::P128 => &P_128,
            Strength::P160 => &P_160,
            Strength::P256 => &P_256,
            Strength::P512 => &P_512,
            Strength::Sks => &P_SKS,
        }
    }
}

impl Display for Strength {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Strength::P128 => f.write_str("p128"),
            Strength::P160 => f.write_str("p160"),
            Strength::P256 => f.write_str("p256"),
            Strength::P512 => f.write_str("p512"),
            Strength::Sks => f.write_str("sks"),
        }
    }
}

impl FromStr for Strength {
    type Err = FieldError;

    /// Accepts `128`, `p128` and `P_128` style names, and `sks`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('_', "");
        let name = name.strip_prefix('p').unwrap_or(&name);

        match name {
            "128" => Ok(Strength::P128),
            "160" => Ok(Strength::P160),
            "256" => Ok(Strength::P256),
            "512" => Ok(Strength::P512),
            "sks" => Ok(Strength::Sks),
            _ => Err(FieldError::UnknownStrength(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Strength, P_128, P_160, P_256, P_512, P_SKS};

    #[test]
    fn bit_sizes() {
        assert_eq!(P_128.bits(), 129);
        assert_eq!(P_160.bits(), 161);
        assert_eq!(P_256.bits(), 257);
        assert_eq!(P_512.bits(), 513);
        assert_eq!(P_SKS.bits(), 129);
        assert_eq!(
            P_SKS.get_prime().to_string(),
            "530512889551602322505127520352579437339"
        );
    }

    #[test]
    fn sks_is_prime() {
        assert!(P_SKS.is_prime());
    }

    #[test]
    fn strength_names() {
        assert_eq!("128".parse::<Strength>(), Ok(Strength::P128));
        assert_eq!("P_256".parse::<Strength>(), Ok(Strength::P256));
        assert_eq!("SKS".parse::<Strength>(), Ok(Strength::Sks));
        assert!("p64".parse::<Strength>().is_err());

        for s in Strength::ALL {
            assert_eq!(s.to_string().parse::<Strength>(), Ok(s));
        }
    }

    #[test]
    fn registry_shares_allocation() {
        assert!(std::ptr::eq(Strength::Sks.field(), &*P_SKS));
        assert_eq!(Strength::P160.field().clone(), *P_160);
        assert_ne!(*P_128, *P_SKS);
    }
}
