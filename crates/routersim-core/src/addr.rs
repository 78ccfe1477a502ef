//! IPv4 address and subnet helpers.

use std::fmt;
use std::net::Ipv4Addr;

use routersim_types::error::{Result, RouterSimError};

/// Parse a dotted-quad IPv4 address.
pub fn parse_ipv4(text: &str) -> Result<Ipv4Addr> {
    text.parse()
        .map_err(|_| RouterSimError::Command(format!("Invalid IP address: {text}")))
}

/// True if the mask's one bits are all to the left of its zero bits.
pub fn is_contiguous_mask(mask: Ipv4Addr) -> bool {
    let m = u32::from(mask);
    m.leading_ones() + m.trailing_zeros() == 32
}

/// An address paired with a subnet mask.
///
/// `address` keeps whatever host bits were configured (an interface address);
/// use [`Ipv4Net::network`] for the subnet itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Net {
    pub address: Ipv4Addr,
    pub mask: Ipv4Addr,
}

impl Ipv4Net {
    /// Build a subnet, rejecting non-contiguous masks.
    pub fn new(address: Ipv4Addr, mask: Ipv4Addr) -> Result<Self> {
        if !is_contiguous_mask(mask) {
            return Err(RouterSimError::Command(format!("Invalid subnet mask: {mask}")));
        }
        Ok(Self { address, mask })
    }

    /// Parse an address and mask given as separate tokens.
    pub fn parse(address: &str, mask: &str) -> Result<Self> {
        Self::new(parse_ipv4(address)?, parse_ipv4(mask)?)
    }

    pub fn prefix_len(&self) -> u32 {
        u32::from(self.mask).count_ones()
    }

    /// The network address (host bits cleared).
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.address) & u32::from(self.mask))
    }

    /// This subnet with the host bits cleared.
    pub fn normalized(&self) -> Self {
        Self {
            address: self.network(),
            mask: self.mask,
        }
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & u32::from(self.mask) == u32::from(self.network())
    }

    /// True if either subnet contains the other's network address.
    pub fn overlaps(&self, other: &Ipv4Net) -> bool {
        self.contains(other.network()) || other.contains(self.network())
    }
}

impl fmt::Display for Ipv4Net {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix_len())
    }
}
