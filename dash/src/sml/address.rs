use std::fmt;
use std::io;
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use crate::consensus::{Decodable, Encodable, encode};

/// A masternode's network service: IP address and port.
///
/// Serialized like Dash Core's `CService`: the address as 16 bytes (IPv4
/// addresses in their `::ffff:a.b.c.d` mapped form) followed by the port in
/// network byte order.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct ServiceAddress(pub SocketAddr);

impl ServiceAddress {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        ServiceAddress(SocketAddr::new(ip, port))
    }

    /// `0.0.0.0:0`, the service of a masternode that has not announced one.
    pub fn unspecified() -> Self {
        ServiceAddress::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)
    }

    pub fn ip(&self) -> IpAddr {
        self.0.ip()
    }

    pub fn port(&self) -> u16 {
        self.0.port()
    }
}

impl From<SocketAddr> for ServiceAddress {
    fn from(addr: SocketAddr) -> Self {
        ServiceAddress(addr)
    }
}

impl fmt::Display for ServiceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ServiceAddress {
    type Err = std::net::AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SocketAddr::from_str(s).map(ServiceAddress)
    }
}

impl Encodable for ServiceAddress {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize, io::Error> {
        let ip_address = match self.0.ip() {
            IpAddr::V4(v4) => v4.to_ipv6_mapped().octets(),
            IpAddr::V6(v6) => v6.octets(),
        };
        let mut len = 0;
        len += ip_address.consensus_encode(writer)?;
        writer.write_all(&self.0.port().to_be_bytes())?;
        len += 2;
        Ok(len)
    }
}

impl Decodable for ServiceAddress {
    fn consensus_decode<R: io::Read + ?Sized>(reader: &mut R) -> Result<Self, encode::Error> {
        let ip_address: [u8; 16] = Decodable::consensus_decode(reader)?;
        let port_bytes: [u8; 2] = Decodable::consensus_decode(reader)?;
        let v6 = Ipv6Addr::from(ip_address);
        let ip = match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        };
        Ok(ServiceAddress::new(ip, u16::from_be_bytes(port_bytes)))
    }
}
