//! TCP link implementation

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use labarm_hal::{LinkConfig, LinkRx, LinkTx};
use tracing::debug;

/// Blocking TCP connection to the command server
#[derive(Debug)]
pub struct TcpLink {
    stream: TcpStream,
    peer: SocketAddr,
}

impl TcpLink {
    /// Connect to `address` (`host:port`), trying every resolved address
    pub fn connect(address: &str, config: &LinkConfig) -> io::Result<Self> {
        let connect_timeout = Duration::from_millis(config.connect_timeout_ms.into());
        let mut last_error = None;

        for peer in address.to_socket_addrs()? {
            match TcpStream::connect_timeout(&peer, connect_timeout) {
                Ok(stream) => return Self::from_stream(stream, peer, config),
                Err(e) => {
                    debug!(%peer, error = %e, "Connect attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} did not resolve to any address", address),
            )
        }))
    }

    fn from_stream(stream: TcpStream, peer: SocketAddr, config: &LinkConfig) -> io::Result<Self> {
        let reply_timeout = Duration::from_millis(config.reply_timeout_ms.into());
        stream.set_read_timeout(Some(reply_timeout))?;
        stream.set_write_timeout(Some(reply_timeout))?;
        stream.set_nodelay(true)?;
        Ok(Self { stream, peer })
    }

    /// Address of the command server
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl LinkTx for TcpLink {
    type Error = io::Error;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        Write::write_all(&mut self.stream, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Write::flush(&mut self.stream)
    }
}

impl LinkRx for TcpLink {
    type Error = io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Read::read(&mut self.stream, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_connect_and_exchange_bytes() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 3];
            stream.read_exact(&mut buf).unwrap();
            stream.write_all(&buf).unwrap();
        });

        let mut link = TcpLink::connect(&address.to_string(), &LinkConfig::default()).unwrap();
        assert_eq!(link.peer(), address);

        LinkTx::write_all(&mut link, &[1, 2, 3]).unwrap();
        LinkTx::flush(&mut link).unwrap();

        let mut echoed = Vec::new();
        let mut buf = [0u8; 8];
        while echoed.len() < 3 {
            let n = LinkRx::read(&mut link, &mut buf).unwrap();
            assert!(n > 0);
            echoed.extend_from_slice(&buf[..n]);
        }
        assert_eq!(echoed, [1, 2, 3]);

        server.join().unwrap();
    }

    #[test]
    fn test_connect_refused() {
        // Bind then drop to get a port nobody listens on
        let address = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        assert!(TcpLink::connect(&address.to_string(), &LinkConfig::default()).is_err());
    }
}
