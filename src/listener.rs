// Sensor Sketches — Single-Message TCP Listener
//
// Accepts one client at a time, reads one framed message, decodes it and
// closes the connection. Nothing is sent back. Every failure is confined to
// the connection it happened on; the listener keeps accepting.

use std::io::{self, ErrorKind, Read};
use std::marker::PhantomData;
use std::net::{Ipv4Addr, SocketAddr, TcpListener, ToSocketAddrs};

use prost::Message;
use thiserror::Error;

use crate::proto::Received;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// One read of at most `capacity` bytes is the whole message.
    Raw { capacity: usize },
    /// Big-endian u16 length, then exactly that many bytes.
    LengthPrefixed { max_len: usize },
}

#[derive(Error, Debug)]
pub enum ListenerError {
    #[error("socket error: {0}")]
    Io(#[from] io::Error),

    #[error("message length {declared} exceeds maximum {max}")]
    Oversized { declared: usize, max: usize },

    #[error("connection closed after {received} of {expected} bytes")]
    Truncated { expected: usize, received: usize },

    #[error("connection closed without data")]
    Empty,

    #[error("failed to decode message: {0}")]
    Decode(#[from] prost::DecodeError),
}

pub type ListenerResult<T> = Result<T, ListenerError>;

/// Like `read_exact`, but reports how far a short read got.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> ListenerResult<()> {
    let mut received = 0;
    while received < buf.len() {
        match reader.read(&mut buf[received..]) {
            Ok(0) => {
                return Err(ListenerError::Truncated {
                    expected: buf.len(),
                    received,
                })
            }
            Ok(n) => received += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Read one message body according to `framing`.
pub fn read_frame<R: Read>(reader: &mut R, framing: Framing) -> ListenerResult<Vec<u8>> {
    match framing {
        Framing::Raw { capacity } => {
            let mut buf = vec![0u8; capacity];
            let n = loop {
                match reader.read(&mut buf) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => {}
                    Err(e) => return Err(e.into()),
                }
            };
            if n == 0 {
                return Err(ListenerError::Empty);
            }
            buf.truncate(n);
            Ok(buf)
        }
        Framing::LengthPrefixed { max_len } => {
            let mut header = [0u8; 2];
            fill(reader, &mut header)?;
            let declared = u16::from_be_bytes(header) as usize;
            if declared > max_len {
                return Err(ListenerError::Oversized {
                    declared,
                    max: max_len,
                });
            }

            let mut body = vec![0u8; declared];
            fill(reader, &mut body)?;
            Ok(body)
        }
    }
}

/// Read and decode one message from a connected client.
pub fn handle_client<M, R>(reader: &mut R, framing: Framing) -> ListenerResult<M>
where
    M: Message + Default,
    R: Read,
{
    let frame = read_frame(reader, framing)?;
    Ok(M::decode(frame.as_slice())?)
}

pub struct MessageListener<M> {
    socket: TcpListener,
    framing: Framing,
    _schema: PhantomData<fn() -> M>,
}

impl<M> MessageListener<M>
where
    M: Received,
{
    /// Listen on all interfaces.
    pub fn bind(port: u16, framing: Framing) -> io::Result<Self> {
        Self::bind_to((Ipv4Addr::UNSPECIFIED, port), framing)
    }

    pub fn bind_to<A: ToSocketAddrs>(addr: A, framing: Framing) -> io::Result<Self> {
        let socket = TcpListener::bind(addr)?;
        Ok(Self {
            socket,
            framing,
            _schema: PhantomData,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Accept one client, decode its message and drop the connection.
    pub fn serve_one(&self) -> ListenerResult<(SocketAddr, M)> {
        let (mut stream, peer) = self.socket.accept()?;
        log::debug!("Client connected from {}", peer);
        let message = handle_client(&mut stream, self.framing)?;
        Ok((peer, message))
    }

    pub fn run(&self) -> ! {
        if let Ok(addr) = self.local_addr() {
            log::info!("Server listening on port {}", addr.port());
        }

        loop {
            match self.serve_one() {
                Ok((peer, message)) => {
                    log::debug!("Decoded message from {}", peer);
                    log::info!("{}", message.log_line());
                }
                Err(ListenerError::Empty) => log::debug!("Client closed without sending"),
                Err(ListenerError::Decode(e)) => log::warn!("Failed to decode message: {}", e),
                Err(e) => log::warn!("Dropping client: {}", e),
            }
        }
    }
}
