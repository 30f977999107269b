//! Line-delimited JSON transport over TCP.
//!
//! Each line in either direction is one JSON object. A client opens with a
//! handshake line naming its room; every later line is forwarded to the room
//! untouched, and every message the room addresses to the connection is
//! written back as one line.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uno_core::PlayerId;
use uno_runtime::{ProtocolError, RoomHandle, RoomRegistry, RuntimeError, ServerMessage};

/// Longest accepted room key.
const MAX_ROOM_KEY_LEN: usize = 64;

/// Longest accepted line, terminator excluded.
const MAX_LINE_BYTES: usize = 64 * 1024;

/// Issues connection ids for one server process.
///
/// Ids combine a per-boot random nonce with a counter, so a restarted
/// server never hands out an id that a persisted room still seats.
#[derive(Debug)]
pub struct ConnectionIds {
    nonce: u64,
    issued: u64,
}

impl ConnectionIds {
    pub fn random() -> Self {
        Self::with_nonce(rand::random())
    }

    pub fn with_nonce(nonce: u64) -> Self {
        Self { nonce, issued: 0 }
    }

    pub fn next_id(&mut self) -> PlayerId {
        self.issued += 1;
        PlayerId::from(format!("{:016x}-{}", self.nonce, self.issued))
    }
}

#[derive(Debug, Deserialize)]
struct Handshake {
    room: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandshakeError {
    #[error("Invalid handshake")]
    Malformed,

    #[error("Invalid room key")]
    InvalidRoomKey,
}

/// Extracts the room key from the opening line of a connection.
pub fn parse_handshake(line: &str) -> Result<String, HandshakeError> {
    let handshake: Handshake =
        serde_json::from_str(line).map_err(|_| HandshakeError::Malformed)?;
    let room = handshake.room.trim();

    let valid = !room.is_empty()
        && room.len() <= MAX_ROOM_KEY_LEN
        && room
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(HandshakeError::InvalidRoomKey);
    }
    Ok(room.to_owned())
}

/// One unit read off the wire.
#[derive(Debug, PartialEq, Eq)]
enum Frame {
    Line(String),
    /// Not UTF-8, or longer than [`MAX_LINE_BYTES`]. The bytes are consumed.
    Invalid,
    Eof,
}

/// Reads the next newline-terminated frame, buffering at most
/// [`MAX_LINE_BYTES`] of it.
async fn next_frame<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Frame>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    buf.clear();
    let read = (&mut *reader)
        .take(MAX_LINE_BYTES as u64 + 1)
        .read_until(b'\n', buf)
        .await?;
    if read == 0 {
        return Ok(Frame::Eof);
    }
    if buf.last() != Some(&b'\n') && buf.len() > MAX_LINE_BYTES {
        skip_line(reader).await?;
        return Ok(Frame::Invalid);
    }

    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(match std::str::from_utf8(buf) {
        Ok(line) => Frame::Line(line.to_owned()),
        Err(_) => Frame::Invalid,
    })
}

/// Discards input up to and including the next newline.
async fn skip_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(end) => {
                reader.consume(end + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}

/// Drives one client connection until it closes.
pub async fn serve(
    stream: TcpStream,
    peer: SocketAddr,
    conn: PlayerId,
    registry: Arc<RoomRegistry>,
) -> Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut buf = Vec::new();

    let handshake = match next_frame(&mut reader, &mut buf).await? {
        Frame::Eof => {
            debug!(target: "server::connection", %peer, "closed before handshake");
            return Ok(());
        }
        Frame::Invalid => Err(HandshakeError::Malformed),
        Frame::Line(first) => parse_handshake(&first),
    };
    let room_key = match handshake {
        Ok(room_key) => room_key,
        Err(err) => {
            debug!(target: "server::connection", %peer, error = %err, "handshake rejected");
            write_line(&mut write_half, &ServerMessage::error(&err)).await?;
            return Ok(());
        }
    };

    let room = registry.room(&room_key).await;
    let mut outbound = room.connect(conn.clone()).await?;
    info!(target: "server::connection", %peer, %conn, room = %room_key, "client connected");

    // Local replies for frames that never reach the room.
    let (reply_tx, mut replies) = mpsc::unbounded_channel();

    let writer_conn = conn.clone();
    let writer = tokio::spawn(async move {
        loop {
            let message = tokio::select! {
                Some(message) = outbound.recv() => message,
                Some(message) = replies.recv() => message,
                else => break,
            };
            if let Err(err) = write_line(&mut write_half, &message).await {
                debug!(target: "server::connection", conn = %writer_conn, error = %err, "write failed");
                break;
            }
        }
    });

    let read_result = forward(&room, &conn, &mut reader, reply_tx).await;
    let leave_result = room.disconnect(&conn).await;
    if let Err(err) = writer.await {
        warn!(target: "server::connection", %conn, error = %err, "writer task failed");
    }
    info!(target: "server::connection", %peer, %conn, room = %room_key, "client disconnected");
    registry.release(room).await;

    read_result?;
    leave_result?;
    Ok(())
}

async fn forward<R>(
    room: &RoomHandle,
    conn: &PlayerId,
    reader: &mut R,
    replies: mpsc::UnboundedSender<ServerMessage>,
) -> Result<()>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    loop {
        let line = match next_frame(reader, &mut buf).await? {
            Frame::Eof => return Ok(()),
            Frame::Invalid => {
                debug!(target: "server::connection", %conn, "unreadable line");
                replies
                    .send(ServerMessage::error(&ProtocolError::InvalidFormat))
                    .ok();
                continue;
            }
            Frame::Line(line) => line,
        };
        if line.trim().is_empty() {
            continue;
        }
        match room.send_message(conn, line).await {
            Ok(()) => {}
            Err(err @ (RuntimeError::Repository(_) | RuntimeError::CorruptState { .. })) => {
                // The room rejected the write and kept its previous state.
                error!(target: "server::connection", %conn, room = room.room(), error = %err, "message dropped");
            }
            Err(err) => return Err(err.into()),
        }
    }
}

async fn write_line<W>(writer: &mut W, message: &ServerMessage) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut json = message.to_json()?;
    json.push('\n');
    writer.write_all(json.as_bytes()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_room_keys() {
        assert_eq!(parse_handshake(r#"{"room":"lobby-1"}"#), Ok("lobby-1".into()));
        assert_eq!(parse_handshake(r#"{"room":"  table_7 "}"#), Ok("table_7".into()));
    }

    #[test]
    fn rejects_bad_handshakes() {
        assert_eq!(parse_handshake("hello"), Err(HandshakeError::Malformed));
        assert_eq!(parse_handshake(r#"{"type":"join"}"#), Err(HandshakeError::Malformed));
        assert_eq!(parse_handshake(r#"{"room":""}"#), Err(HandshakeError::InvalidRoomKey));
        assert_eq!(
            parse_handshake(r#"{"room":"../etc"}"#),
            Err(HandshakeError::InvalidRoomKey)
        );
        let long = format!(r#"{{"room":"{}"}}"#, "a".repeat(MAX_ROOM_KEY_LEN + 1));
        assert_eq!(parse_handshake(&long), Err(HandshakeError::InvalidRoomKey));
    }

    async fn frames(input: &[u8]) -> Vec<Frame> {
        let mut reader = BufReader::with_capacity(16, input);
        let mut buf = Vec::new();
        let mut frames = Vec::new();
        loop {
            let frame = next_frame(&mut reader, &mut buf).await.unwrap();
            let done = frame == Frame::Eof;
            frames.push(frame);
            if done {
                return frames;
            }
        }
    }

    #[tokio::test]
    async fn non_utf8_line_is_skipped() {
        let frames = frames(b"\xff\xfe{}\n{\"type\":\"ready\"}\r\n").await;
        assert_eq!(
            frames,
            vec![
                Frame::Invalid,
                Frame::Line(r#"{"type":"ready"}"#.into()),
                Frame::Eof
            ]
        );
    }

    #[tokio::test]
    async fn oversized_line_is_discarded() {
        let mut input = vec![b'x'; MAX_LINE_BYTES + 100];
        input.extend_from_slice(b"\n{\"type\":\"drawCard\"}\n");

        let frames = frames(&input).await;
        assert_eq!(
            frames,
            vec![
                Frame::Invalid,
                Frame::Line(r#"{"type":"drawCard"}"#.into()),
                Frame::Eof
            ]
        );
    }

    #[tokio::test]
    async fn line_at_the_limit_is_kept() {
        let mut input = vec![b'y'; MAX_LINE_BYTES];
        input.push(b'\n');
        input.extend_from_slice(b"tail");

        let frames = frames(&input).await;
        assert_eq!(frames.len(), 3);
        assert!(matches!(&frames[0], Frame::Line(line) if line.len() == MAX_LINE_BYTES));
        assert_eq!(frames[1], Frame::Line("tail".into()));
    }

    #[test]
    fn connection_ids_are_unique_per_boot() {
        let mut first_boot = ConnectionIds::with_nonce(1);
        let mut second_boot = ConnectionIds::with_nonce(2);

        let a = first_boot.next_id();
        let b = first_boot.next_id();
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "0000000000000001-1");
        assert_ne!(second_boot.next_id(), a);
    }

    #[tokio::test]
    async fn messages_are_newline_terminated() {
        let mut buf = Vec::new();
        write_line(
            &mut buf,
            &ServerMessage::Error {
                message: "Not your turn".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(buf, b"{\"type\":\"error\",\"message\":\"Not your turn\"}\n");
    }
}
