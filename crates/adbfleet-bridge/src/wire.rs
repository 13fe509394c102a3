// ── Smart-socket framing ──
//
// The ADB host server speaks a minimal text protocol: a request is a
// 4-hex-digit length prefix followed by the service string; the reply is
// a 4-byte status word (`OKAY`/`FAIL`), optionally followed by a
// hex-length-delimited payload. Device-bound streams (`shell:`, `tcpip:`)
// have no framing at all and run until EOF.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Error;

const STATUS_OKAY: &[u8; 4] = b"OKAY";
const STATUS_FAIL: &[u8; 4] = b"FAIL";

/// Send a service request: `{:04x}` length prefix + service string.
pub(crate) async fn write_service<S>(stream: &mut S, service: &str) -> Result<(), Error>
where
    S: AsyncWrite + Unpin,
{
    if service.len() > 0xffff {
        return Err(Error::protocol(format!(
            "service string too long ({} bytes)",
            service.len()
        )));
    }
    let framed = format!("{:04x}{service}", service.len());
    stream.write_all(framed.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

/// Read the 4-byte status word. `FAIL` is followed by a hex-length
/// message block which becomes [`Error::Rejected`].
pub(crate) async fn read_okay<S>(stream: &mut S, service: &str) -> Result<(), Error>
where
    S: AsyncRead + Unpin,
{
    let mut status = [0u8; 4];
    stream.read_exact(&mut status).await?;

    if &status == STATUS_OKAY {
        return Ok(());
    }
    if &status == STATUS_FAIL {
        let message = read_block(stream).await.unwrap_or_default();
        return Err(Error::Rejected {
            service: service.to_owned(),
            message,
        });
    }
    Err(Error::protocol(format!(
        "unexpected status word {:?}",
        String::from_utf8_lossy(&status)
    )))
}

/// Read a hex-length-delimited payload block.
pub(crate) async fn read_block<S>(stream: &mut S) -> Result<String, Error>
where
    S: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 4];
    stream.read_exact(&mut prefix).await?;

    let hex = std::str::from_utf8(&prefix)
        .map_err(|_| Error::protocol("length prefix is not ASCII hex"))?;
    let len = usize::from_str_radix(hex, 16)
        .map_err(|_| Error::protocol(format!("invalid length prefix '{hex}'")))?;

    let mut payload = vec![0u8; len];
    stream.read_exact(&mut payload).await?;
    String::from_utf8(payload).map_err(|_| Error::protocol("payload is not valid UTF-8"))
}

/// Read an unframed stream to EOF (device services like `shell:`).
pub(crate) async fn read_to_eof<S>(stream: &mut S) -> Result<String, Error>
where
    S: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
