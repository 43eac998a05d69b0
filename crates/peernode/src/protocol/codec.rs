//! Protocol codec implementation for peernode.
//!
//! Each request and each response is one JSON document written to its own
//! substream, terminated by closing the write side.

use std::io;

use async_trait::async_trait;
use futures::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use libp2p::{request_response::Codec, StreamProtocol};
use serde::{de::DeserializeOwned, Serialize};

use super::types::{ReqresRequest, ReqresResponse};

/// Largest frame accepted in either direction (4 MiB)
pub const MAX_FRAME_SIZE: usize = 4 * 1024 * 1024;

/// Codec for serializing/deserializing request-response frames
#[derive(Debug, Clone, Default)]
pub struct ReqresCodec;

async fn read_frame<T, M>(io: &mut T) -> io::Result<M>
where
    T: AsyncRead + Unpin + Send,
    M: DeserializeOwned,
{
    let mut buf = Vec::new();
    io.take(MAX_FRAME_SIZE as u64 + 1).read_to_end(&mut buf).await?;

    if buf.is_empty() {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stream closed without a frame"));
    }
    if buf.len() > MAX_FRAME_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("frame exceeds {MAX_FRAME_SIZE} bytes"),
        ));
    }

    serde_json::from_slice(&buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

async fn write_frame<T, M>(io: &mut T, frame: &M) -> io::Result<()>
where
    T: AsyncWrite + Unpin + Send,
    M: Serialize,
{
    let json_data =
        serde_json::to_vec(frame).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if json_data.len() > MAX_FRAME_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("frame exceeds {MAX_FRAME_SIZE} bytes"),
        ));
    }

    io.write_all(&json_data).await?;
    io.close().await?;

    Ok(())
}

#[async_trait]
impl Codec for ReqresCodec {
    type Protocol = StreamProtocol;
    type Request = ReqresRequest;
    type Response = ReqresResponse;

    async fn read_request<T>(&mut self, _: &Self::Protocol, io: &mut T) -> io::Result<Self::Request>
    where
        T: AsyncRead + Unpin + Send,
    {
        read_frame(io).await
    }

    async fn read_response<T>(
        &mut self,
        _: &Self::Protocol,
        io: &mut T,
    ) -> io::Result<Self::Response>
    where
        T: AsyncRead + Unpin + Send,
    {
        read_frame(io).await
    }

    async fn write_request<T>(
        &mut self,
        _: &Self::Protocol,
        io: &mut T,
        req: Self::Request,
    ) -> io::Result<()>
    where
        T: AsyncWrite + Unpin + Send,
    {
        write_frame(io, &req).await
    }

    async fn write_response<T>(
        &mut self,
        _: &Self::Protocol,
        io: &mut T,
        res: Self::Response,
    ) -> io::Result<()>
    where
        T: AsyncWrite + Unpin + Send,
    {
        write_frame(io, &res).await
    }
}
