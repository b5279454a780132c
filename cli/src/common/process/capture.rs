//! # Combined Output Capture (`common::process::capture`)
//!
//! File: cli/src/common/process/capture.rs
//!
//! ## Overview
//!
//! Collects a child's stdout and stderr into a single byte stream.
//!
//! On Unix both descriptors of the child point at the write end of one pipe,
//! so bytes land in the buffer in exactly the order the process wrote them.
//! Elsewhere the two streams are drained concurrently into the same buffer,
//! which preserves order at chunk granularity.
//!
//! The buffer is shared with the drain task, so whatever was read before a
//! timeout kill can still be returned to the caller.
//!
//! The `Command` that `attach` configured holds the parent's copies of the
//! write ends. It must be dropped right after spawning, otherwise the reader
//! never sees end-of-file.
//!
use command_group::AsyncGroupChild;
use std::io;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;

const CHUNK_SIZE: usize = 8 * 1024;

/// Byte buffer shared between the drain task and the runner.
#[derive(Debug, Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn append(&self, bytes: &[u8]) {
        // A poisoned lock only means a reader panicked mid-append; the bytes are still valid.
        let mut buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        buf.extend_from_slice(bytes);
    }

    fn take(&self) -> Vec<u8> {
        let mut buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *buf)
    }
}

/// Output wiring prepared before spawn.
pub struct Capture {
    buffer: SharedBuffer,
    #[cfg(unix)]
    read_end: std::os::fd::OwnedFd,
}

impl Capture {
    /// Points the command's stdout and stderr at the capture.
    #[cfg(unix)]
    pub fn attach(command: &mut Command) -> io::Result<Self> {
        use nix::fcntl::{fcntl, FcntlArg, FdFlag};
        use std::os::fd::AsRawFd;

        let (read_end, write_end) = nix::unistd::pipe().map_err(io::Error::from)?;
        // Keep the originals out of the child; stdio gets its own dup2'd copies.
        for fd in [&read_end, &write_end] {
            fcntl(fd.as_raw_fd(), FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC)).map_err(io::Error::from)?;
        }
        let stderr_end = write_end.try_clone()?;

        command
            .stdout(std::process::Stdio::from(write_end))
            .stderr(std::process::Stdio::from(stderr_end));

        Ok(Self {
            buffer: SharedBuffer::default(),
            read_end,
        })
    }

    /// Points the command's stdout and stderr at the capture.
    #[cfg(not(unix))]
    pub fn attach(command: &mut Command) -> io::Result<Self> {
        command
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped());
        Ok(Self {
            buffer: SharedBuffer::default(),
        })
    }

    /// Starts draining into the shared buffer. Call after spawn.
    #[cfg(unix)]
    pub fn start(self, _child: &mut AsyncGroupChild) -> io::Result<Drain> {
        let receiver = tokio::net::unix::pipe::Receiver::from_owned_fd(self.read_end)?;
        let handle = tokio::spawn(pump(receiver, self.buffer.clone()));

        Ok(Drain {
            buffer: self.buffer,
            handle,
        })
    }

    /// Starts draining into the shared buffer. Call after spawn.
    #[cfg(not(unix))]
    pub fn start(self, child: &mut AsyncGroupChild) -> io::Result<Drain> {
        let missing = || io::Error::other("child stdio was not piped");
        let stdout = child.inner().stdout.take().ok_or_else(missing)?;
        let stderr = child.inner().stderr.take().ok_or_else(missing)?;

        let out_task = tokio::spawn(pump(stdout, self.buffer.clone()));
        let err_task = tokio::spawn(pump(stderr, self.buffer.clone()));
        let handle = tokio::spawn(async move {
            let (out, err) = tokio::join!(out_task, err_task);
            out.map_err(io::Error::other)??;
            err.map_err(io::Error::other)??;
            Ok(())
        });

        Ok(Drain {
            buffer: self.buffer,
            handle,
        })
    }
}

/// A running drain task and the buffer it fills.
pub struct Drain {
    buffer: SharedBuffer,
    handle: JoinHandle<io::Result<()>>,
}

impl Drain {
    /// Waits until every writer has closed the stream.
    pub async fn finish(&mut self) -> io::Result<()> {
        match (&mut self.handle).await {
            Ok(result) => result,
            Err(join_err) => Err(io::Error::other(join_err)),
        }
    }

    /// Stops draining and returns everything captured so far.
    pub fn into_output(self) -> Vec<u8> {
        self.handle.abort();
        self.buffer.take()
    }
}

async fn pump<R>(mut reader: R, buffer: SharedBuffer) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buffer.append(&chunk[..n]);
    }
}
