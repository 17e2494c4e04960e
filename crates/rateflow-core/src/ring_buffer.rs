//! Byte-granular circular queue with a contiguous-read guarantee.
//!
//! The buffer reserves `max_size + 1` bytes for the ring itself (the `+1`
//! disambiguates the full and empty states without a separate flag) plus a
//! **mirror region** of `max_required_size` bytes immediately after it.
//! Every `put` that lands within `max_required_size` bytes of the start of
//! the ring also replicates those bytes into the mirror region at the same
//! offset, so any `peek`/`get` of up to `max_required_size` bytes can be
//! handed back as a single contiguous slice, even when the logical read
//! straddles the wrap point.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Sizing for a [`RingBuffer`].
#[derive(Debug, Clone, Copy)]
pub struct RingBufferConfig {
    /// Maximum number of bytes the queue can hold at once.
    pub max_size: usize,
    /// Largest `peek`/`get` request that will ever be issued; bounds the
    /// mirror region.
    pub max_required_size: usize,
}

/// A byte-granular ring buffer with the mirror-region contiguity trick.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    data: Vec<u8>,
    max_size: usize,
    max_required_size: usize,
    write_pos: usize,
    read_pos: usize,
    remain: usize,
}

impl RingBuffer {
    /// Number of bytes backing the ring proper (excludes the mirror tail).
    fn buffer_size(&self) -> usize {
        self.max_size + 1
    }

    /// Build a new, empty ring buffer from `config`.
    pub fn new(config: RingBufferConfig) -> Result<Self> {
        if config.max_size == 0 {
            return Err(Error::InvalidArgument);
        }
        let buffer_size = config.max_size + 1;
        let data = vec![0u8; buffer_size + config.max_required_size];
        Ok(Self {
            data,
            max_size: config.max_size,
            max_required_size: config.max_required_size,
            write_pos: 0,
            read_pos: 0,
            remain: 0,
        })
    }

    /// Total bytes the caller configured this queue to hold.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// The configured contiguous-read bound.
    pub fn max_required_size(&self) -> usize {
        self.max_required_size
    }

    /// Bytes currently buffered (not yet `get`).
    pub fn remain(&self) -> usize {
        self.remain
    }

    /// Reset to the empty state without reallocating. Stale bytes are left
    /// in place; they are unreachable until overwritten by a subsequent
    /// `put`, since `remain` is zero and every read is bounds-checked against
    /// it.
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.read_pos = 0;
        self.remain = 0;
    }

    /// Append `bytes` to the queue.
    pub fn put(&mut self, bytes: &[u8]) -> Result<()> {
        let free = self.max_size - self.remain;
        if bytes.len() > free {
            return Err(Error::ExceedMaxCapacity);
        }
        let buffer_size = self.buffer_size();
        let mut rest = bytes;
        while !rest.is_empty() {
            let to_wrap = buffer_size - self.write_pos;
            let chunk_len = rest.len().min(to_wrap);
            let (chunk, tail) = rest.split_at(chunk_len);
            self.data[self.write_pos..self.write_pos + chunk_len].copy_from_slice(chunk);
            if self.write_pos < self.max_required_size {
                let mirror_len = chunk_len.min(self.max_required_size - self.write_pos);
                let mirror_start = buffer_size + self.write_pos;
                self.data[mirror_start..mirror_start + mirror_len]
                    .copy_from_slice(&chunk[..mirror_len]);
            }
            self.write_pos = (self.write_pos + chunk_len) % buffer_size;
            rest = tail;
        }
        self.remain += bytes.len();
        Ok(())
    }

    /// Return the next `required_size` bytes without consuming them.
    pub fn peek(&self, required_size: usize) -> Result<&[u8]> {
        if required_size > self.max_required_size {
            return Err(Error::ExceedMaxRequired);
        }
        if required_size > self.remain {
            return Err(Error::ExceedMaxRemain);
        }
        Ok(&self.data[self.read_pos..self.read_pos + required_size])
    }

    /// Return the next `required_size` bytes and advance past them.
    pub fn get(&mut self, required_size: usize) -> Result<&[u8]> {
        self.get_window(required_size, required_size)
    }

    /// Return the next `window_size` bytes (a contiguous peek, same
    /// guarantee as [`peek`](Self::peek)) but advance the read position by
    /// only `advance_size`. `window_size` may exceed `advance_size` — this
    /// is how a convolution can see more of the delay line than it
    /// consumes per output sample. Both sizes are checked independently
    /// against `max_required_size`/`remain`.
    pub fn get_window(&mut self, window_size: usize, advance_size: usize) -> Result<&[u8]> {
        if window_size > self.max_required_size {
            return Err(Error::ExceedMaxRequired);
        }
        if window_size > self.remain || advance_size > self.remain {
            return Err(Error::ExceedMaxRemain);
        }
        let start = self.read_pos;
        self.read_pos = (self.read_pos + advance_size) % self.buffer_size();
        self.remain -= advance_size;
        Ok(&self.data[start..start + window_size])
    }

    /// [`put`](Self::put) convenience for native-endian `f32` samples.
    pub fn put_f32(&mut self, samples: &[f32]) -> Result<()> {
        let mut bytes = Vec::with_capacity(samples.len() * 4);
        for &sample in samples {
            bytes.extend_from_slice(&sample.to_ne_bytes());
        }
        self.put(&bytes)
    }

    /// [`get`](Self::get) convenience for native-endian `f32` samples.
    pub fn get_f32(&mut self, count: usize) -> Result<Vec<f32>> {
        let bytes = self.get(count * 4)?;
        let mut out = Vec::with_capacity(count);
        for chunk in bytes.chunks_exact(4) {
            out.push(f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        }
        Ok(out)
    }
}
