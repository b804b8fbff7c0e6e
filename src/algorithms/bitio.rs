//! Bit-level I/O over byte-oriented streams.
//!
//! Two pairs of endpoints are provided. [`BitWriter`] and [`BitReader`] pack bits
//! most-significant-bit first into whole bytes. [`AsciiBitWriter`] and [`AsciiBitReader`]
//! spell every bit out as an ASCII `'0'` or `'1'`, which makes a payload readable in a text editor.
//!
//! Both pairs implement [`BitSink`] and [`BitSource`], so the code tree never needs to know
//! which representation it is talking to.
use std::io::{self, Read, Write};

/// Something that accepts single bits.
pub trait BitSink {
    fn write_bit(&mut self, bit: bool) -> io::Result<()>;
}

/// Something that produces single bits.
pub trait BitSource {
    fn read_bit(&mut self) -> io::Result<bool>;

    /// Whether the source has run past the end of its data and is making bits up.
    fn is_exhausted(&self) -> bool {
        false
    }
}

impl<T: BitSink + ?Sized> BitSink for &mut T {
    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        (**self).write_bit(bit)
    }
}

impl<T: BitSource + ?Sized> BitSource for &mut T {
    fn read_bit(&mut self) -> io::Result<bool> {
        (**self).read_bit()
    }

    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }
}

/// Packs bits MSB-first into a one-byte buffer, writing each byte once it is full.
///
/// A trailing partial byte is only written by [`flush`](BitWriter::flush), so callers must
/// flush once at the end of the payload.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    inner: W,
    buffer: u8,
    bits: u8,
}

impl<W: Write> BitWriter<W> {
    pub const fn new(inner: W) -> Self {
        Self { inner, buffer: 0, bits: 0 }
    }

    /// Writes the buffered partial byte, zero-padded in its low bits, and clears the buffer.
    ///
    /// Does nothing when no bits are pending.
    pub fn flush(&mut self) -> io::Result<()> {
        if self.bits == 0 {
            return Ok(());
        }
        self.inner.write_all(&[self.buffer])?;
        self.buffer = 0;
        self.bits = 0;
        Ok(())
    }

    /// Flushes the pending bits and hands back the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    #[inline]
    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        if bit {
            self.buffer |= 0x80 >> self.bits;
        }
        self.bits += 1;
        if self.bits == 8 {
            self.inner.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.bits = 0;
        }
        Ok(())
    }
}

/// Unpacks bits MSB-first from a byte stream.
///
/// Once the underlying stream is exhausted every further read yields a zero bit. Reads never
/// fail at end of data; [`BitSource::is_exhausted`] tells the caller padding is being produced.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    inner: R,
    buffer: u8,
    consumed: u8,
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    /// Wraps `inner` and reads the first byte.
    pub fn new(inner: R) -> io::Result<Self> {
        let mut reader = Self {
            inner,
            buffer: 0,
            consumed: 0,
            exhausted: false,
        };
        reader.refill()?;
        Ok(reader)
    }

    fn refill(&mut self) -> io::Result<()> {
        self.consumed = 0;
        if self.exhausted {
            self.buffer = 0;
            return Ok(());
        }
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => {
                    self.exhausted = true;
                    self.buffer = 0;
                    return Ok(());
                }
                Ok(_) => {
                    self.buffer = byte[0];
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> BitSource for BitReader<R> {
    #[inline]
    fn read_bit(&mut self) -> io::Result<bool> {
        if self.consumed == 8 {
            self.refill()?;
        }
        let bit = self.buffer & (0x80 >> self.consumed) != 0;
        self.consumed += 1;
        Ok(bit)
    }

    /// True once a read had to go past the last byte of the stream.
    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Writes each bit as one ASCII byte, `b'0'` or `b'1'`.
#[derive(Debug)]
pub struct AsciiBitWriter<W: Write> {
    inner: W,
}

impl<W: Write> AsciiBitWriter<W> {
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> BitSink for AsciiBitWriter<W> {
    #[inline]
    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.inner.write_all(if bit { b"1" } else { b"0" })
    }
}

/// Reads bits written by [`AsciiBitWriter`].
///
/// Unlike [`BitReader`] this has no padding to fall back on, so running out of input is an
/// [`UnexpectedEof`](io::ErrorKind::UnexpectedEof) error and any byte other than `'0'`/`'1'`
/// is [`InvalidData`](io::ErrorKind::InvalidData).
#[derive(Debug)]
pub struct AsciiBitReader<R: Read> {
    inner: R,
}

impl<R: Read> AsciiBitReader<R> {
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> BitSource for AsciiBitReader<R> {
    fn read_bit(&mut self) -> io::Result<bool> {
        let mut byte = [0u8; 1];
        self.inner.read_exact(&mut byte)?;
        match byte[0] {
            b'0' => Ok(false),
            b'1' => Ok(true),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected '0' or '1' in bit payload, found byte {:#04x}", other),
            )),
        }
    }
}
