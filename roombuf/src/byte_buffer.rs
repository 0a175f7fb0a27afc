// SPDX-License-Identifier: Apache-2.0

//! Byte buffers, with string conversion and dump helpers.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::io;
use log::trace;
use simdutf8::compat::from_utf8;
use crate::{Buffer, Error, Result};

/// A buffer of bytes.
pub type ByteBuffer = Buffer<u8>;

const CTRL_CODES: [&str; 0x20] = [
	"[NUL]", "[SOH]", "[STX]", "[ETX]", "[EOT]", "[ENQ]", "[ACK]", "[BEL]",
	"[ BS]", "[ HT]", "[ LF]", "[ VT]", "[ FF]", "[ CR]", "[ SO]", "[ SI]",
	"[DLE]", "[DC1]", "[DC2]", "[DC3]", "[DC4]", "[NAK]", "[SYN]", "[ETB]",
	"[CAN]", "[ EM]", "[SUB]", "[ESC]", "[ FS]", "[ GS]", "[ RS]", "[ US]",
];

/// Creates a full byte buffer holding the bytes of `value`, with exactly enough
/// capacity for them.
pub fn from_string(value: &str) -> Result<ByteBuffer> {
	ByteBuffer::try_from_values(value.bytes())
}

/// Copies the live bytes of `buffer` into a string, failing if they aren't valid
/// UTF-8.
pub fn to_string(buffer: &ByteBuffer) -> Result<String> {
	buffer.to_utf8().map(str::to_owned)
}

/// Dumps the live bytes of `buffer` as lowercase hex, two digits per byte.
pub fn hex_dump(buffer: &ByteBuffer) -> String {
	base16ct::lower::encode_string(buffer.as_slice())
}

/// Renders `bytes` with control and non-ASCII bytes replaced by bracketed
/// mnemonics, such as `[ LF]` for a line feed or `[e3H]` for `0xE3`.
pub fn to_readable_ctrl_code(bytes: &[u8]) -> String {
	let mut str = String::with_capacity(bytes.len());
	for &byte in bytes {
		match byte {
			0x00..=0x1f => str.push_str(CTRL_CODES[byte as usize]),
			0x20 => str.push_str("[SPC]"),
			0x7f => str.push_str("[DEL]"),
			0xff => str.push_str("[EOF]"),
			0x80..=0xfe => {
				// Writing to a String can't fail.
				let _ = write!(str, "[{byte:02x}H]");
			}
			_ => str.push(byte as char)
		}
	}
	str
}

impl ByteBuffer {
	/// Borrows the live bytes as a string slice, failing if they aren't valid
	/// UTF-8.
	pub fn to_utf8(&self) -> Result<&str> {
		Ok(from_utf8(self.as_slice())?)
	}

	/// Borrows the live bytes as a string, replacing invalid sequences with
	/// `U+FFFD`.
	pub fn to_string_lossy(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(self.as_slice())
	}
}

impl From<&str> for ByteBuffer {
	fn from(value: &str) -> Self { Self::from(value.as_bytes()) }
}

impl PartialEq<str> for ByteBuffer {
	fn eq(&self, other: &str) -> bool { self.as_slice() == other.as_bytes() }
}

impl PartialEq<&str> for ByteBuffer {
	fn eq(&self, other: &&str) -> bool { self == *other }
}

impl PartialEq<String> for ByteBuffer {
	fn eq(&self, other: &String) -> bool { self == other.as_str() }
}

impl PartialEq<ByteBuffer> for str {
	fn eq(&self, other: &ByteBuffer) -> bool { other == self }
}

impl PartialEq<ByteBuffer> for &str {
	fn eq(&self, other: &ByteBuffer) -> bool { other == *self }
}

impl PartialEq<ByteBuffer> for String {
	fn eq(&self, other: &ByteBuffer) -> bool { other == self.as_str() }
}

impl io::Write for ByteBuffer {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.append(buf)?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

impl io::Read for ByteBuffer {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let start = self.position();
		let count = buf.len().min(self.remaining());
		buf[..count].copy_from_slice(&self.as_slice()[start..start + count]);
		self.set_position(start + count)?;
		trace!("read {count} bytes from position {start}");
		Ok(count)
	}
}

/// Maps allocation failure to [`io::ErrorKind::OutOfMemory`], invalid UTF-8 to
/// [`io::ErrorKind::InvalidData`], and range errors to
/// [`io::ErrorKind::InvalidInput`].
impl From<Error> for io::Error {
	fn from(value: Error) -> Self {
		let kind = match value {
			Error::NoResource { .. } => io::ErrorKind::OutOfMemory,
			Error::Utf8 { .. } => io::ErrorKind::InvalidData,
			_ => io::ErrorKind::InvalidInput,
		};
		Self::new(kind, value)
	}
}
