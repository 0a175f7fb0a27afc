// SPDX-License-Identifier: Apache-2.0

use amplify_derive::Display;

/// The capacity of a default-constructed storage or buffer.
pub const DEFAULT_VOLUME: usize = Rooms::V64.volume();

/// Named capacity presets, in slots.
#[derive(Copy, Clone, Debug, Default, Display, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(usize)]
pub enum Rooms {
	#[default]
	#[display("64")]
	V64  =    64,
	#[display("128")]
	V128 =   128,
	#[display("256")]
	V256 =   256,
	#[display("512")]
	V512 =   512,
	#[display("1K")]
	V1K  =  1024,
	#[display("2K")]
	V2K  =  2048,
	#[display("4K")]
	V4K  =  4096,
	#[display("8K")]
	V8K  =  8192,
	#[display("16K")]
	V16K = 16384,
}

impl Rooms {
	/// Returns the number of slots in this preset.
	#[inline]
	pub const fn volume(self) -> usize { self as usize }
}

impl From<Rooms> for usize {
	fn from(value: Rooms) -> Self { value.volume() }
}
