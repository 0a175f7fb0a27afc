// Copyright 2023 Strixpyrr
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! ## How it works
//!
//! Elements are stored in a single contiguous allocation of *rooms*, or slots.
//! A [`Storage`] allocates all of its rooms up front and default-constructs every
//! one of them, so any room below the capacity may be indexed, even past the
//! live elements. Live elements fill the allocation from the front, up to the
//! *tail*.
//!
//! A [`Buffer`] wraps a storage with a read cursor. Writes land at the tail and
//! grow the storage when it runs out of rooms: single elements double the
//! capacity, and slices grow it by exactly their length. Reads consume elements
//! from the cursor, which can be moved back or repositioned within the live
//! range. Clearing rewinds both the tail and the cursor without destroying
//! anything, so old elements stay in their rooms until overwritten.
//!
//! ### Errors
//!
//! Allocation never aborts from a fallible call: running out of memory returns
//! [`Error::NoResource`], leaving the storage as it was. Out-of-range positions
//! passed to checked operations return [`Error::OutOfRange`], while indexing
//! past the capacity panics. Each error maps to a numeric [`Code`].
//!
//! ### Byte buffers
//!
//! [`ByteBuffer`] adds string conversion, hex dumps, and [`std::io`] read and
//! write support over a buffer of bytes.

mod error;
mod rooms;
pub mod storage;
mod buffer;
pub mod byte_buffer;

pub use error::*;
pub use rooms::*;
pub use storage::Storage;
pub use buffer::Buffer;
pub use byte_buffer::ByteBuffer;
