//! File format parsing layer for resource containers.
//!
//! This module turns the raw container bytes into a validated, structured
//! map that the [`ResourceContainer`](crate::rsrc::reader::ResourceContainer)
//! can slice without further bounds checks.
//!
//! # Module Organization
//!
//! - [`header`]: Parses the 16-byte header and locates both sections
//! - [`map`]: Parses the type list, reference lists and name list
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Header         │ ← header::parse()
//! ├─────────────────┤
//! │  Resource Data  │   length-prefixed payloads
//! ├─────────────────┤
//! │  Resource Map   │ ← map::parse()
//! │  (types, refs,  │
//! │   names)        │
//! └─────────────────┘
//! ```

pub mod header;
pub mod map;
