//! **mazerun-core**: geometry and wall-grid types shared by the mazerun
//! search and ranking crates.
//!
//! The search core never owns maze storage. It reads walls through the
//! [`GridView`] trait; [`WallGrid`] is a plain in-memory implementation for
//! callers that have nothing better.

pub mod geom;
pub mod walls;

pub use geom::{Point, Range};
pub use walls::{Direction, GridView, WallGrid};
