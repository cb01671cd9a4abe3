//! Renderers turning runtime values into markup fragments
//!
//! [`classes`] and [`style`] normalize class and style values. [`attr`] and
//! [`attrs`] produce attribute text ready to drop into an open tag: empty when
//! omitted, otherwise starting with a single space.

pub mod attr;
pub mod class;
pub mod style;

pub use attr::{attr, attrs};
pub use class::classes;
pub use style::style;
