//! Target syntax trees.
//!
//! Back-ends build these while walking the layout; printing to text happens
//! once at the end, so indentation and escaping live in one place.

pub mod kotlin;
pub mod markup;
pub mod swift;
pub mod writer;

pub use kotlin::{KtArg, KtNode};
pub use markup::{AttrValue, Attrs, Markup};
pub use swift::SwiftNode;
pub use writer::CodeWriter;
