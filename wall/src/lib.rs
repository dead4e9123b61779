//! Sticky-note wall engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It draws a
//! wall of paper notes on a `<canvas>`: each note's outline is four cubic
//! Bezier edges that curl toward the pointer, text is wrapped and laid out
//! glyph by glyph along the bent paper, and pressing on a note lifts it off
//! the wall so it can be dragged and dropped back down. The host page only
//! calls [`api`]'s `createInstance` and `prepareText`; everything else runs
//! inside the crate.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`api`] | `WallApi` factory and the `#[wasm_bindgen]` exports |
//! | [`wall`] | Testable [`wall::WallCore`] and the canvas-bound [`wall::Wall`] |
//! | [`viewport`] | Resting/active notes, spatial index and the animation slot |
//! | [`input`] | Pointer gesture state machine |
//! | [`animation`] | Pick-up/drop animations, descriptors and the frame clock |
//! | [`note`] | Note model: corner heights, boundary curves, text |
//! | [`quadtree`] | Region quadtree over note positions |
//! | [`layout`] | Text wrapping and glyph placement on the curves |
//! | [`metrics`] | Glyph width cache behind the `TextMeasure` contract |
//! | [`bezier`] | Cubic Bezier evaluation and the four-edge boundary |
//! | [`render`] | Drawing notes through the `RenderSurface` contract |
//! | [`camera`] | Points and the pan/zoom frame |
//! | [`config`] | Host-supplied configuration |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants (note size, heights, fonts) |

pub mod animation;
pub mod api;
pub mod bezier;
pub mod camera;
pub mod config;
pub mod consts;
pub mod error;
pub mod input;
pub mod layout;
pub mod metrics;
pub mod note;
pub mod quadtree;
pub mod render;
pub mod viewport;
pub mod wall;

#[cfg(test)]
mod test_support;
