//! Output rendering for mortimer.
//!
//! This module turns a filled tile registry into the two artifacts: the
//! binary tile map and the atlas image.

mod atlas;
mod map;
mod png;

pub use atlas::{Atlas, AtlasAssembler};
pub use map::{MapFile, MapSerializer, MAP_HEADER_LEN, MAP_MAGIC, MAP_VERSION};
pub use png::{encode_atlas, format_for_path, load_slab, slab_from_image};
