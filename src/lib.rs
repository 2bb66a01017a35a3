//! citymap renders named, colored city polygons onto a fixed-size raster map
//! and answers which city lies under a clicked pixel.
//!
//! The combined extent of all regions is fitted into a padded viewport with a
//! single uniform scale, so shapes keep their aspect ratio. Hit tests run the
//! exact inverse of that mapping.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod extent;
pub mod geom;
pub mod hit;
pub mod map;
mod raster;
pub mod region;
pub mod render;
pub mod source;
pub mod transform;
pub mod view;

pub use config::RenderOptions;
pub use error::{ConfigError, MapError, ParseColorError, SourceError};
pub use extent::{Extent, compute_extent};
pub use geom::{GeoPoint, Geometry, ScreenPoint, ScreenRect};
pub use hit::geometry_contains;
pub use map::{MapRenderer, fit_transform};
pub use region::{Region, RegionInfo};
pub use render::{Color, Legend, LegendEntry, LineStyle, MonospaceMeasurer, TextMeasurer, TextStyle};
pub use source::{JsonRegionSource, RegionSource, parse_regions};
pub use transform::Transform;
pub use view::{Padding, Range, Viewport};
