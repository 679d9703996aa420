pub mod card;
pub mod color;
pub mod geometry;
pub mod ids;

pub use card::{BackStrategy, CardPair, FillerCard};
pub use color::Color;
pub use geometry::{Axis, CardPosition, Layout, PageSize, PixelSize, DEFAULT_DPI, MM_PER_INCH, POINTS_PER_INCH};
pub use ids::{AtlasPageName, SheetId};
