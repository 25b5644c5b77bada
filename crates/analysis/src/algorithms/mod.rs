pub mod convolution;
pub mod edges;
pub mod threshold;
pub mod morphology;
pub mod components;
pub mod contour;
pub mod smoothing;
pub mod quantize;

pub use convolution::*;
pub use edges::*;
pub use threshold::*;
pub use morphology::*;
pub use components::*;
pub use contour::*;
pub use smoothing::*;
pub use quantize::*;
