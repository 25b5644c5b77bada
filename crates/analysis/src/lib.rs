//! # Raster Analysis Library
//!
//! Batch analysis of a single 8-bit grayscale raster: gradient and Laplacian
//! edge maps, Otsu and percentile binarization, morphological cleanup with
//! object counting, Freeman chain-code tracing, box filtering and intensity
//! quantization.
//!
//! ## Core Features
//!
//! - **Literal border policy**: convolution and morphology never compute the
//!   band within the kernel offset of an edge; it stays 0
//! - **Fresh outputs**: every stage allocates a new raster, sources are never mutated
//! - **Pipeline System**: run the full batch, optionally fanned out over rayon
//! - **Command facade**: run one stage at a time through [`Analyzer`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use analysis::{Pipeline, load_image};
//!
//! let pipeline = Pipeline::builder().build()?;
//!
//! let image = load_image("cells.png")?;
//! let report = pipeline.process(&image)?;
//! println!("objects: {}", report.object_count);
//!
//! report.save("out")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Single Stages
//!
//! ```rust,no_run
//! use analysis::{OtsuThresholder, ContourTracer};
//!
//! let gray = image::open("cells.png")?.to_luma8();
//! let binary = OtsuThresholder.binarize(&gray);
//! println!("{}", ContourTracer.trace(&binary));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod io;
pub mod manager;

// Re-exports for convenience
pub use error::{AnalysisError, Result};
pub use types::*;
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use io::*;
pub use manager::{Analyzer, AnalysisCommand, StageOutput};
