//! # reframe
//!
//! Conversion of surveyed point coordinates between named reference frames.
//!
//! This is the umbrella crate that provides convenient access to all reframe
//! functionality. You can use this crate to get everything in one place, or use
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: points, transformations, the reference frame graph and its XML configuration
//! - **I/O**: CSV batch translation of coordinate columns
//!
//! ## Quick Start
//!
//! ```rust
//! use reframe::prelude::*;
//!
//! let config = ReferenceFrameConfig::new()
//!     .with_frame(FrameDecl::new("L93", "Lambert 93"))
//!     .with_frame(FrameDecl::new("LOCAL", "Site grid"))
//!     .with_conversion(
//!         ConversionDecl::new("L93", "LOCAL")
//!             .then(TransformDecl::new("Translation").with("x", "100").with("y", "200"))
//!             .then(TransformDecl::new("Rotation").with("angle", "90")),
//!     );
//! let graph = ReferenceFrameGraph::build(&config).unwrap();
//!
//! let chain = graph.conversion("L93", "LOCAL").unwrap();
//! let local = chain.applied(Point::new(0.0, 0.0));
//! assert!((local.x + 200.0).abs() < 1e-9);
//! assert!((local.y - 100.0).abs() < 1e-9);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables io
//! - `io`: CSV batch translation

// Re-export core functionality
pub use reframe_core::*;

#[cfg(feature = "io")]
pub use reframe_io as io;

/// Convenient imports for common use cases
pub mod prelude {
    pub use reframe_core::*;

    #[cfg(feature = "io")]
    pub use reframe_io::{
        read_columns, translate_csv_file, CoordinateColumns, CsvTranslateOptions,
        CsvTranslation, Delimiter, IoError, RecordTranslator,
    };
}
