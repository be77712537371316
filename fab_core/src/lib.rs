//! # fab_core - Fabrication Calculation Engine
//!
//! `fab_core` turns 3D part dimensions into flat-pattern layouts, structural
//! checks and step-by-step shop instructions for plate and pipe work. All
//! inputs and outputs are JSON-serializable so the results can be handed to a
//! drawing front end, a CLI or any other consumer.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Forgiving input**: Missing dimensions give an empty result, not an error
//! - **Rich Errors**: Structured error types for what cannot be built
//!
//! ## Quick Start
//!
//! ```rust
//! use fab_core::calculations::cone::{calculate, ConeInput};
//! use fab_core::materials::Material;
//!
//! let input = ConeInput { d1_mm: 1000.0, d2_mm: 500.0, height_mm: 600.0, thickness_mm: 3.0 };
//! let result = calculate(&input, Material::Steel).unwrap();
//!
//! for metric in &result.metrics {
//!     println!("{}: {}", metric.label, metric.value);
//! }
//! assert!((result.number("slant_height_mm").unwrap() - 650.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - One calculator per shape family plus the dispatcher
//! - [`materials`] - Material densities and fastener tables
//! - [`settings`] - Shop-level tunables
//! - [`geometry`] - Guarded trigonometry and chord/sagitta helpers
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod geometry;
pub mod materials;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationRequest, CalculationResult, ShapeInput, ShapeKind};
pub use errors::{CalcError, CalcResult};
pub use materials::Material;
pub use settings::FabricationSettings;
