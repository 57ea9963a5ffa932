//! # Image Intake - Validated Image Uploads
//!
//! Accepts a single uploaded image, stores it under a generated name and
//! keeps it only if it passes every validation stage, built on Clean
//! Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Formats, size bounds, stored names, rejection kinds
//! - **Application**: The upload use case, its stages and ports
//! - **Infrastructure**: Local filesystem storage and image inspection
//! - **API**: HTTP handlers, router and OpenAPI document
//!
//! ## Pipeline
//!
//! 1. Exactly one file with a declared PNG, JPEG, GIF or SVG type
//! 2. Streamed to disk as `<unix-ms>-<random><ext>` under a size cap
//! 3. Stored size between 2 KiB and 10 MiB
//! 4. Content sniffed from magic bytes, checked against the allow-list
//! 5. Fully decoded to prove the image is structurally sound
//!
//! A rejected file is removed again before the error is returned.
//!
//! ## Example Usage
//!
//! ```no_run
//! use image_intake::{application::builder::ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = ApplicationBuilder::new(Config::from_env())
//!     .with_infrastructure()
//!     .await?
//!     .build()?;
//! let app = image_intake::api::create_router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
