//! regionmap - city region overview maps rendered from OpenStreetMap tiles.
//!
//! This library renders a composite raster image showing the named regions
//! of a city overlaid on a real base map, fetched tile by tile from the OSM
//! France HOT service.
//!
//! # Pipeline
//!
//! ```text
//! RegionSet ──► bounds ──► mode ──► tile range ──► fetch (parallel)
//!                                                     │
//!            bytes ◄── encode ◄── title ◄── overlay ◄─┴─ compose
//! ```
//!
//! Renders come in two modes: `Detailed` keeps every region at full tile
//! resolution and encodes losslessly, `Simplified` drops to a coarser zoom
//! and lossy encoding once a request grows past the detail limit. Individual
//! tile failures degrade the picture (blank cells) but never fail a render;
//! only an empty region set or an encoding problem surfaces as an error.
//!
//! # Example
//!
//! ```no_run
//! use regionmap::{GeneratorConfig, Region, RegionMapGenerator, RegionSet};
//! use regionmap::coord::RegionCoord;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut regions = RegionSet::new();
//! regions.insert("Akita#6".into(), Region::new(RegionCoord::new(10, 5)));
//! regions.insert("Akita#7".into(), Region::new(RegionCoord::new(11, 5)));
//!
//! let generator = RegionMapGenerator::new(GeneratorConfig::default())?;
//! let png = generator.generate_map("Akita", &regions, Some("Akita#7")).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod coord;
pub mod error;
pub mod fetcher;
pub mod generator;
pub mod mode;
pub mod provider;
pub mod region;
pub mod render;

pub use config::GeneratorConfig;
pub use error::MapError;
pub use generator::RegionMapGenerator;
pub use mode::RenderMode;
pub use region::{search_by_city, Region, RegionSet};
