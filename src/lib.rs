//! # parshift
//!
//! Coordinate transformation by _Gridded Correction Parameter_ (par file),
//! the 1 km or 5 km grid of latitude, longitude and altitude corrections
//! which the Geospatial Information Authority of Japan (GIAJ) distributes [^1].
//!
//! ```no_run
//! use std::error::Error;
//! use std::fs;
//!
//! use parshift::{Format, Point, Transformer};
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     // Deserialize par-formatted file, e.g. SemiDyna2023.par
//!     let s = fs::read_to_string("SemiDyna2023.par")?;
//!     let tf = Transformer::from_str(&s, Format::SemiDynaEXE)?;
//!
//!     // Makes the origin of transformation
//!     let origin = Point::new(35.0, 135.0, 2.34);
//!
//!     // Perform forward transformation resulting a Point
//!     let result = tf.forward(&origin)?;
//!     println!("Forward: {result:?}");
//!
//!     // Perform backward transformation
//!     let p = tf.backward(&result)?;
//!     println!("Backward: {p:?}");
//!
//!     // Perform verified backward transformation
//!     // that the error from the exact solution is less than Transformer::CRITERIA
//!     let q = tf.backward_safe(&result)?;
//!     println!("Verified Backward: {q:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! Features:
//!
//! - Supports offline transformation (no web API)
//! - Supports forward, backward and verified backward transformation
//! - Supports all [TKY2JGD], [PatchJGD], [PatchJGD(H)], [HyokoRev], [SemiDynaEXE]
//!   and [POS2JGD] (geonetF3 and ITRF2014)
//! - A [`Transformer`] is immutable, share it across threads by [`std::sync::Arc`]
//! - Optional `parshift` command line tool (feature `cli`)
//!
//! [TKY2JGD]: https://www.gsi.go.jp/sokuchikijun/tky2jgd.html
//! [PatchJGD]: https://vldb.gsi.go.jp/sokuchi/surveycalc/patchjgd/index.html
//! [PatchJGD(H)]: https://vldb.gsi.go.jp/sokuchi/surveycalc/patchjgd_h/index.html
//! [HyokoRev]: https://vldb.gsi.go.jp/sokuchi/surveycalc/hyokorev/hyokorev.html
//! [SemiDynaEXE]: https://vldb.gsi.go.jp/sokuchi/surveycalc/semidyna/web/index.html
//! [POS2JGD]: https://positions.gsi.go.jp/cdcs
//!
//! This package does not contain parameter files, download it from GIAJ [^2].
//!
//! # Logging
//!
//! It emits events through [`tracing`](https://crates.io/crates/tracing),
//! and never installs a subscriber.
//!
//! # Serialization and Deserialization
//!
//! ## Par File
//!
//! We provide API to parse par file, [`Transformer::from_str`] or [`par::from_str`].
//!
//! ## Json File
//!
//! It supports (de)serialization by [`serde` crate](https://crates.io/crates/serde)
//! for all `struct` including [`Transformer`]
//! only if the feature `serde` is enabled (default).
//!
//! ```
//! # #[cfg(feature = "serde")]
//! # fn main() -> serde_json::Result<()> {
//! use parshift::{Parameter, Transformer, TransformerBuilder};
//! use parshift::mesh::MeshUnit;
//!
//! let tf = TransformerBuilder::new(MeshUnit::One)
//!     .parameter(12345678, Parameter::new(1., 2., 3.))
//!     .build();
//!
//! // Serialize to json
//! let json = serde_json::to_string(&tf)?;
//! assert_eq!(
//!     json,
//!     r#"{"unit":1,"parameter":{"12345678":{"latitude":1.0,"longitude":2.0,"altitude":3.0}},"description":null}"#
//! );
//!
//! // Deserialize from json
//! let result: Transformer = serde_json::from_str(&json)?;
//! assert_eq!(result, tf);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "serde"))]
//! # fn main() {}
//! ```
//!
//! [^1]: Geospatial Information Authority of Japan (GIAJ, 国土地理院): <https://www.gsi.go.jp/>
//!       (English) <https://www.gsi.go.jp/ENGLISH/>.
//!
//! [^2]: TKY2JGD: <https://www.gsi.go.jp/sokuchikijun/tky2jgd_download.html>;
//!       PatchJGD, PatchJGD(H) and HyokoRev: <https://www.gsi.go.jp/sokuchikijun/sokuchikijun41012.html>;
//!       SemiDynaEXE: <https://www.gsi.go.jp/sokuchikijun/semidyna.html>;
//!       geonetF3 and ITRF2014 (POS2JGD): <https://positions.gsi.go.jp/cdcs/>.

#[doc(inline)]
pub use builder::TransformerBuilder;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use par::Format;
#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use stats::{StatisticalSummary, Statistics};
#[doc(inline)]
pub use transformer::{Correction, Parameter, Transformer};

mod builder;
#[cfg(feature = "serde")]
pub mod config;
pub mod dms;
pub mod error;
pub mod mesh;
pub mod par;
pub mod point;
pub mod stats;
pub mod transformer;
