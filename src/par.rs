//! Provides deserializer of par file.
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::num::{ParseFloatError, ParseIntError};
use std::ops::Range;
use std::str::FromStr;

use crate::mesh::MeshUnit;
use crate::{Parameter, Transformer};

/// Deserialize par-formatted [`&str`] into a [`Transformer`].
///
/// Use `format` argument to specify the format of `s`.
///
/// This fills by 0.0 for altitude parameter when [`Format::TKY2JGD`] or [`Format::PatchJGD`] given,
/// and for latitude and longitude when [`Format::PatchJGD_H`] or [`Format::HyokoRev`] given.
///
/// # Errors
///
/// Returns [`Err`] when the invalid data found.
///
/// # Example
///
/// ```
/// # use parshift::{Parameter, Format};
/// # use parshift::par::from_str;
/// # use parshift::mesh::MeshUnit;
/// let s = "<15 lines>\n".repeat(15)
///     + "MeshCode dB(sec)  dL(sec) dH(m)\n"
///     + "12345678   0.00001   0.00002   0.00003\n";
/// let tf = from_str(&s, Format::SemiDynaEXE)?;
///
/// assert_eq!(tf.unit(), MeshUnit::Five);
/// assert_eq!(
///     tf.parameter().get(&12345678),
///     Some(&Parameter::new(0.00001, 0.00002, 0.00003))
/// );
/// # Ok::<(), parshift::par::ParseParError>(())
/// ```
#[inline]
pub fn from_str(s: &str, format: Format) -> Result<Transformer, ParseParError> {
    Parser::new(format).parse(s)
}

/// Represents format of par-formatted text.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(non_camel_case_types)]
pub enum Format {
    TKY2JGD,
    PatchJGD,
    PatchJGD_H,
    /// The format of composition of PatchJGD and PatchJGD(H) par files.
    ///
    /// It fills by zero for the parameters of remaining transformation
    /// in areas where only a part of the transformation is supported.
    /// The composite data is in the same layout as SemiDynaEXE.
    PatchJGD_HV,
    HyokoRev,
    SemiDynaEXE,
    geonetF3,
    ITRF2014,
}

/// The column layout of a [`Format`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Layout {
    /// The number of header lines.
    pub header: usize,
    /// The byte range of meshcode.
    pub meshcode: Range<usize>,
    /// The byte range of latitude, [`None`] if absent.
    pub latitude: Option<Range<usize>>,
    /// The byte range of longitude, [`None`] if absent.
    pub longitude: Option<Range<usize>>,
    /// The byte range of altitude, [`None`] if absent.
    pub altitude: Option<Range<usize>>,
    /// The mesh unit of the grid.
    pub unit: MeshUnit,
}

const TKY2JGD: Layout = Layout {
    header: 2,
    meshcode: 0..8,
    latitude: Some(9..18),
    longitude: Some(19..28),
    altitude: None,
    unit: MeshUnit::One,
};

const PATCH_JGD: Layout = Layout {
    header: 16,
    meshcode: 0..8,
    latitude: Some(9..18),
    longitude: Some(19..28),
    altitude: None,
    unit: MeshUnit::One,
};

const PATCH_JGD_H: Layout = Layout {
    header: 16,
    meshcode: 0..8,
    latitude: None,
    longitude: None,
    altitude: Some(9..18),
    unit: MeshUnit::One,
};

const HYOKO_REV: Layout = Layout {
    header: 16,
    meshcode: 0..8,
    latitude: None,
    longitude: None,
    altitude: Some(12..21),
    unit: MeshUnit::One,
};

const PATCH_JGD_HV: Layout = Layout {
    header: 16,
    meshcode: 0..8,
    latitude: Some(9..18),
    longitude: Some(19..28),
    altitude: Some(29..38),
    unit: MeshUnit::One,
};

const SEMI_DYNA_EXE: Layout = Layout {
    header: 16,
    meshcode: 0..8,
    latitude: Some(9..18),
    longitude: Some(19..28),
    altitude: Some(29..38),
    unit: MeshUnit::Five,
};

const GEONET: Layout = Layout {
    header: 18,
    meshcode: 0..8,
    latitude: Some(12..21),
    longitude: Some(22..31),
    altitude: Some(32..41),
    unit: MeshUnit::Five,
};

impl Format {
    /// All formats.
    pub const ALL: [Format; 8] = [
        Self::TKY2JGD,
        Self::PatchJGD,
        Self::PatchJGD_H,
        Self::PatchJGD_HV,
        Self::HyokoRev,
        Self::SemiDynaEXE,
        Self::geonetF3,
        Self::ITRF2014,
    ];

    /// Returns the column layout.
    #[inline]
    #[must_use]
    pub const fn layout(&self) -> &'static Layout {
        match self {
            Self::TKY2JGD => &TKY2JGD,
            Self::PatchJGD => &PATCH_JGD,
            Self::PatchJGD_H => &PATCH_JGD_H,
            Self::HyokoRev => &HYOKO_REV,
            Self::PatchJGD_HV => &PATCH_JGD_HV,
            Self::SemiDynaEXE => &SEMI_DYNA_EXE,
            Self::geonetF3 | Self::ITRF2014 => &GEONET,
        }
    }

    /// Returns the unit.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::Format;
    /// # use parshift::mesh::MeshUnit;
    /// assert_eq!(Format::TKY2JGD.mesh_unit(), MeshUnit::One);
    /// assert_eq!(Format::SemiDynaEXE.mesh_unit(), MeshUnit::Five);
    /// ```
    #[inline]
    #[must_use]
    pub const fn mesh_unit(&self) -> MeshUnit {
        self.layout().unit
    }

    /// Returns the name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TKY2JGD => "TKY2JGD",
            Self::PatchJGD => "PatchJGD",
            Self::PatchJGD_H => "PatchJGD_H",
            Self::PatchJGD_HV => "PatchJGD_HV",
            Self::HyokoRev => "HyokoRev",
            Self::SemiDynaEXE => "SemiDynaEXE",
            Self::geonetF3 => "geonetF3",
            Self::ITRF2014 => "ITRF2014",
        }
    }

    /// Guesses the format from a file stem, case-insensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::Format;
    /// assert_eq!(Format::guess("SemiDyna2023"), Format::SemiDynaEXE);
    /// assert_eq!(Format::guess("touhokutaiheiyouoki2011_h"), Format::PatchJGD_H);
    /// assert_eq!(Format::guess("touhokutaiheiyouoki2011"), Format::PatchJGD);
    /// ```
    #[must_use]
    pub fn guess(stem: &str) -> Self {
        if let Ok(format) = stem.parse() {
            return format;
        }

        let s = stem.to_lowercase();
        if s.ends_with("geonetf3") {
            Self::geonetF3
        } else if s.ends_with("itrf2014") {
            Self::ITRF2014
        } else if s.starts_with("hyokorev") {
            Self::HyokoRev
        } else if s.ends_with("_h") {
            Self::PatchJGD_H
        } else if s.starts_with("semidyna") {
            Self::SemiDynaEXE
        } else if s == "tky2jgd" {
            Self::TKY2JGD
        } else {
            Self::PatchJGD
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An error which can be returned on parsing [`Format`].
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
#[error("unknown format: '{0}'")]
pub struct ParseFormatError(String);

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| ParseFormatError(s.to_string()))
    }
}

/// Parser of par-formatted [`&str`].
///
/// # Example
///
/// ```
/// # use parshift::{Parameter, Format};
/// # use parshift::par::Parser;
/// let s = "JGD2000-TokyoDatum Ver.2.1.2\n\
///     MeshCode   dB(sec)   dL(sec)\n\
///     12345678   0.00001   0.00002\n";
/// let tf = Parser::new(Format::TKY2JGD).parse(s)?;
///
/// assert_eq!(
///     tf.parameter().get(&12345678),
///     Some(&Parameter::new(0.00001, 0.00002, 0.0))
/// );
/// assert_eq!(
///     tf.description(),
///     Some("JGD2000-TokyoDatum Ver.2.1.2\nMeshCode   dB(sec)   dL(sec)")
/// );
/// # Ok::<(), parshift::par::ParseParError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    format: Format,
}

impl Parser {
    /// Makes a parser.
    #[inline]
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Deserialize par-formatted [`&str`] into a [`Transformer`].
    ///
    /// The header lines become the description.
    ///
    /// # Errors
    ///
    /// If the header is short or a column is missing or malformed.
    pub fn parse(&self, s: &str) -> Result<Transformer, ParseParError> {
        let (parameter, description) = self.parse_parameter(s)?;
        Ok(Transformer::with_description(
            self.format.mesh_unit(),
            parameter,
            description,
        ))
    }

    /// Deserialize par-formatted [`&str`] into a [`Transformer`] with `description`.
    ///
    /// # Errors
    ///
    /// Same as [`Parser::parse`].
    pub fn parse_with_description(
        &self,
        s: &str,
        description: impl Into<String>,
    ) -> Result<Transformer, ParseParError> {
        let (parameter, _) = self.parse_parameter(s)?;
        Ok(Transformer::with_description(
            self.format.mesh_unit(),
            parameter,
            description.into(),
        ))
    }

    fn parse_parameter(&self, s: &str) -> Result<(HashMap<u32, Parameter>, String), ParseParError> {
        let layout = self.format.layout();

        let mut lines = s.lines().enumerate();

        let header: Vec<&str> = lines.by_ref().take(layout.header).map(|(_, l)| l).collect();
        if header.len() < layout.header {
            return Err(ParseParError::new(
                header.len(),
                0..header.last().map_or(0, |l| l.len()),
                ParseParErrorKind::Header {
                    expected: layout.header,
                },
                Column::Meshcode,
            ));
        }

        let mut parameter = HashMap::new();
        for (index, line) in lines {
            if line.trim().is_empty() {
                continue;
            }

            let lineno = index + 1;

            let meshcode = column(line, lineno, &layout.meshcode, Column::Meshcode)?;
            let meshcode: u32 = meshcode.parse().map_err(|e| {
                ParseParError::new(
                    lineno,
                    layout.meshcode.clone(),
                    ParseParErrorKind::ParseInt(e),
                    Column::Meshcode,
                )
            })?;

            let latitude = value(line, lineno, layout.latitude.as_ref(), Column::Latitude)?;
            let longitude = value(line, lineno, layout.longitude.as_ref(), Column::Longitude)?;
            let altitude = value(line, lineno, layout.altitude.as_ref(), Column::Altitude)?;

            parameter.insert(meshcode, Parameter::new(latitude, longitude, altitude));
        }

        parameter.shrink_to_fit();

        tracing::debug!(
            format = %self.format,
            count = parameter.len(),
            "parsed par"
        );

        Ok((parameter, header.join("\n")))
    }
}

/// Returns the trimmed column of `line`.
fn column<'a>(
    line: &'a str,
    lineno: usize,
    range: &Range<usize>,
    column: Column,
) -> Result<&'a str, ParseParError> {
    line.get(range.clone())
        .map(str::trim)
        .ok_or_else(|| {
            ParseParError::new(lineno, range.clone(), ParseParErrorKind::ColumnNotFound, column)
        })
}

/// Returns the value of the column, `0.0` if the layout does not have it.
fn value(
    line: &str,
    lineno: usize,
    range: Option<&Range<usize>>,
    column: Column,
) -> Result<f64, ParseParError> {
    let Some(range) = range else {
        return Ok(0.0);
    };

    self::column(line, lineno, range, column)?
        .parse()
        .map_err(|e| {
            ParseParError::new(lineno, range.clone(), ParseParErrorKind::ParseFloat(e), column)
        })
}

//
// Error
//

/// An error which can be returned on parsing par-formatted text.
///
/// This error is used as the error type for the [`from_str`].
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
#[error("parse error: {column} at l{lineno}:{start}:{end}", start = .range.start, end = .range.end)]
pub struct ParseParError {
    /// Error kind
    #[source]
    kind: ParseParErrorKind,
    /// Error column
    pub column: Column,
    /// Lineno of the data
    pub lineno: usize,
    /// Byte range of the column
    pub range: Range<usize>,
}

/// An error kind of [`ParseParError`].
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum ParseParErrorKind {
    /// The text is shorter than the header.
    #[error("header requires {expected} lines")]
    Header {
        /// The number of header lines of the format
        expected: usize,
    },
    /// The line is shorter than the column.
    #[error("column not found")]
    ColumnNotFound,
    #[error(transparent)]
    ParseInt(ParseIntError),
    #[error(transparent)]
    ParseFloat(ParseFloatError),
}

/// A column that error occurs.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Column {
    Meshcode,
    Latitude,
    Longitude,
    Altitude,
}

impl ParseParError {
    #[cold]
    fn new(lineno: usize, range: Range<usize>, kind: ParseParErrorKind, column: Column) -> Self {
        Self {
            kind,
            column,
            lineno,
            range,
        }
    }

    /// Returns the detailed cause.
    pub const fn kind(&self) -> &ParseParErrorKind {
        &self.kind
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Self::Meshcode => "meshcode",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Altitude => "altitude",
        })
    }
}
