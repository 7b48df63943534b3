use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One US state's demographic row (one row = one mark on the chart).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Two-letter state abbreviation; identity key of the row.
    #[serde(rename = "abbr")]
    pub abbreviation: String,
    pub poverty: f64,
    pub age: f64,
    pub income: f64,
    pub healthcare: f64,
    pub obesity: f64,
    pub smokes: f64,
}

impl Record {
    /// Read the numeric field behind a dimension.
    pub fn value(&self, dim: Dimension) -> f64 {
        match dim {
            Dimension::Poverty => self.poverty,
            Dimension::Age => self.age,
            Dimension::Income => self.income,
            Dimension::Healthcare => self.healthcare,
            Dimension::Obesity => self.obesity,
            Dimension::Smokes => self.smokes,
        }
    }
}

/// The six numeric metrics every record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Poverty,
    Age,
    Income,
    Healthcare,
    Obesity,
    Smokes,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Poverty,
        Dimension::Age,
        Dimension::Income,
        Dimension::Healthcare,
        Dimension::Obesity,
        Dimension::Smokes,
    ];

    /// Column / click-value key, e.g. `"healthcare"`.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Poverty => "poverty",
            Dimension::Age => "age",
            Dimension::Income => "income",
            Dimension::Healthcare => "healthcare",
            Dimension::Obesity => "obesity",
            Dimension::Smokes => "smokes",
        }
    }

    /// Human-readable name used on axis labels and in tooltips.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Poverty => "Poverty",
            Dimension::Age => "Age",
            Dimension::Income => "Income",
            Dimension::Healthcare => "Health Care",
            Dimension::Obesity => "Obesity",
            Dimension::Smokes => "Smokes",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Dimension {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|d| d.key() == s)
            .ok_or_else(|| ChartError::UnknownDimension(s.to_string()))
    }
}

/// Dimensions selectable on the horizontal axis, in label order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XDimension {
    #[default]
    Poverty,
    Smokes,
    Obesity,
}

impl XDimension {
    pub const ALL: [XDimension; 3] = [XDimension::Poverty, XDimension::Smokes, XDimension::Obesity];

    pub fn dimension(self) -> Dimension {
        match self {
            XDimension::Poverty => Dimension::Poverty,
            XDimension::Smokes => Dimension::Smokes,
            XDimension::Obesity => Dimension::Obesity,
        }
    }
}

impl From<XDimension> for Dimension {
    fn from(x: XDimension) -> Self {
        x.dimension()
    }
}

/// Dimensions selectable on the vertical axis, in label order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YDimension {
    #[default]
    Age,
    Income,
    Healthcare,
}

impl YDimension {
    pub const ALL: [YDimension; 3] = [YDimension::Age, YDimension::Income, YDimension::Healthcare];

    pub fn dimension(self) -> Dimension {
        match self {
            YDimension::Age => Dimension::Age,
            YDimension::Income => Dimension::Income,
            YDimension::Healthcare => Dimension::Healthcare,
        }
    }
}

impl From<YDimension> for Dimension {
    fn from(y: YDimension) -> Self {
        y.dimension()
    }
}

/// A label click resolved to the axis it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPick {
    X(XDimension),
    Y(YDimension),
}

impl FromStr for AxisPick {
    type Err = ChartError;

    /// The two axis groups have disjoint keys, so the key alone decides the axis.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(x) = XDimension::ALL.into_iter().find(|x| x.dimension().key() == s) {
            return Ok(AxisPick::X(x));
        }
        if let Some(y) = YDimension::ALL.into_iter().find(|y| y.dimension().key() == s) {
            return Ok(AxisPick::Y(y));
        }
        Err(ChartError::UnknownDimension(s.to_string()))
    }
}
