//! Declarative description of reference frames and conversions
//!
//! Declarations are the loosely typed input of
//! [`ReferenceFrameGraph::build`](crate::ReferenceFrameGraph::build): transformation
//! kinds and numeric attributes are kept as text and validated when the graph
//! is constructed. They are usually produced by the XML reader in
//! [`crate::xml`].

use crate::error::{Error, Result};
use crate::transform::Transform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A reference frame entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDecl {
    pub id: String,
    pub name: String,
}

impl FrameDecl {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A primitive transformation entry: a kind tag plus raw attributes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformDecl {
    pub kind: String,
    pub attributes: BTreeMap<String, String>,
}

impl TransformDecl {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with(mut self, attr: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(attr.into(), value.into());
        self
    }

    fn attribute(&self, attr: &str) -> Option<&str> {
        self.attributes.get(attr).map(String::as_str)
    }

    fn f64_attr(&self, attr: &'static str, element: &str) -> Result<Option<f64>> {
        self.attribute(attr)
            .map(|value| parse_f64(value, attr, element))
            .transpose()
    }

    fn center_attr(&self, element: &str) -> Result<(f64, f64)> {
        match self.attribute("center") {
            Some(value) => parse_center(value, element),
            None => Ok((0.0, 0.0)),
        }
    }

    /// Validate the declaration and turn it into a [`Transform`]
    ///
    /// `context` names the enclosing conversion in error messages.
    pub fn to_transform(&self, context: &str) -> Result<Transform> {
        let element = format!("{} of {}", self.kind, context);
        match self.kind.as_str() {
            "Translation" => {
                let dx = self.f64_attr("x", &element)?.unwrap_or(0.0);
                let dy = self.f64_attr("y", &element)?.unwrap_or(0.0);
                let dz = self.f64_attr("z", &element)?.unwrap_or(0.0);
                Ok(Transform::translation(dx, dy, dz))
            }
            "Rotation" => {
                let angle = self.f64_attr("angle", &element)?.ok_or_else(|| {
                    Error::MissingRequiredAttribute {
                        element: element.clone(),
                        attr: "angle",
                    }
                })?;
                let (xc, yc) = self.center_attr(&element)?;
                Ok(Transform::rotation(angle, xc, yc))
            }
            "Homothecy" => {
                let kh = self.f64_attr("kh", &element)?.unwrap_or_else(|| {
                    log::warn!("{}: horizontal ratio 'kh' is not set, using 1", element);
                    1.0
                });
                let kv = self.f64_attr("kv", &element)?.unwrap_or_else(|| {
                    log::warn!("{}: vertical ratio 'kv' is not set, using 1", element);
                    1.0
                });
                let (xc, yc) = self.center_attr(&element)?;
                Ok(Transform::homothecy(kh, kv, xc, yc))
            }
            other => Err(Error::UnknownTransformKind(other.to_string())),
        }
    }
}

impl From<&Transform> for TransformDecl {
    fn from(transform: &Transform) -> Self {
        let decl = TransformDecl::new(transform.kind());
        match *transform {
            Transform::Translation { dx, dy, dz } => decl
                .with("x", dx.to_string())
                .with("y", dy.to_string())
                .with("z", dz.to_string()),
            Transform::Rotation { angle, xc, yc } => decl
                .with("angle", angle.to_string())
                .with("center", format!("{},{}", xc, yc)),
            Transform::Homothecy { kh, kv, xc, yc } => decl
                .with("kh", kh.to_string())
                .with("kv", kv.to_string())
                .with("center", format!("{},{}", xc, yc)),
        }
    }
}

/// A declared conversion between two frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionDecl {
    pub from: String,
    pub to: String,
    pub transforms: Vec<TransformDecl>,
}

impl ConversionDecl {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            transforms: Vec::new(),
        }
    }

    /// Builder-style transformation append
    pub fn then(mut self, transform: TransformDecl) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Human-readable label used in diagnostics
    pub fn label(&self) -> String {
        format!("conversion '{}' -> '{}'", self.from, self.to)
    }
}

/// Complete description of a set of reference frames
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceFrameConfig {
    pub frames: Vec<FrameDecl>,
    pub conversions: Vec<ConversionDecl>,
}

impl ReferenceFrameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an XML configuration document
    pub fn from_xml(xml: &str) -> Result<Self> {
        crate::xml::parse_config(xml)
    }

    /// Read and parse an XML configuration file
    pub fn from_xml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }

    pub fn with_frame(mut self, frame: FrameDecl) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn with_conversion(mut self, conversion: ConversionDecl) -> Self {
        self.conversions.push(conversion);
        self
    }
}

fn parse_f64(value: &str, attr: &'static str, element: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| Error::InvalidAttribute {
        element: element.to_string(),
        attr,
        value: value.to_string(),
    })
}

fn parse_center(value: &str, element: &str) -> Result<(f64, f64)> {
    let invalid = || Error::InvalidAttribute {
        element: element.to_string(),
        attr: "center",
        value: value.to_string(),
    };
    let mut parts = value.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(xc), Some(yc), None) => {
            let xc = xc.trim().parse().map_err(|_| invalid())?;
            let yc = yc.trim().parse().map_err(|_| invalid())?;
            Ok((xc, yc))
        }
        _ => Err(invalid()),
    }
}
