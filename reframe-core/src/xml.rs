//! XML reader for reference frame configurations
//!
//! ```xml
//! <Config>
//!   <ReferenceFrames>
//!     <ReferenceFrame id="L93" name="Lambert 93"/>
//!     <ReferenceFrame id="LOCAL" name="Site grid"/>
//!   </ReferenceFrames>
//!   <ChangesInReferenceFrames>
//!     <Transformation from="L93" to="LOCAL">
//!       <Translation x="100" y="200"/>
//!       <Rotation angle="90" center="0,0"/>
//!     </Transformation>
//!   </ChangesInReferenceFrames>
//! </Config>
//! ```
//!
//! Only attributes of frame and conversion entries are checked, not their tag
//! names. Transformation tags are kept verbatim and validated when the graph
//! is built.

use crate::config::{ConversionDecl, FrameDecl, ReferenceFrameConfig, TransformDecl};
use crate::error::{Error, Result};
use roxmltree::{Document, Node};

const FRAMES_SECTION: &str = "ReferenceFrames";
const CONVERSIONS_SECTION: &str = "ChangesInReferenceFrames";

/// Parse a configuration document
pub fn parse_config(xml: &str) -> Result<ReferenceFrameConfig> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let frames = section(&root, FRAMES_SECTION)?
        .enumerate()
        .map(|(i, node)| parse_frame(&node, i))
        .collect::<Result<Vec<_>>>()?;

    let conversions = section(&root, CONVERSIONS_SECTION)?
        .enumerate()
        .map(|(i, node)| parse_conversion(&node, i))
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Read {} reference frames and {} conversions",
        frames.len(),
        conversions.len()
    );

    Ok(ReferenceFrameConfig {
        frames,
        conversions,
    })
}

/// Element children of a required, non-empty section
fn section<'a, 'input: 'a>(
    root: &Node<'a, 'input>,
    name: &'static str,
) -> Result<impl Iterator<Item = Node<'a, 'input>>> {
    let node = root
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
        .ok_or(Error::MissingSection(name))?;

    if !node.children().any(|n| n.is_element()) {
        return Err(Error::MissingSection(name));
    }

    Ok(node.children().filter(|n| n.is_element()))
}

fn parse_frame(node: &Node, index: usize) -> Result<FrameDecl> {
    let element = format!("reference frame #{}", index);
    let id = required_attr(node, "id", &element)?;
    let name = required_attr(node, "name", &element)?;
    Ok(FrameDecl { id, name })
}

fn parse_conversion(node: &Node, index: usize) -> Result<ConversionDecl> {
    let element = format!("conversion #{}", index);
    let from = required_attr(node, "from", &element)?;
    let to = required_attr(node, "to", &element)?;

    let transforms = node
        .children()
        .filter(|n| n.is_element())
        .map(|n| parse_transform(&n))
        .collect();

    Ok(ConversionDecl {
        from,
        to,
        transforms,
    })
}

fn parse_transform(node: &Node) -> TransformDecl {
    TransformDecl {
        kind: node.tag_name().name().to_string(),
        attributes: node
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect(),
    }
}

fn required_attr(node: &Node, attr: &'static str, element: &str) -> Result<String> {
    node.attribute(attr)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingRequiredAttribute {
            element: element.to_string(),
            attr,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;

    const CONFIG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Config>
  <ReferenceFrames>
    <ReferenceFrame id="L93" name="Lambert 93"/>
    <ReferenceFrame id="LOCAL" name="Site grid"/>
  </ReferenceFrames>
  <ChangesInReferenceFrames>
    <!-- site grid -->
    <Transformation from="L93" to="LOCAL">
      <Translation x="100" y="200"/>
      <Rotation angle="90" center="0,0"/>
    </Transformation>
  </ChangesInReferenceFrames>
</Config>
"#;

    #[test]
    fn test_parse_config() {
        let config = parse_config(CONFIG).unwrap();
        assert_eq!(
            config.frames,
            vec![
                FrameDecl::new("L93", "Lambert 93"),
                FrameDecl::new("LOCAL", "Site grid"),
            ]
        );
        assert_eq!(config.conversions.len(), 1);

        let conversion = &config.conversions[0];
        assert_eq!(conversion.from, "L93");
        assert_eq!(conversion.to, "LOCAL");
        let transforms = conversion
            .transforms
            .iter()
            .map(|t| t.to_transform("test").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            transforms,
            vec![
                Transform::translation(100.0, 200.0, 0.0),
                Transform::rotation(90.0, 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_unknown_tags_are_kept_for_validation() {
        let xml = r#"<Config>
  <ReferenceFrames><ReferenceFrame id="A" name="a"/></ReferenceFrames>
  <ChangesInReferenceFrames>
    <Transformation from="A" to="A"><Shear k="2"/></Transformation>
  </ChangesInReferenceFrames>
</Config>"#;
        let config = parse_config(xml).unwrap();
        assert_eq!(config.conversions[0].transforms[0].kind, "Shear");
    }

    #[test]
    fn test_missing_sections() {
        let err = parse_config("<Config/>").unwrap_err();
        assert!(matches!(err, Error::MissingSection("ReferenceFrames")));

        let xml = r#"<Config>
  <ReferenceFrames><ReferenceFrame id="A" name="a"/></ReferenceFrames>
  <ChangesInReferenceFrames></ChangesInReferenceFrames>
</Config>"#;
        let err = parse_config(xml).unwrap_err();
        assert!(matches!(err, Error::MissingSection("ChangesInReferenceFrames")));
    }

    #[test]
    fn test_missing_required_attributes() {
        let xml = r#"<Config>
  <ReferenceFrames><ReferenceFrame id="A"/></ReferenceFrames>
  <ChangesInReferenceFrames><Transformation from="A" to="A"/></ChangesInReferenceFrames>
</Config>"#;
        let err = parse_config(xml).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredAttribute { attr: "name", ref element } if element == "reference frame #0"
        ));

        let xml = r#"<Config>
  <ReferenceFrames><ReferenceFrame id="A" name="a"/></ReferenceFrames>
  <ChangesInReferenceFrames><Transformation from="A"/></ChangesInReferenceFrames>
</Config>"#;
        let err = parse_config(xml).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredAttribute { attr: "to", .. }));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            parse_config("<Config><ReferenceFrames>"),
            Err(Error::Xml(_))
        ));
    }
}
