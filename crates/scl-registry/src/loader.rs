//! Streaming SCL loader.
//!
//! Reads `DataTypeTemplates` into an [`InMemoryTypeRegistry`] and collects
//! substation `LNode`s and IED `LN0`/`LN` elements. Everything else in the
//! document is skipped.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use scl_types::{MemberClass, TemplateKind, TypeDefinition, TypedMember};

use crate::document::{LNodeRef, LnInstance, SclDocument};
use crate::error::{RegistryError, RegistryResult};
use crate::memory::InMemoryTypeRegistry;
use crate::traits::TypeRegistry;

/// Parse an SCL document from memory.
pub fn load_scl(xml: &[u8]) -> RegistryResult<SclDocument> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut builder = DocumentBuilder::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => builder.open(&e)?,
            Ok(Event::Empty(e)) => {
                builder.open(&e)?;
                builder.close();
            }
            Ok(Event::End(_)) => builder.close(),
            Ok(Event::Eof) => {
                if let Some(open) = builder.stack.last() {
                    return Err(RegistryError::Xml(format!(
                        "unexpected end of document inside <{open}>"
                    )));
                }
                break;
            }
            Err(e) => return Err(RegistryError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    let doc = builder.finish();
    debug!(
        templates = doc.registry().len(),
        lnodes = doc.lnodes().len(),
        lns = doc.logical_nodes().len(),
        "SCL document loaded"
    );
    Ok(doc)
}

/// Read and parse an SCL file.
pub fn load_scl_file(path: impl AsRef<Path>) -> RegistryResult<SclDocument> {
    let path = path.as_ref();
    let xml = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = xml.len(), "reading SCL file");
    load_scl(&xml)
}

#[derive(Default)]
struct DocumentBuilder {
    /// Local names of the currently open elements.
    stack: Vec<String>,
    /// Template being filled, with the stack depth it was opened at.
    template: Option<(usize, TypeDefinition)>,
    ied: Option<String>,
    ldevice: Option<String>,
    registry: InMemoryTypeRegistry,
    lnodes: Vec<LNodeRef>,
    lns: Vec<LnInstance>,
}

impl DocumentBuilder {
    fn open(&mut self, e: &BytesStart<'_>) -> RegistryResult<()> {
        let tag = local_tag(e)?;
        let parent = self.stack.last().map(String::as_str);

        match tag.as_str() {
            "LNodeType" | "DOType" | "DAType" | "EnumType"
                if parent == Some("DataTypeTemplates") =>
            {
                let kind = TemplateKind::from_tag(&tag)?;
                let mut definition = TypeDefinition::new(kind, required(e, &tag, "id")?);
                if let Some(cdc) = attr(e, "cdc")? {
                    definition = definition.with_classification(cdc);
                }
                self.template = Some((self.stack.len(), definition));
            }
            "DO" | "SDO" | "DA" | "BDA" => {
                if let Some((depth, definition)) = self.template.as_mut() {
                    if *depth + 1 == self.stack.len() {
                        let class = MemberClass::from_tag(&tag)?;
                        let name = required(e, &tag, "name")?;
                        let b_type = attr(e, "bType")?;
                        let type_ref = attr(e, "type")?;
                        definition.push_member(TypedMember::new(
                            name,
                            class,
                            b_type.as_deref(),
                            type_ref.as_deref(),
                        ));
                    }
                }
            }
            "LNode" if self.stack.iter().any(|t| t == "Substation") => {
                self.lnodes.push(LNodeRef {
                    ied_name: attr(e, "iedName")?,
                    ld_inst: attr(e, "ldInst")?,
                    prefix: attr(e, "prefix")?,
                    ln_class: required(e, &tag, "lnClass")?,
                    ln_inst: attr(e, "lnInst")?,
                    ln_type: attr(e, "lnType")?,
                });
            }
            "IED" if parent == Some("SCL") => self.ied = attr(e, "name")?,
            "LDevice" if self.ied.is_some() => self.ldevice = attr(e, "inst")?,
            "LN0" | "LN" if parent == Some("LDevice") => {
                if let (Some(ied_name), Some(ld_inst)) = (&self.ied, &self.ldevice) {
                    self.lns.push(LnInstance {
                        ied_name: ied_name.clone(),
                        ld_inst: ld_inst.clone(),
                        prefix: attr(e, "prefix")?,
                        ln_class: required(e, &tag, "lnClass")?,
                        inst: attr(e, "inst")?,
                        ln_type: attr(e, "lnType")?,
                    });
                }
            }
            _ => {}
        }

        self.stack.push(tag);
        Ok(())
    }

    fn close(&mut self) {
        let Some(tag) = self.stack.pop() else {
            return;
        };
        match tag.as_str() {
            "IED" => {
                self.ied = None;
                self.ldevice = None;
            }
            "LDevice" => self.ldevice = None,
            _ => {}
        }

        if matches!(&self.template, Some((depth, _)) if *depth == self.stack.len()) {
            if let Some((_, definition)) = self.template.take() {
                debug!(
                    key = %definition.key(),
                    members = definition.members().len(),
                    "type template loaded"
                );
                self.registry.insert(definition);
            }
        }
    }

    fn finish(self) -> SclDocument {
        SclDocument::new(self.registry, self.lnodes, self.lns)
    }
}

fn local_tag(e: &BytesStart<'_>) -> RegistryResult<String> {
    std::str::from_utf8(e.local_name().as_ref())
        .map(str::to_string)
        .map_err(|err| RegistryError::Xml(err.to_string()))
}

fn attr(e: &BytesStart<'_>, name: &str) -> RegistryResult<Option<String>> {
    for attribute in e.attributes() {
        let attribute = attribute.map_err(|err| RegistryError::Xml(err.to_string()))?;
        if attribute.key.local_name().as_ref() == name.as_bytes() {
            let value = attribute
                .unescape_value()
                .map_err(|err| RegistryError::Xml(err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn required(e: &BytesStart<'_>, element: &str, name: &str) -> RegistryResult<String> {
    attr(e, name)?.ok_or_else(|| RegistryError::MissingAttribute {
        element: element.to_string(),
        attribute: name.to_string(),
    })
}
