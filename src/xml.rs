use std::collections::HashSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::GsaError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).with_text(text)
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            if element.name == name {
                found.push(element);
            }
            let children: Vec<_> = element.elements().collect();
            stack.extend(children.into_iter().rev());
        }
        found
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Indent {
    #[default]
    Tab,
    Spaces(usize),
}

impl Indent {
    fn char_and_size(self) -> (u8, usize) {
        match self {
            Indent::Tab => (b'\t', 1),
            Indent::Spaces(size) => (b' ', size),
        }
    }
}

pub fn write_document<W: Write>(root: &Element, out: W, indent: Indent) -> Result<(), GsaError> {
    let (indent_char, indent_size) = indent.char_and_size();
    let mut writer = Writer::new_with_indent(out, indent_char, indent_size);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    write_element(&mut writer, root)?;
    writer.get_mut().write_all(b"\n").map_err(xml_error)?;
    Ok(())
}

pub fn to_string(root: &Element, indent: Indent) -> Result<String, GsaError> {
    let mut buffer = Vec::new();
    write_document(root, &mut buffer, indent)?;
    String::from_utf8(buffer).map_err(xml_error)
}

/// Serializes into a temp file next to `path`, then renames it into place.
///
/// With `overwrite == false` an existing file is left untouched and
/// `Ok(false)` is returned.
pub fn write_file(
    root: &Element,
    path: &Path,
    indent: Indent,
    overwrite: bool,
) -> Result<bool, GsaError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|err| GsaError::Filesystem(err.to_string()))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".gsa2xml")
        .suffix(".xml.tmp")
        .tempfile_in(parent)
        .map_err(|err| GsaError::Filesystem(err.to_string()))?;
    write_document(root, temp.as_file_mut(), indent)?;
    temp.as_file_mut()
        .flush()
        .map_err(|err| GsaError::Filesystem(err.to_string()))?;

    if overwrite {
        temp.persist(path)
            .map_err(|err| GsaError::Filesystem(err.to_string()))?;
        return Ok(true);
    }

    match temp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(err) if err.error.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(err) => Err(GsaError::Filesystem(err.to_string())),
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), GsaError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(xml_error);
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(xml_error)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(xml_error)
}

fn xml_error(err: impl std::fmt::Display) -> GsaError {
    GsaError::Xml(err.to_string())
}

fn reference_db<'a>(spuid: &'a Element, holder: &str) -> Option<&'a str> {
    match spuid.attribute("db") {
        Some(db) => Some(db),
        None if holder == "RelatedProject" => Some("BioProject"),
        None => None,
    }
}

/// Cross-reference SPUIDs with no matching `Identifier` SPUID in the same
/// tree. References into `external_dbs` are not checked.
pub fn dangling_references(root: &Element, external_dbs: &[&str]) -> Vec<String> {
    let mut identifiers = HashSet::new();
    let mut references = Vec::new();
    collect_spuids(root, &[], &mut identifiers, &mut references);

    references
        .into_iter()
        .filter(|(db, _, _)| !db.is_some_and(|db| external_dbs.contains(&db)))
        .filter(|(_, namespace, value)| !identifiers.contains(&(*namespace, *value)))
        .map(|(_, _, value)| value.to_string())
        .collect()
}

type SpuidKey<'a> = (Option<&'a str>, &'a str);

fn collect_spuids<'a>(
    element: &'a Element,
    ancestors: &[&'a str],
    identifiers: &mut HashSet<SpuidKey<'a>>,
    references: &mut Vec<(Option<&'a str>, Option<&'a str>, &'a str)>,
) {
    let mut path = ancestors.to_vec();
    path.push(element.name());

    for child in element.elements() {
        if child.name() == "SPUID" {
            let namespace = child.attribute("spuid_namespace");
            let value = child.children.iter().find_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            });
            let Some(value) = value else { continue };
            match element.name() {
                "Identifier" => {
                    identifiers.insert((namespace, value));
                }
                "RefId" => references.push((child.attribute("db"), namespace, value)),
                "ProjectID" if path.iter().rev().nth(1) == Some(&"RelatedProject") => {
                    references.push((reference_db(child, "RelatedProject"), namespace, value));
                }
                _ => {}
            }
        } else {
            collect_spuids(child, &path, identifiers, references);
        }
    }
}
