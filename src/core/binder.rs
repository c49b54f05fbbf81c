//! XML wire binder.
//!
//! Every response is read into a small [`Element`] tree and then bound onto
//! typed records by one generic routine, [`decode_entity`], driven by the
//! per-type field table each record publishes through [`XmlEntity`].

use crate::domain::model::ServiceError;
use crate::utils::error::{CcbError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::io::BufRead;
use std::ops::Deref;

/// Outermost element of every CCB document.
pub const DOCUMENT_ROOT: &str = "ccb_api";

const ERRORS_ELEMENT: &str = "errors";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Where a field's raw value lives relative to the entity's element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Attribute,
    Element,
    /// The entity element's own text, e.g. `<creator id="4">Jane Doe</creator>`.
    Content,
}

/// How a raw value is converted and where it is stored.
pub enum Slot<T> {
    /// Raw text, whitespace included.
    Text(fn(&mut T, String)),
    Integer(fn(&mut T, i64)),
    Boolean(fn(&mut T, bool)),
    DateTime(fn(&mut T, NaiveDateTime)),
    Date(fn(&mut T, NaiveDate)),
    /// Child element holding a nested entity or a collection wrapper.
    Nested(fn(&mut T, &Element) -> Result<()>),
}

pub struct Field<T> {
    pub wire_name: &'static str,
    pub location: Location,
    pub slot: Slot<T>,
}

impl<T> Field<T> {
    pub fn attribute(wire_name: &'static str, slot: Slot<T>) -> Self {
        Self {
            wire_name,
            location: Location::Attribute,
            slot,
        }
    }

    pub fn element(wire_name: &'static str, slot: Slot<T>) -> Self {
        Self {
            wire_name,
            location: Location::Element,
            slot,
        }
    }

    pub fn content(slot: Slot<T>) -> Self {
        Self {
            wire_name: "",
            location: Location::Content,
            slot,
        }
    }
}

/// A record that can be bound from the wire format.
///
/// `fields()` is a subset of what CCB sends; anything not listed is skipped.
pub trait XmlEntity: Default {
    /// Element name of one instance, e.g. `campus`. Payloads use `response`.
    const ELEMENT: &'static str;

    fn fields() -> Vec<Field<Self>>;
}

/// Decoded `<response>`: service errors plus the operation payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope<P> {
    /// `None` when the document has no `<errors>` section at all.
    pub errors: Option<Vec<ServiceError>>,
    pub payload: P,
}

impl<P> Envelope<P> {
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }

    pub fn into_payload(self) -> P {
        self.payload
    }
}

impl<P> Deref for Envelope<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.payload
    }
}

/// Decode a full CCB document into `Envelope<P>`.
///
/// Accepts either the `<ccb_api>` document root or a bare `P::ELEMENT` root.
pub fn decode<P: XmlEntity, R: BufRead>(reader: R) -> Result<Envelope<P>> {
    let root = parse_document(reader)?;
    let response = locate_payload(&root, P::ELEMENT)?;

    let errors = response
        .child(ERRORS_ELEMENT)
        .map(decode_collection::<ServiceError>)
        .transpose()?;
    // A non-empty <errors> section outranks a payload that fails to bind.
    let payload = match decode_entity::<P>(response) {
        Ok(payload) => payload,
        Err(e) if errors.as_ref().is_some_and(|list| !list.is_empty()) => {
            tracing::debug!("Ignoring undecodable <{}> next to service errors: {}", P::ELEMENT, e);
            P::default()
        }
        Err(e) => return Err(e),
    };

    tracing::trace!(
        "Decoded <{}> with {} error element(s)",
        P::ELEMENT,
        errors.as_ref().map_or(0, Vec::len)
    );

    Ok(Envelope { errors, payload })
}

fn locate_payload<'a>(root: &'a Element, name: &str) -> Result<&'a Element> {
    if root.name == name {
        return Ok(root);
    }
    if root.name == DOCUMENT_ROOT {
        return root.child(name).ok_or_else(|| {
            CcbError::malformed(format!("<{}> has no <{}> element", DOCUMENT_ROOT, name))
        });
    }
    Err(CcbError::malformed(format!(
        "unexpected root element <{}>, expected <{}> or <{}>",
        root.name, DOCUMENT_ROOT, name
    )))
}

/// Bind one entity from its element using `T::fields()`.
pub fn decode_entity<T: XmlEntity>(element: &Element) -> Result<T> {
    let mut entity = T::default();

    for field in T::fields() {
        match field.location {
            Location::Attribute => {
                if let Some(raw) = element.attribute(field.wire_name) {
                    bind(&mut entity, &field, raw, element)?;
                }
            }
            Location::Content => bind(&mut entity, &field, &element.text, element)?,
            Location::Element => {
                if let Some(child) = element.child(field.wire_name) {
                    bind(&mut entity, &field, &child.text, child)?;
                }
            }
        }
    }

    Ok(entity)
}

/// Bind every `T::ELEMENT` child of a wrapper element, in document order.
pub fn decode_collection<T: XmlEntity>(wrapper: &Element) -> Result<Vec<T>> {
    wrapper
        .children_named(T::ELEMENT)
        .map(decode_entity::<T>)
        .collect()
}

fn bind<T>(entity: &mut T, field: &Field<T>, raw: &str, node: &Element) -> Result<()> {
    // Text keeps its whitespace; typed scalars are trimmed.
    let trimmed = raw.trim();

    match &field.slot {
        Slot::Text(set) => set(entity, raw.to_string()),
        Slot::Nested(set) => set(entity, node)?,
        // Empty typed scalars are treated as absent.
        _ if trimmed.is_empty() => {}
        Slot::Integer(set) => set(entity, parse_integer(field, trimmed)?),
        Slot::Boolean(set) => set(entity, parse_boolean(field, trimmed)?),
        Slot::DateTime(set) => set(entity, parse_date_time(field, trimmed)?),
        Slot::Date(set) => set(entity, parse_date(field, trimmed)?),
    }

    Ok(())
}

fn describe<T>(field: &Field<T>) -> String {
    match field.location {
        Location::Attribute => format!("attribute '{}'", field.wire_name),
        Location::Element => format!("element <{}>", field.wire_name),
        Location::Content => "element text".to_string(),
    }
}

fn parse_integer<T>(field: &Field<T>, raw: &str) -> Result<i64> {
    raw.parse().map_err(|_| {
        CcbError::malformed(format!("{}: invalid integer '{}'", describe(field), raw))
    })
}

fn parse_boolean<T>(field: &Field<T>, raw: &str) -> Result<bool> {
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Ok(false)
    } else {
        Err(CcbError::malformed(format!(
            "{}: invalid boolean '{}'",
            describe(field),
            raw
        )))
    }
}

fn parse_date_time<T>(field: &Field<T>, raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT).map_err(|e| {
        CcbError::malformed(format!("{}: invalid timestamp '{}': {}", describe(field), raw, e))
    })
}

fn parse_date<T>(field: &Field<T>, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
        CcbError::malformed(format!("{}: invalid date '{}': {}", describe(field), raw, e))
    })
}

/// Read a whole document into an [`Element`] tree.
pub fn parse_document<R: BufRead>(reader: R) -> Result<Element> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) => stack.push(open_element(&e)?),
            Event::Empty(e) => {
                let element = open_element(&e)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| CcbError::malformed("unbalanced end tag"))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(CcbError::malformed("text outside of the document element"))
                    }
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    let bytes = c.into_inner();
                    current.text.push_str(&String::from_utf8_lossy(&bytes));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(CcbError::malformed(format!(
            "document ended inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| CcbError::malformed("document has no root element"))
}

fn open_element(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        ..Element::default()
    };

    for attr in start.attributes() {
        let attr = attr
            .map_err(|e| CcbError::malformed(format!("invalid attribute on <{}>: {}", element.name, e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(CcbError::malformed("multiple root elements")),
        None => *root = Some(element),
    }
    Ok(())
}
