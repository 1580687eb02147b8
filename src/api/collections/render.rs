//! XML and HTML encodings of the collection documents.

use serde::Serialize;
use std::fmt::Write;

use super::schemas::{CollectionDocument, CollectionsDocument};
use crate::api::common::{Extent, Link, media_type, rel};
use crate::api::format::{Representation, XmlLink, xml_document};
use crate::api::html;
use crate::config::ServiceConfig;
use crate::error::AppResult;

const WFS3_NAMESPACE: &str = "http://www.opengis.net/wfs/3.0";
const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

#[derive(Serialize)]
struct XmlBoundingBox {
    #[serde(rename = "@crs", skip_serializing_if = "Option::is_none")]
    crs: Option<String>,
    #[serde(rename = "$text")]
    coordinates: String,
}

#[derive(Serialize)]
struct XmlExtent {
    #[serde(rename = "BoundingBox")]
    bboxes: Vec<XmlBoundingBox>,
}

impl From<&Extent> for XmlExtent {
    fn from(extent: &Extent) -> Self {
        let bboxes = extent
            .spatial
            .bbox
            .iter()
            .map(|bbox| XmlBoundingBox {
                crs: extent.spatial.crs.clone(),
                coordinates: bbox
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(" "),
            })
            .collect();
        Self { bboxes }
    }
}

#[derive(Serialize)]
struct XmlCollection<'a> {
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    xmlns: Option<&'static str>,
    #[serde(rename = "@xmlns:atom", skip_serializing_if = "Option::is_none")]
    xmlns_atom: Option<&'static str>,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Title", skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "Extent", skip_serializing_if = "Option::is_none")]
    extent: Option<XmlExtent>,
    #[serde(rename = "atom:link")]
    links: Vec<XmlLink<'a>>,
}

impl<'a> XmlCollection<'a> {
    fn new(collection: &'a CollectionDocument) -> Self {
        Self {
            xmlns: None,
            xmlns_atom: None,
            name: &collection.name,
            title: collection.title.as_deref(),
            description: collection.description.as_deref(),
            extent: collection.extent.as_ref().map(XmlExtent::from),
            links: collection.links.iter().map(XmlLink::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct XmlCollections<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "@xmlns:atom")]
    xmlns_atom: &'static str,
    #[serde(rename = "atom:link")]
    links: Vec<XmlLink<'a>>,
    #[serde(rename = "Collection")]
    collections: Vec<XmlCollection<'a>>,
}

impl Representation for CollectionsDocument {
    fn to_xml(&self) -> AppResult<String> {
        let doc = XmlCollections {
            xmlns: WFS3_NAMESPACE,
            xmlns_atom: ATOM_NAMESPACE,
            links: self.links.iter().map(XmlLink::from).collect(),
            collections: self.collections.iter().map(XmlCollection::new).collect(),
        };
        xml_document("Collections", &doc)
    }

    fn to_html(&self, service: &ServiceConfig) -> String {
        let mut body = String::new();
        body.push_str("<ul class=\"collections\">\n");
        for collection in &self.collections {
            write_collection_entry(&mut body, collection, service);
        }
        body.push_str("</ul>\n");
        body.push_str("<h2>Other formats</h2>\n");
        body.push_str(&html::link_list(&self.links));
        html::page("Collections", &body)
    }
}

impl Representation for CollectionDocument {
    fn to_xml(&self) -> AppResult<String> {
        let mut doc = XmlCollection::new(self);
        doc.xmlns = Some(WFS3_NAMESPACE);
        doc.xmlns_atom = Some(ATOM_NAMESPACE);
        xml_document("Collection", &doc)
    }

    fn to_html(&self, service: &ServiceConfig) -> String {
        let mut body = String::from("<ul class=\"collections\">\n");
        write_collection_entry(&mut body, self, service);
        body.push_str("</ul>\n<h2>Links</h2>\n");
        body.push_str(&html::link_list(&self.links));
        html::page(self.title.as_deref().unwrap_or(&self.name), &body)
    }
}

/// One `<li>` per collection. Element ids are derived from the collection
/// name: `html_{name}_link`, `{name}_title`, `{name}_description`.
fn write_collection_entry(out: &mut String, collection: &CollectionDocument, service: &ServiceConfig) {
    let name = html::escape(&collection.name);

    out.push_str("<li>\n");
    match collection.item_link(media_type::HTML) {
        Some(link) => {
            let href = format!("{}&limit={}", link.href, service.html_items_limit);
            let _ = writeln!(
                out,
                "<h3><a id=\"html_{name}_link\" href=\"{href}\">{name}</a></h3>",
                name = name,
                href = html::escape(&href),
            );
        }
        None => {
            let _ = writeln!(out, "<h3>{}</h3>", name);
        }
    }
    let _ = writeln!(
        out,
        "<span id=\"{}_title\">{}</span>",
        name,
        html::escape(collection.title.as_deref().unwrap_or(""))
    );
    let _ = writeln!(
        out,
        "<p id=\"{}_description\">{}</p>",
        name,
        html::escape(collection.description.as_deref().unwrap_or(""))
    );

    let formats: Vec<&Link> = collection
        .links_with_rel(rel::ITEM)
        .filter(|link| link.media_type.as_deref() != Some(media_type::HTML))
        .collect();
    if !formats.is_empty() {
        out.push_str("<p>Items as:");
        for link in formats {
            let _ = write!(
                out,
                " <a href=\"{}\">{}</a>",
                html::escape(&link.href),
                html::escape(link.media_type.as_deref().unwrap_or(&link.href))
            );
        }
        out.push_str("</p>\n");
    }
    out.push_str("</li>\n");
}
