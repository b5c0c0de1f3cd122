//! Flat-attribute XML record extraction.
//!
//! The directory API speaks a flat, non-nested dialect: a single root
//! element wrapping self-closing records whose payload lives entirely in
//! `KEY="value"` attributes. A lax pull reader is enough; one malformed tag
//! must never take down the rest of the document.

use std::collections::HashMap;
use std::sync::Arc;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::domain::error::DirectoryError;
use crate::domain::model::{LiveTournament, VenueDetail, VenueRecord};
use crate::domain::text::decode_entities;

pub const ROOT_TAG: &str = "CASINOS";
pub const VENUE_TAG: &str = "CASINO";
pub const TOURNAMENT_TAG: &str = "TOURNAMENT";
pub const PICTURE_TAG: &str = "PICTURE";
pub const ID_ATTR: &str = "ID";

const TITLE_ATTR: &str = "TITLE";
const ADDRESS_ATTR: &str = "ADDRESS";
const CITY_ATTR: &str = "CITY";
const COUNTRY_ATTR: &str = "COUNTRY";
const COORDINATES_ATTR: &str = "COORDINATES";
const CONTACT_ATTR: &str = "CONTACT";
const URL_ATTR: &str = "URL";
const LOGO_ATTR: &str = "LOGO";
const SIZE_ATTR: &str = "SIZE";
const RANK_ATTR: &str = "RANK";
const IMAGE_ATTR: &str = "IMAGE";
const DATE_ATTR: &str = "DATE";
const BUYIN_ATTR: &str = "BUYIN";

/// Flat attribute map for one record tag. Attribute values are kept raw
/// (undecoded); character references are only resolved on the
/// human-readable fields at projection time, never on ids or URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    attrs: HashMap<String, String>,
}

impl RawRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    fn field(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    fn decoded_field(&self, key: &str) -> String {
        decode_entities(self.get(key).unwrap_or_default())
    }

    fn optional(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty()).map(str::to_string)
    }
}

fn lax_reader(raw: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(raw);
    let config = reader.config_mut();
    config.check_end_names = false;
    reader
}

/// Whether the document carries the expected root element. A payload without
/// it is a shape failure, distinct from a well-formed listing with zero
/// records.
pub fn root_present(raw: &str, root_tag: &str) -> bool {
    let mut reader = lax_reader(raw);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.name().as_ref() == root_tag.as_bytes() {
                    return true;
                }
            }
            Ok(Event::Eof) | Err(_) => return false,
            Ok(_) => {}
        }
    }
}

/// Extract every `tag` element's attributes, in source order. A tag lacking
/// `required_attr` is skipped with a warning; a malformed attribute is
/// dropped without losing the tag; a reader error ends the scan with
/// whatever was parsed so far.
pub fn scan_records(raw: &str, tag: &str, required_attr: &str) -> Vec<RawRecord> {
    let mut reader = lax_reader(raw);
    let mut records = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == tag.as_bytes() => {
                let mut attrs = HashMap::new();
                for attr in e.attributes().with_checks(false) {
                    let Ok(attr) = attr else { continue };
                    let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    attrs.insert(key, value);
                }
                if attrs.get(required_attr).map_or(true, String::is_empty) {
                    tracing::warn!(tag, required_attr, "skipping record without identifier");
                    continue;
                }
                records.push(RawRecord { attrs });
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                tracing::warn!(error = %err, tag, "malformed XML, keeping records scanned so far");
                break;
            }
            Ok(_) => {}
        }
    }
    records
}

/// Single-slot memo: remembers exactly the most recent (key, value) pair.
/// Not an LRU; each view parses one document at a time, so one slot is the
/// whole requirement, and it can never grow or serve a stale key.
#[derive(Debug, Default)]
pub struct SingleSlotMemo<V> {
    slot: Option<(String, V)>,
}

impl<V: Clone> SingleSlotMemo<V> {
    pub fn new() -> Self {
        Self { slot: None }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        match &self.slot {
            Some((cached_key, value)) if cached_key == key => Some(value.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: String, value: V) {
        self.slot = Some((key, value));
    }
}

/// Venue-listing parser with the single-slot memo in front of it, so
/// re-rendering the same payload does not rescan the document.
#[derive(Debug, Default)]
pub struct VenueXmlParser {
    memo: SingleSlotMemo<Arc<Vec<VenueRecord>>>,
    scans: u64,
}

impl VenueXmlParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of full document scans performed (memo hits excluded).
    pub fn scans(&self) -> u64 {
        self.scans
    }

    pub fn parse_listing(&mut self, raw: &str) -> Result<Arc<Vec<VenueRecord>>, DirectoryError> {
        if let Some(cached) = self.memo.get(raw) {
            return Ok(cached);
        }
        if !root_present(raw, ROOT_TAG) {
            return Err(DirectoryError::InvalidFormat(format!(
                "missing {ROOT_TAG} root element"
            )));
        }
        self.scans += 1;
        let venues: Vec<VenueRecord> = scan_records(raw, VENUE_TAG, ID_ATTR)
            .iter()
            .map(project_venue)
            .collect();
        let venues = Arc::new(venues);
        self.memo.set(raw.to_string(), Arc::clone(&venues));
        Ok(venues)
    }
}

fn project_venue(record: &RawRecord) -> VenueRecord {
    let address = record.decoded_field(ADDRESS_ATTR);
    let city = record.decoded_field(CITY_ATTR);
    VenueRecord {
        id: record.field(ID_ATTR),
        name: record.decoded_field(TITLE_ATTR),
        country_code: record.field(COUNTRY_ATTR),
        description_line: join_nonempty(&[&address, &city]),
        logo_url: record.optional(LOGO_ATTR),
    }
}

fn join_nonempty(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse the single-venue detail document. The venue element matching `id`
/// must be present; its absence is a shape failure, not an empty state.
/// The nested tournament and picture lists use the same flat dialect.
pub fn parse_detail(raw: &str, id: &str) -> Result<VenueDetail, DirectoryError> {
    if !root_present(raw, ROOT_TAG) {
        return Err(DirectoryError::InvalidFormat(format!(
            "missing {ROOT_TAG} root element"
        )));
    }
    let venues = scan_records(raw, VENUE_TAG, ID_ATTR);
    let record = venues
        .iter()
        .find(|r| r.get(ID_ATTR) == Some(id))
        .ok_or_else(|| {
            DirectoryError::InvalidFormat(format!("venue {id} not present in detail response"))
        })?;

    let live_tournaments = scan_records(raw, TOURNAMENT_TAG, ID_ATTR)
        .iter()
        .map(|r| LiveTournament {
            id: r.field(ID_ATTR),
            title: r.decoded_field(TITLE_ATTR),
            date: r.optional(DATE_ATTR),
            buyin: r.optional(BUYIN_ATTR),
        })
        .collect();
    let picture_urls = scan_records(raw, PICTURE_TAG, URL_ATTR)
        .iter()
        .map(|r| r.field(URL_ATTR))
        .collect();

    Ok(VenueDetail {
        id: record.field(ID_ATTR),
        name: record.decoded_field(TITLE_ATTR),
        address: record.decoded_field(ADDRESS_ATTR),
        city: record.decoded_field(CITY_ATTR),
        country_code: record.field(COUNTRY_ATTR),
        coordinates: record.optional(COORDINATES_ATTR),
        contact: record.optional(CONTACT_ATTR),
        website: record.optional(URL_ATTR),
        logo_url: record.optional(LOGO_ATTR),
        size: record.optional(SIZE_ATTR),
        rank: record.optional(RANK_ATTR),
        image_url: record.optional(IMAGE_ATTR),
        live_tournaments,
        picture_urls,
    })
}
