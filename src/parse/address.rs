//! Splits a one-line US street address into street, city, state and zip.
//!
//! The address is tokenized on whitespace and commas, then every token gets a
//! component tag using the tail of the address (zip, then state), comma
//! boundaries and a table of street suffixes. Street and city are assembled
//! from their tagged tokens; state and zip come from the last token of each.

use std::sync::OnceLock;

use regex::Regex;

use super::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressTag {
    AddressNumber,
    StreetNamePreDirectional,
    StreetName,
    StreetNamePostType,
    StreetNamePostDirectional,
    OccupancyType,
    OccupancyIdentifier,
    PlaceName,
    StateName,
    ZipCode,
}

impl AddressTag {
    pub const fn is_street(self) -> bool {
        matches!(
            self,
            Self::AddressNumber
                | Self::StreetNamePreDirectional
                | Self::StreetName
                | Self::StreetNamePostType
                | Self::StreetNamePostDirectional
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// A comma follows this token, possibly after whitespace.
    pub comma_after: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY", "ALABAMA", "ALASKA", "ARIZONA", "ARKANSAS", "CALIFORNIA", "COLORADO",
    "CONNECTICUT", "DELAWARE", "FLORIDA", "GEORGIA", "HAWAII", "IDAHO", "ILLINOIS", "INDIANA",
    "IOWA", "KANSAS", "KENTUCKY", "LOUISIANA", "MAINE", "MARYLAND", "MASSACHUSETTS", "MICHIGAN",
    "MINNESOTA", "MISSISSIPPI", "MISSOURI", "MONTANA", "NEBRASKA", "NEVADA", "OHIO", "OKLAHOMA",
    "OREGON", "PENNSYLVANIA", "TENNESSEE", "TEXAS", "UTAH", "VERMONT", "VIRGINIA", "WASHINGTON",
    "WISCONSIN", "WYOMING",
];

const STREET_SUFFIXES: &[&str] = &[
    "ALY", "ALLEY", "AVE", "AV", "AVENUE", "BLVD", "BOULEVARD", "CIR", "CIRCLE", "CT", "COURT",
    "CTR", "CENTER", "DR", "DRIVE", "EXPY", "EXPRESSWAY", "FWY", "FREEWAY", "HWY", "HIGHWAY", "LN",
    "LANE", "LOOP", "PKWY", "PARKWAY", "PL", "PLACE", "PLZ", "PLAZA", "RD", "ROAD", "ROW", "SQ",
    "SQUARE", "ST", "STREET", "TER", "TERRACE", "TRL", "TRAIL", "WAY",
];

const DIRECTIONALS: &[&str] = &[
    "N", "S", "E", "W", "NE", "NW", "SE", "SW", "NORTH", "SOUTH", "EAST", "WEST",
];

const OCCUPANCY_TYPES: &[&str] = &[
    "STE", "SUITE", "UNIT", "APT", "BLDG", "SPC", "SPACE", "RM", "ROOM", "#",
];

fn is_one_of(token: &str, table: &[&str]) -> bool {
    let token = token.trim_end_matches('.');
    table.iter().any(|entry| entry.eq_ignore_ascii_case(token))
}

fn is_zip(token: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("regex should be valid"))
        .is_match(token)
}

fn is_address_number(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit())
}

pub fn tokenize(address: &str) -> Vec<Token<'_>> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[^\s,]+").expect("regex should be valid"));
    re.find_iter(address)
        .map(|m| Token {
            text: m.as_str(),
            comma_after: address[m.end()..].trim_start().starts_with(','),
        })
        .collect()
}

/// Tags every token with the address component it belongs to.
pub fn tag<'a>(tokens: &[Token<'a>]) -> Vec<(&'a str, AddressTag)> {
    let mut tags = vec![AddressTag::PlaceName; tokens.len()];
    let mut end = tokens.len();

    if end > 0 && is_zip(tokens[end - 1].text) {
        tags[end - 1] = AddressTag::ZipCode;
        end -= 1;
    }
    if end > 0 && is_one_of(tokens[end - 1].text, STATES) {
        tags[end - 1] = AddressTag::StateName;
        end -= 1;
    }

    let street_end = street_end(&tokens[..end]);
    tag_street(&tokens[..street_end], &mut tags[..street_end]);

    tokens
        .iter()
        .zip(tags)
        .map(|(token, tag)| (token.text, tag))
        .collect()
}

/// Index of the first token past the street (and occupancy) part of `tokens`,
/// which holds everything ahead of the state and zip.
fn street_end(tokens: &[Token<'_>]) -> usize {
    // a comma right before the state doesn't separate street from city
    let boundary = tokens
        .iter()
        .enumerate()
        .take(tokens.len().saturating_sub(1))
        .filter(|(_, token)| token.comma_after)
        .map(|(i, _)| i + 1)
        .last();
    if let Some(boundary) = boundary {
        return boundary;
    }

    let first_name = usize::from(tokens.first().is_some_and(|t| is_address_number(t.text)));
    let suffix = tokens
        .iter()
        .enumerate()
        .skip(first_name + 1)
        .find(|(_, token)| is_one_of(token.text, STREET_SUFFIXES))
        .map(|(i, _)| i);
    let end = match suffix {
        Some(i) if tokens.get(i + 1).is_some_and(|t| is_one_of(t.text, DIRECTIONALS)) => i + 2,
        Some(i) => i + 1,
        // no suffix to anchor on: the last word is the city
        None => return tokens.len().saturating_sub(1),
    };
    occupancy_end(tokens, end)
}

/// Extends a street ending at `start` over a following unit, like `Ste 5` or `#5`.
/// The last token is never taken, it belongs to the city.
fn occupancy_end(tokens: &[Token<'_>], start: usize) -> usize {
    let last = tokens.len().saturating_sub(1);
    let end = match tokens.get(start) {
        Some(token) if token.text.len() > 1 && token.text.starts_with('#') => start + 1,
        Some(token) if is_one_of(token.text, OCCUPANCY_TYPES) => start + 2,
        _ => start,
    };
    end.min(last).max(start)
}

fn tag_street(tokens: &[Token<'_>], tags: &mut [AddressTag]) {
    let mut occupancy = false;
    let mut name_tokens = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        tags[i] = if occupancy {
            AddressTag::OccupancyIdentifier
        } else if i == 0 && is_address_number(token.text) {
            AddressTag::AddressNumber
        } else if is_one_of(token.text, OCCUPANCY_TYPES) {
            occupancy = true;
            AddressTag::OccupancyType
        } else if token.text.starts_with('#') {
            occupancy = true;
            AddressTag::OccupancyIdentifier
        } else {
            name_tokens.push(i);
            AddressTag::StreetName
        };
    }

    let (Some(&first), Some(&last)) = (name_tokens.first(), name_tokens.last()) else {
        return;
    };
    if first == last {
        return;
    }
    if is_one_of(tokens[first].text, DIRECTIONALS) {
        tags[first] = AddressTag::StreetNamePreDirectional;
    }
    if is_one_of(tokens[last].text, STREET_SUFFIXES) {
        tags[last] = AddressTag::StreetNamePostType;
    } else if is_one_of(tokens[last].text, DIRECTIONALS)
        && last > first + 1
        && is_one_of(tokens[last - 1].text, STREET_SUFFIXES)
    {
        tags[last] = AddressTag::StreetNamePostDirectional;
        tags[last - 1] = AddressTag::StreetNamePostType;
    }
}

impl Address {
    pub fn parse(address: &str) -> Result<Self, Error> {
        let tagged = tag(&tokenize(address));

        let join = |pred: fn(AddressTag) -> bool| {
            tagged
                .iter()
                .filter(|(_, tag)| pred(*tag))
                .map(|(text, _)| *text)
                .collect::<Vec<_>>()
                .join(" ")
        };
        let last = |wanted: AddressTag| {
            tagged
                .iter()
                .rev()
                .find(|(_, tag)| *tag == wanted)
                .map(|(text, _)| (*text).to_owned())
        };

        let state = last(AddressTag::StateName).ok_or_else(|| {
            Error::AddressParse(format!("No state found in address `{address}`"))
        })?;
        let zip = last(AddressTag::ZipCode).ok_or_else(|| {
            Error::AddressParse(format!("No zip code found in address `{address}`"))
        })?;

        Ok(Self {
            street: join(AddressTag::is_street),
            city: join(|tag| tag == AddressTag::PlaceName).replace(',', ""),
            state,
            zip,
        })
    }
}
