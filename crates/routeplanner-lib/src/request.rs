//! Parsing of batch request files and command-line list arguments.
//!
//! A request file holds one `Key:Value` pair per line, in a fixed order:
//!
//! ```text
//! Mode:driving
//! Source:5
//! Destination:4
//! AvoidNodes:2,3
//! AvoidSegments:(1,2),(3,4)
//! IncludeNode:
//! ```
//!
//! A driving request has either the first three lines or all six. A
//! driving-walking request always has six lines: `Mode`, `Source`,
//! `Destination`, `MaxWalkTime`, `AvoidNodes` and `AvoidSegments`.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::network::LocationId;
use crate::routing::{RouteMode, RouteRequest};

const DRIVING_KEYS: [&str; 6] = [
    "Mode",
    "Source",
    "Destination",
    "AvoidNodes",
    "AvoidSegments",
    "IncludeNode",
];

const DRIVING_WALKING_KEYS: [&str; 6] = [
    "Mode",
    "Source",
    "Destination",
    "MaxWalkTime",
    "AvoidNodes",
    "AvoidSegments",
];

/// Read and parse a request file.
pub fn read_request_file(path: &Path) -> Result<RouteRequest> {
    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), "parsing request file");
    parse_request(&text)
}

/// Parse the contents of a request file.
pub fn parse_request(text: &str) -> Result<RouteRequest> {
    let lines: Vec<(usize, &str, &str)> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| split_line(idx + 1, line))
        .collect::<Result<_>>()?;

    let Some(&(line, key, value)) = lines.first() else {
        return Err(Error::invalid_request("request file is empty"));
    };
    if key != "Mode" {
        return Err(unexpected_key(line, "Mode", key));
    }
    let mode: RouteMode = value.parse()?;

    let keys: &[&str] = match mode {
        RouteMode::Driving => &DRIVING_KEYS,
        RouteMode::DrivingWalking => &DRIVING_WALKING_KEYS,
    };
    let count_ok = match mode {
        RouteMode::Driving => lines.len() == 3 || lines.len() == 6,
        RouteMode::DrivingWalking => lines.len() == 6,
    };
    if !count_ok {
        return Err(Error::invalid_request(format!(
            "a {mode} request cannot have {} lines",
            lines.len()
        )));
    }

    let mut request = RouteRequest::driving(0, 0);
    request.mode = mode;
    for (&(line, key, value), expected) in lines.iter().zip(keys).skip(1) {
        if key != *expected {
            return Err(unexpected_key(line, expected, key));
        }
        match key {
            "Source" => request.source = parse_id(line, value)?,
            "Destination" => request.destination = parse_id(line, value)?,
            "MaxWalkTime" => request.max_walk_time = Some(parse_minutes(line, value)?),
            "AvoidNodes" => request.avoid_nodes = parse_node_field(line, value)?,
            "AvoidSegments" => request.avoid_segments = parse_segment_field(line, value)?,
            "IncludeNode" if !value.is_empty() => {
                request.include_node = Some(parse_id(line, value)?)
            }
            _ => {}
        }
    }
    Ok(request)
}

fn split_line(line: usize, text: &str) -> Result<(usize, &str, &str)> {
    let (key, value) = text
        .split_once(':')
        .ok_or_else(|| Error::invalid_request(format!("line {line}: expected 'Key:Value'")))?;
    Ok((line, key.trim(), value.trim()))
}

fn unexpected_key(line: usize, expected: &str, found: &str) -> Error {
    Error::invalid_request(format!("line {line}: expected '{expected}', found '{found}'"))
}

fn parse_id(line: usize, value: &str) -> Result<LocationId> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_request(format!("line {line}: '{value}' is not a location id")))
}

fn parse_minutes(line: usize, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(minutes) if minutes >= 0.0 => Ok(minutes),
        _ => Err(Error::invalid_request(format!(
            "line {line}: '{value}' is not a walking time"
        ))),
    }
}

/// `2,3,7`, possibly empty, whitespace tolerated.
fn parse_node_field(line: usize, value: &str) -> Result<Vec<LocationId>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| parse_id(line, token))
        .collect()
}

/// `(1,2),(3,4)`, possibly empty, whitespace tolerated.
fn parse_segment_field(line: usize, value: &str) -> Result<Vec<(LocationId, LocationId)>> {
    let malformed =
        || Error::invalid_request(format!("line {line}: segments must look like '(1,2),(3,4)'"));
    let mut segments = Vec::new();
    let mut rest = value.trim();
    while !rest.is_empty() {
        let body = rest.strip_prefix('(').ok_or_else(malformed)?;
        let (pair, tail) = body.split_once(')').ok_or_else(malformed)?;
        let (from, to) = pair.split_once(',').ok_or_else(malformed)?;
        segments.push((parse_id(line, from)?, parse_id(line, to)?));
        let tail = tail.trim_start();
        rest = match tail.strip_prefix(',') {
            Some(next) => next.trim_start(),
            None if tail.is_empty() => tail,
            None => return Err(malformed()),
        };
    }
    Ok(segments)
}

/// Split a comma-separated list given on the command line, e.g. `ARC,BRG`.
///
/// Spaces are not allowed; an underscore stands for a space so that names
/// can be passed unquoted. An empty input yields an empty list.
pub fn split_labels(input: &str) -> Result<Vec<String>> {
    reject_whitespace(input, "1,2,3")?;
    if input.is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .map(|token| {
            if token.is_empty() {
                Err(Error::invalid_request(format!("empty entry in '{input}'")))
            } else {
                Ok(token.replace('_', " "))
            }
        })
        .collect()
}

/// Split a comma-separated list of `from-to` pairs, e.g. `1-2,3-4`.
pub fn split_label_pairs(input: &str) -> Result<Vec<(String, String)>> {
    reject_whitespace(input, "1-2,3-4")?;
    split_labels(input)?
        .into_iter()
        .map(|pair| match pair.split_once('-') {
            Some((from, to)) if !from.is_empty() && !to.is_empty() => {
                Ok((from.to_string(), to.to_string()))
            }
            _ => Err(Error::invalid_request(format!(
                "'{pair}' is not a segment; expected 'X-Y'"
            ))),
        })
        .collect()
}

/// `1,2,3` as location ids.
pub fn parse_id_list(input: &str) -> Result<Vec<LocationId>> {
    split_labels(input)?
        .iter()
        .map(|token| {
            token
                .parse()
                .map_err(|_| Error::invalid_request(format!("'{token}' is not a location id")))
        })
        .collect()
}

/// `1-2,3-4` as location id pairs.
pub fn parse_segment_list(input: &str) -> Result<Vec<(LocationId, LocationId)>> {
    split_label_pairs(input)?
        .iter()
        .map(|(from, to)| {
            let parse = |token: &str| {
                token
                    .parse::<LocationId>()
                    .map_err(|_| Error::invalid_request(format!("'{token}' is not a location id")))
            };
            Ok((parse(from)?, parse(to)?))
        })
        .collect()
}

fn reject_whitespace(input: &str, example: &str) -> Result<()> {
    if input.chars().any(char::is_whitespace) {
        return Err(Error::invalid_request(format!(
            "spaces are not allowed in '{input}'; use the '{example}' format"
        )));
    }
    Ok(())
}
