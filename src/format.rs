//! Renders password details into the tab separated lines fed to fzf.
//!
//! Column one is the password id and is hidden by `--with-nth=2..`; the
//! rest is `name | path | login | url | description` with the separators
//! always present so fzf columns stay aligned.

use itertools::Itertools;

use crate::codec::decode_or_raw;
use crate::model::passwork::{CustomField, PasswordDetail, PathSegment};

pub const ID_DELIMITER: char = '\t';
const COLUMN_SEPARATOR: &str = " | ";
const NO_TITLE: &str = "(no title)";
const NO_PATH: &str = "-";

pub fn line(detail: &PasswordDetail) -> String {
    let name = if detail.name.is_empty() {
        NO_TITLE
    } else {
        detail.name.as_str()
    };
    let path = path(&detail.path);
    let description = description(&detail.custom);
    let display = [
        name,
        path.as_str(),
        or_empty(&detail.login),
        or_empty(&detail.url),
        description.as_str(),
    ]
    .join(COLUMN_SEPARATOR);
    format!("{}{}{}", detail.id, ID_DELIMITER, display)
}

/// Folder names in ascending `order`, or `-` when there are none.
pub fn path(segments: &[PathSegment]) -> String {
    let names = segments
        .iter()
        .sorted_by_key(|s| s.order)
        .map(|s| s.name.as_str())
        .filter(|n| !n.is_empty())
        .join(" / ");
    if names.is_empty() {
        NO_PATH.to_owned()
    } else {
        names
    }
}

pub fn description(custom: &[CustomField]) -> String {
    custom
        .iter()
        .filter_map(|field| {
            let name = decode_or_raw(&field.name);
            let value = decode_or_raw(&field.value);
            match (name.trim(), value.trim()) {
                ("", "") => None,
                ("", value) => Some(value.to_owned()),
                (name, "") => Some(name.to_owned()),
                (name, value) => Some(format!("{}={}", name, value)),
            }
        })
        .join("; ")
}

/// The id column of a line produced by [`line`].
pub fn split_id(line: &str) -> &str {
    line.split(ID_DELIMITER).next().unwrap_or(line)
}

fn or_empty(value: &str) -> &str {
    if value.trim().is_empty() {
        ""
    } else {
        value
    }
}
