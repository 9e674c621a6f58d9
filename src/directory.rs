//! Device directory parsing.
//!
//! The directory is a plain text file with one device per line:
//!
//! ```text
//! Desk,192.168.1.20
//! Ceiling,192.168.1.21,Office
//! ```
//!
//! There is no header row and no quoting. The third column (room) is
//! optional per line and is read whenever it is present.

use std::borrow::Cow;
use std::path::Path;

use log::{debug, warn};

use crate::device::Device;
use crate::errors::Error;
use crate::filter::matches;

type Result<T> = std::result::Result<T, Error>;

/// Upper bound on the number of devices a directory or address list may yield.
pub const MAX_DEVICES: usize = 256;

/// Default directory file name, relative to the working directory.
pub const DEFAULT_DIRECTORY: &str = "wiz.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectName,
    ExpectIp,
    ExpectRoom,
}

/// Collects the records that pass the name and room selectors.
struct Selector<'f> {
    names: Option<&'f str>,
    rooms: Option<&'f str>,
    kept: Vec<Device>,
    complete: usize,
}

impl Selector<'_> {
    fn record(&mut self, name: &[u8], ip: &[u8], room: Option<&[u8]>) -> Result<()> {
        self.complete += 1;

        let name = text(name);
        let room = room.map(text);
        let room_ok = match (self.rooms, room.as_deref()) {
            (None, _) => true,
            (Some(_), None) => false,
            (rooms, Some(room)) => matches(room, rooms),
        };
        if !(room_ok && matches(&name, self.names)) {
            return Ok(());
        }

        if self.kept.len() == MAX_DEVICES {
            return Err(Error::CapacityExceeded {
                capacity: MAX_DEVICES,
            });
        }
        self.kept.push(Device::new(&name, &text(ip), room.as_deref()));
        Ok(())
    }
}

fn text(field: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(field)
}

/// The last field of a line, without a trailing carriage return.
fn last_field(bytes: &[u8]) -> &[u8] {
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

/// Parse directory text, keeping the records selected by `names` and `rooms`.
///
/// Both selectors are comma-separated allow-lists (see [`crate::matches`]).
/// When both are given a record must pass both; a room selector never keeps
/// a record that has no room column. Records come back in file order and
/// duplicates are kept.
///
/// Lines without a comma are skipped, as is a final line that is not
/// terminated by a newline. Input with text but no complete record at all is
/// rejected.
///
/// # Examples
///
/// ```
/// use wizctl::directory;
///
/// let text = b"Lamp,10.0.0.5\nLamp2,10.0.0.6,Hall\n";
///
/// let all = directory::parse(text, None, None).unwrap();
/// assert_eq!(all.len(), 2);
/// assert_eq!(all[1].room(), Some("Hall"));
///
/// let hall = directory::parse(text, None, Some("Hall")).unwrap();
/// assert_eq!(hall.len(), 1);
/// assert_eq!(hall[0].ip(), "10.0.0.6");
/// ```
pub fn parse(text: &[u8], names: Option<&str>, rooms: Option<&str>) -> Result<Vec<Device>> {
    let mut selector = Selector {
        names,
        rooms,
        kept: Vec::new(),
        complete: 0,
    };

    let mut state = State::ExpectName;
    let mut line = 1;
    let mut start = 0;
    let mut name = 0..0;
    let mut ip = 0..0;

    for (i, &byte) in text.iter().enumerate() {
        match (state, byte) {
            (State::ExpectName, b',') => {
                name = start..i;
                start = i + 1;
                state = State::ExpectIp;
            }
            (State::ExpectName, b'\n') => {
                let content = last_field(&text[start..i]);
                if !content.iter().all(u8::is_ascii_whitespace) {
                    warn!("directory line {line}: no address column, skipping");
                }
                start = i + 1;
            }
            (State::ExpectIp, b',') => {
                ip = start..i;
                start = i + 1;
                state = State::ExpectRoom;
            }
            (State::ExpectIp, b'\n') => {
                let addr = last_field(&text[start..i]);
                selector.record(&text[name.clone()], addr, None)?;
                start = i + 1;
                state = State::ExpectName;
            }
            (State::ExpectRoom, b'\n') => {
                let room = last_field(&text[start..i]);
                selector.record(&text[name.clone()], &text[ip.clone()], Some(room))?;
                start = i + 1;
                state = State::ExpectName;
            }
            _ => {}
        }

        if byte == b'\n' {
            line += 1;
        }
    }

    let rest = &text[start..];
    let trailing = state != State::ExpectName || !rest.iter().all(u8::is_ascii_whitespace);
    if trailing {
        if selector.complete == 0 {
            return Err(Error::parse(line, "no newline-terminated record"));
        }
        warn!("directory line {line}: record is not terminated by a newline, ignoring it");
    }

    debug!(
        "directory: {} records read, {} selected",
        selector.complete,
        selector.kept.len()
    );
    Ok(selector.kept)
}

/// Turn a comma-separated address list into anonymous device records.
///
/// Addresses are not validated here; see [`crate::AddressPolicy`]. Empty
/// entries are dropped, and a list with no entries left is an error.
///
/// # Examples
///
/// ```
/// use wizctl::directory;
///
/// let devices = directory::parse_ips("10.0.0.5,10.0.0.6").unwrap();
/// assert_eq!(devices.len(), 2);
/// assert_eq!(devices[0].name(), "");
/// assert_eq!(devices[1].ip(), "10.0.0.6");
///
/// assert_eq!(directory::parse_ips("10.0.0.5,").unwrap().len(), 1);
/// assert!(directory::parse_ips("").is_err());
/// ```
pub fn parse_ips(list: &str) -> Result<Vec<Device>> {
    let devices: Vec<Device> = list
        .split(',')
        .filter(|ip| !ip.is_empty())
        .map(Device::from_ip)
        .collect();
    if devices.is_empty() {
        return Err(Error::EmptyAddressList(list.to_string()));
    }
    if devices.len() > MAX_DEVICES {
        return Err(Error::CapacityExceeded {
            capacity: MAX_DEVICES,
        });
    }
    Ok(devices)
}

/// Read and parse the directory file at `path`.
///
/// Unlike [`parse`], an empty file or an empty selection is an error, since
/// there would be nothing to send to.
pub fn load(path: &Path, names: Option<&str>, rooms: Option<&str>) -> Result<Vec<Device>> {
    let data = std::fs::read(path).map_err(|source| Error::Directory {
        path: path.to_path_buf(),
        source,
    })?;
    if data.is_empty() {
        return Err(Error::EmptyDirectory(path.to_path_buf()));
    }

    let devices = parse(&data, names, rooms)?;
    if devices.is_empty() {
        return Err(Error::NoDevices);
    }
    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ips(devices: &[Device]) -> Vec<&str> {
        devices.iter().map(Device::ip).collect()
    }

    #[test]
    fn test_unfiltered_keeps_every_record_in_order() {
        let devices = parse(b"Lamp,10.0.0.5\nLamp2,10.0.0.6\n", None, None).unwrap();
        assert_eq!(ips(&devices), ["10.0.0.5", "10.0.0.6"]);
        assert_eq!(devices[0].name(), "Lamp");
        assert!(devices[0].room().is_none());
    }

    #[test]
    fn test_room_column_read_without_room_filter() {
        let devices = parse(b"a,10.0.0.1,Kitchen\nb,10.0.0.2\n", None, None).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].ip(), "10.0.0.1");
        assert_eq!(devices[0].room(), Some("Kitchen"));
        assert_eq!(devices[1].room(), None);
    }

    #[test]
    fn test_name_filter() {
        let text = b"a,10.0.0.1\nb,10.0.0.2\nc,10.0.0.3\na,10.0.0.4\n";
        let devices = parse(text, Some("a,c"), None).unwrap();
        assert_eq!(ips(&devices), ["10.0.0.1", "10.0.0.3", "10.0.0.4"]);
    }

    #[test]
    fn test_room_filter_skips_records_without_room() {
        let text = b"a,10.0.0.1,Hall\nb,10.0.0.2\nc,10.0.0.3,Den\n";
        let devices = parse(text, None, Some("Hall,Den")).unwrap();
        assert_eq!(ips(&devices), ["10.0.0.1", "10.0.0.3"]);
    }

    #[test]
    fn test_both_filters_must_pass() {
        let text = b"a,10.0.0.1,Hall\na,10.0.0.2,Den\nb,10.0.0.3,Hall\n";
        let devices = parse(text, Some("a"), Some("Hall")).unwrap();
        assert_eq!(ips(&devices), ["10.0.0.1"]);
    }

    #[test]
    fn test_filtering_only_restricts() {
        let text = b"a,10.0.0.1,Hall\nb,10.0.0.2\nc,10.0.0.3,Den\nd,10.0.0.4,Hall\n";
        let all = parse(text, None, None).unwrap();
        let selectors = [
            (Some("a,d"), None),
            (None, Some("Hall")),
            (Some("b,c"), Some("Den")),
            (Some("zzz"), None),
            (Some(""), Some("")),
        ];
        for (names, rooms) in selectors {
            let subset = parse(text, names, rooms).unwrap();
            assert!(subset.iter().all(|d| all.contains(d)));
            assert!(subset.len() <= all.len());
        }
    }

    #[test]
    fn test_crlf_line_endings() {
        let devices = parse(b"a,10.0.0.1\r\nb,10.0.0.2,Hall\r\n", None, Some("Hall")).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].room(), Some("Hall"));
    }

    #[test]
    fn test_malformed_and_blank_lines_skipped() {
        let devices = parse(b"\njunk\na,10.0.0.1\n\n", None, None).unwrap();
        assert_eq!(ips(&devices), ["10.0.0.1"]);
    }

    #[test]
    fn test_unterminated_final_record_is_dropped() {
        let devices = parse(b"a,10.0.0.1\nb,10.0.0.2", None, None).unwrap();
        assert_eq!(ips(&devices), ["10.0.0.1"]);
    }

    #[test]
    fn test_no_terminated_record_is_an_error() {
        let err = parse(b"a,10.0.0.1", None, None).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_empty_text() {
        assert!(parse(b"", None, None).unwrap().is_empty());
    }

    #[test]
    fn test_capacity() {
        let mut text = String::new();
        for i in 0..MAX_DEVICES {
            text.push_str(&format!("d{i},10.0.{}.{}\n", i / 256, i % 256));
        }
        assert_eq!(parse(text.as_bytes(), None, None).unwrap().len(), MAX_DEVICES);

        // filtered-out records do not count
        text.push_str("skip,10.1.0.0\n");
        assert!(parse(text.as_bytes(), None, Some("nowhere")).unwrap().is_empty());

        text.push_str("one-more,10.1.0.1\n");
        let err = parse(text.as_bytes(), None, None).unwrap_err();
        assert_eq!(
            err,
            Error::CapacityExceeded {
                capacity: MAX_DEVICES
            }
        );
    }

    #[test]
    fn test_parse_ips() {
        let devices = parse_ips("10.0.0.5,bad,10.0.0.6").unwrap();
        assert_eq!(ips(&devices), ["10.0.0.5", "bad", "10.0.0.6"]);

        let too_many = vec!["10.0.0.1"; MAX_DEVICES + 1].join(",");
        assert!(parse_ips(&too_many).is_err());
    }

    #[test]
    fn test_parse_ips_drops_empty_entries() {
        let devices = parse_ips("10.0.0.5,").unwrap();
        assert_eq!(ips(&devices), ["10.0.0.5"]);

        let devices = parse_ips(",10.0.0.5,,10.0.0.6").unwrap();
        assert_eq!(ips(&devices), ["10.0.0.5", "10.0.0.6"]);

        assert_eq!(
            parse_ips("").unwrap_err(),
            Error::EmptyAddressList(String::new())
        );
        assert!(matches!(parse_ips(",,"), Err(Error::EmptyAddressList(_))));
    }

    #[test]
    fn test_load_reports_file_errors() {
        let dir = std::env::temp_dir().join(format!("wizctl-dir-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = dir.join("missing.csv");
        assert!(matches!(
            load(&missing, None, None),
            Err(Error::Directory { .. })
        ));

        let empty = dir.join("empty.csv");
        std::fs::write(&empty, b"").unwrap();
        assert!(matches!(
            load(&empty, None, None),
            Err(Error::EmptyDirectory(_))
        ));

        let file = dir.join("wiz.csv");
        std::fs::write(&file, b"Lamp,10.0.0.5,Hall\n").unwrap();
        assert_eq!(load(&file, None, None).unwrap().len(), 1);
        assert!(matches!(
            load(&file, Some("Other"), None),
            Err(Error::NoDevices)
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
