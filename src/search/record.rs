use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

use crate::query::extension_of;

pub(crate) const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single entry that satisfied the query and every filter.
///
/// Records are plain values; once produced they are never mutated. The name
/// keeps the filesystem's bytes; text forms are produced only for display and
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
	parent: PathBuf,
	name: OsString,
	size: u64,
	modified: SystemTime,
	is_dir: bool,
}

impl MatchRecord {
	pub fn new(
		parent: PathBuf,
		name: impl Into<OsString>,
		size: u64,
		modified: SystemTime,
		is_dir: bool,
	) -> Self {
		Self {
			parent,
			name: name.into(),
			size: if is_dir { 0 } else { size },
			modified,
			is_dir,
		}
	}

	/// Directory that contains the entry.
	pub fn parent(&self) -> &Path {
		&self.parent
	}

	pub fn name(&self) -> &OsStr {
		&self.name
	}

	/// Name for display, with invalid UTF-8 replaced.
	pub fn name_lossy(&self) -> Cow<'_, str> {
		self.name.to_string_lossy()
	}

	pub fn full_path(&self) -> PathBuf {
		self.parent.join(&self.name)
	}

	/// Size in bytes; always zero for directories.
	pub fn size(&self) -> u64 {
		self.size
	}

	pub fn modified(&self) -> SystemTime {
		self.modified
	}

	pub fn is_dir(&self) -> bool {
		self.is_dir
	}

	/// Lowercase extension, empty for directories and extensionless files.
	pub fn extension(&self) -> String {
		if self.is_dir {
			String::new()
		} else {
			extension_of(&self.name_lossy())
		}
	}

	pub fn icon_class(&self) -> IconClass {
		if self.is_dir {
			IconClass::Folder
		} else {
			IconClass::for_extension(&self.extension())
		}
	}

	pub fn size_formatted(&self) -> String {
		if self.is_dir {
			"Directory".to_string()
		} else {
			format_size(self.size)
		}
	}

	/// Seconds since the Unix epoch, negative for pre-epoch timestamps.
	pub fn modified_secs(&self) -> f64 {
		match self.modified.duration_since(UNIX_EPOCH) {
			Ok(elapsed) => elapsed.as_secs_f64(),
			Err(err) => -err.duration().as_secs_f64(),
		}
	}

	pub fn modified_formatted(&self) -> String {
		format_time(self.modified)
	}
}

impl Serialize for MatchRecord {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let full_path = self.full_path();
		RecordView {
			path: self.parent.to_string_lossy(),
			filename: self.name_lossy(),
			full_path: full_path.to_string_lossy(),
			size: self.size,
			size_formatted: self.size_formatted(),
			modified_time: self.modified_secs(),
			modified_time_formatted: self.modified_formatted(),
			is_directory: self.is_dir,
			extension: self.extension(),
			icon_class: self.icon_class(),
		}
		.serialize(serializer)
	}
}

#[derive(Serialize)]
struct RecordView<'a> {
	path: Cow<'a, str>,
	filename: Cow<'a, str>,
	full_path: Cow<'a, str>,
	size: u64,
	size_formatted: String,
	modified_time: f64,
	modified_time_formatted: String,
	is_directory: bool,
	extension: String,
	icon_class: IconClass,
}

/// Display category derived from an entry's kind and extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconClass {
	Folder,
	Pdf,
	Word,
	Excel,
	Powerpoint,
	Image,
	Audio,
	Video,
	Archive,
	Code,
	Text,
	Generic,
}

impl IconClass {
	pub fn for_extension(ext: &str) -> Self {
		match ext {
			"pdf" => Self::Pdf,
			"doc" | "docx" => Self::Word,
			"xls" | "xlsx" => Self::Excel,
			"ppt" | "pptx" => Self::Powerpoint,
			"txt" => Self::Text,
			"zip" | "rar" | "tar" | "gz" => Self::Archive,
			"mp3" | "wav" | "flac" => Self::Audio,
			"mp4" | "avi" | "mkv" => Self::Video,
			"jpg" | "jpeg" | "png" | "gif" => Self::Image,
			"py" | "js" | "html" | "css" | "cpp" | "java" => Self::Code,
			_ => Self::Generic,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Folder => "folder-icon",
			Self::Pdf => "pdf-icon",
			Self::Word => "word-icon",
			Self::Excel => "excel-icon",
			Self::Powerpoint => "powerpoint-icon",
			Self::Image => "image-icon",
			Self::Audio => "audio-icon",
			Self::Video => "video-icon",
			Self::Archive => "archive-icon",
			Self::Code => "code-icon",
			Self::Text => "text-icon",
			Self::Generic => "file-icon",
		}
	}
}

impl Serialize for IconClass {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

/// Human-readable byte count: whole bytes below 1 KiB, otherwise two
/// decimals in the largest unit that keeps the value under 1024.
pub fn format_size(size: u64) -> String {
	const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

	if size < 1024 {
		return format!("{size} B");
	}

	let mut value = size as f64 / 1024.0;
	let mut unit = 0;
	while value >= 1024.0 && unit < UNITS.len() - 1 {
		value /= 1024.0;
		unit += 1;
	}
	format!("{value:.2} {}", UNITS[unit])
}

/// Local-time rendering of a timestamp.
pub fn format_time(time: SystemTime) -> String {
	DateTime::<Local>::from(time).format(TIME_FORMAT).to_string()
}
