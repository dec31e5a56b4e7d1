//! Pipe-delimited record grammar shared by world files and save files
//!
//! One logical record per line: a two-character tag, a colon, then
//! pipe-delimited fields with a trailing pipe. The tokenizer is pure:
//! it returns owned fields and never touches shared buffers.

use crate::core::error::{GameError, Result};

/// Record tags, one per entity kind plus turn/interface/mission lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordTag {
    Space,
    Object,
    Player,
    Character,
    Link,
    Turn,
    Interface,
    Mission,
}

impl RecordTag {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordTag::Space => "#s",
            RecordTag::Object => "#o",
            RecordTag::Player => "#p",
            RecordTag::Character => "#c",
            RecordTag::Link => "#l",
            RecordTag::Turn => "#t",
            RecordTag::Interface => "#i",
            RecordTag::Mission => "#m",
        }
    }

    pub fn parse(s: &str) -> Option<RecordTag> {
        match s {
            "#s" => Some(RecordTag::Space),
            "#o" => Some(RecordTag::Object),
            "#p" => Some(RecordTag::Player),
            "#c" => Some(RecordTag::Character),
            "#l" => Some(RecordTag::Link),
            "#t" => Some(RecordTag::Turn),
            "#i" => Some(RecordTag::Interface),
            "#m" => Some(RecordTag::Mission),
            _ => None,
        }
    }
}

/// One tokenized record: tag plus owned fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub tag: RecordTag,
    pub fields: Vec<String>,
    /// 1-based source line, 0 for records built by the writer
    pub line: usize,
}

impl Record {
    pub fn new(tag: RecordTag) -> Self {
        Self {
            tag,
            fields: Vec::new(),
            line: 0,
        }
    }

    pub fn push(&mut self, field: impl Into<String>) {
        self.fields.push(field.into());
    }

    /// Tokenize one line
    ///
    /// The trailing pipe produces one empty trailing field, which is
    /// dropped; empty fields anywhere else are preserved (they are
    /// meaningful, e.g. "object carried in an inventory").
    pub fn parse(text: &str, line: usize) -> Result<Record> {
        let (tag_text, rest) = text.split_once(':').ok_or(GameError::MalformedRecord {
            line,
            reason: "missing ':' after record tag".to_string(),
        })?;
        let tag = RecordTag::parse(tag_text).ok_or(GameError::UnknownTag {
            line,
            tag: tag_text.to_string(),
        })?;
        let mut fields: Vec<String> = rest.split('|').map(str::to_string).collect();
        if fields.last().map(|f| f.is_empty()).unwrap_or(false) {
            fields.pop();
        }
        Ok(Record { tag, fields, line })
    }

    /// Render as one line, trailing pipe included
    pub fn to_line(&self) -> String {
        let mut line = String::from(self.tag.as_str());
        line.push(':');
        for field in &self.fields {
            line.push_str(field);
            line.push('|');
        }
        line
    }

    fn malformed(&self, reason: impl Into<String>) -> GameError {
        GameError::MalformedRecord {
            line: self.line,
            reason: reason.into(),
        }
    }

    // === TYPED FIELD ACCESS ===

    pub fn field(&self, index: usize) -> Result<&str> {
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.malformed(format!("missing field {index}")))
    }

    pub fn u32_field(&self, index: usize) -> Result<u32> {
        self.field(index)?
            .parse()
            .map_err(|_| self.malformed(format!("field {index} is not an unsigned number")))
    }

    pub fn i32_field(&self, index: usize) -> Result<i32> {
        self.field(index)?
            .parse()
            .map_err(|_| self.malformed(format!("field {index} is not a number")))
    }

    pub fn usize_field(&self, index: usize) -> Result<usize> {
        self.field(index)?
            .parse()
            .map_err(|_| self.malformed(format!("field {index} is not an index")))
    }

    /// 0/1 flag field
    pub fn bool_field(&self, index: usize) -> Result<bool> {
        match self.field(index)? {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(self.malformed(format!("field {index} is not a 0/1 flag: {other:?}"))),
        }
    }

    /// Optional id field: empty means absent
    pub fn opt_u32_field(&self, index: usize) -> Result<Option<u32>> {
        let raw = self.field(index)?;
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse()
            .map(Some)
            .map_err(|_| self.malformed(format!("field {index} is not an id")))
    }
}

/// Render a 0/1 flag
pub fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
