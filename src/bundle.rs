use std::fmt;

use reqwest::multipart::{Form, Part};

use crate::error::ClientError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    PreReport,
    PostReport,
    PreCsv,
    PostCsv,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::PreReport, Slot::PostReport, Slot::PreCsv, Slot::PostCsv];

    pub fn field_name(self) -> &'static str {
        match self {
            Slot::PreReport => "pre_report",
            Slot::PostReport => "post_report",
            Slot::PreCsv => "pre_csv",
            Slot::PostCsv => "post_csv",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.field_name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Content type picked from the file extension.
    pub fn guess(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name);

        Self::new(file_name, content_type, bytes)
    }

    fn to_part(&self) -> Result<Part, reqwest::Error> {
        Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.content_type)
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}

/// The four file inputs of the page.
#[derive(Clone, Debug, Default)]
pub struct UploadBundle {
    slots: [Option<FilePart>; 4],
}

impl UploadBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, slot: Slot, file: FilePart) -> Self {
        self.set(slot, file);
        self
    }

    pub fn set(&mut self, slot: Slot, file: FilePart) {
        self.slots[slot.index()] = Some(file);
    }

    pub fn clear(&mut self, slot: Slot) {
        self.slots[slot.index()] = None;
    }

    pub fn get(&self, slot: Slot) -> Option<&FilePart> {
        self.slots[slot.index()].as_ref()
    }

    pub fn missing(&self) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|slot| self.get(*slot).is_none())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let missing = self.missing();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ClientError::MissingFiles(missing))
        }
    }

    pub fn to_form(&self) -> Result<Form, ClientError> {
        self.validate()?;

        let mut form = Form::new();
        for slot in Slot::ALL {
            if let Some(file) = self.get(slot) {
                form = form.part(slot.field_name(), file.to_part()?);
            }
        }

        Ok(form)
    }
}
