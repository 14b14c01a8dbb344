//! Multipart body for the upload route.
//!
//! The upload action takes an already-encoded body plus its boundary. This
//! module produces both from files in memory or on disk.

use std::path::Path;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::ClientError;
use crate::utils::mime::guess_mime;

const MAX_BOUNDARY_LEN: usize = 70;

/// A fresh boundary token, unique per call.
pub fn generate_boundary() -> String {
    format!("----postfiles{}", uuid::Uuid::new_v4().simple())
}

#[derive(Debug, Clone)]
struct FilePart {
    client_id: String,
    filename: String,
    mime_type: String,
    content: Bytes,
}

/// `multipart/form-data` body carrying `channel_id`, and one `client_ids`
/// field plus one `files` part per file, in insertion order.
#[derive(Debug, Clone)]
pub struct UploadForm {
    boundary: String,
    channel_id: String,
    parts: Vec<FilePart>,
}

impl UploadForm {
    /// New form with a generated boundary.
    pub fn new(channel_id: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_boundary(channel_id, generate_boundary())
    }

    /// New form with a caller-chosen boundary (RFC 2046 `bchars`, at most 70).
    pub fn with_boundary(
        channel_id: impl Into<String>,
        boundary: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let boundary = boundary.into();
        validate_boundary(&boundary)?;
        let channel_id = channel_id.into();
        validate_field_value("channel_id", &channel_id)?;
        Ok(Self {
            boundary,
            channel_id,
            parts: Vec::new(),
        })
    }

    /// Add a file held in memory. The MIME type is guessed from the name,
    /// then from the content.
    ///
    /// Fails when `client_id` contains a line break or `content` contains the
    /// form's delimiter line.
    pub fn add_file(
        mut self,
        client_id: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Result<Self, ClientError> {
        let client_id = client_id.into();
        validate_field_value("client_ids", &client_id)?;
        let filename = filename.into();
        let content = content.into();
        if contains_delimiter(&content, &self.boundary) {
            return Err(ClientError::InvalidInput(format!(
                "Content of '{filename}' contains the form boundary"
            )));
        }
        let mime_type = guess_mime(&filename, &content);
        self.parts.push(FilePart {
            client_id,
            filename,
            mime_type,
            content,
        });
        Ok(self)
    }

    /// Add a file read from disk; the part is named after the path's file name.
    pub async fn add_file_path(
        self,
        client_id: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ClientError::InvalidInput(format!("Path has no file name: {}", path.display()))
            })?
            .to_string();
        let content = tokio::fs::read(path).await?;
        self.add_file(client_id, filename, content)
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Correlation ids in the order the server will echo them back.
    pub fn client_ids(&self) -> Vec<String> {
        self.parts.iter().map(|p| p.client_id.clone()).collect()
    }

    /// Encode the body.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.write_field(&mut buf, "channel_id", &self.channel_id);
        for part in &self.parts {
            self.write_field(&mut buf, "client_ids", &part.client_id);
            self.write_file(&mut buf, part);
        }
        buf.put_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        buf.freeze()
    }

    fn write_field(&self, buf: &mut BytesMut, name: &str, value: &str) {
        buf.put_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
    }

    fn write_file(&self, buf: &mut BytesMut, part: &FilePart) {
        buf.put_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary,
                escape_quoted(&part.filename),
                part.mime_type
            )
            .as_bytes(),
        );
        buf.put_slice(&part.content);
        buf.put_slice(b"\r\n");
    }
}

fn validate_boundary(boundary: &str) -> Result<(), ClientError> {
    if boundary.is_empty() || boundary.len() > MAX_BOUNDARY_LEN {
        return Err(ClientError::InvalidInput(format!(
            "Form boundary must be 1..={MAX_BOUNDARY_LEN} characters"
        )));
    }
    let valid = boundary
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "'()+_,-./:=?".contains(c));
    if !valid {
        return Err(ClientError::InvalidInput(format!(
            "Form boundary contains invalid characters: {boundary}"
        )));
    }
    Ok(())
}

fn validate_field_value(name: &str, value: &str) -> Result<(), ClientError> {
    if value.contains(['\r', '\n']) {
        return Err(ClientError::InvalidInput(format!(
            "Form field '{name}' must not contain line breaks"
        )));
    }
    Ok(())
}

fn contains_delimiter(content: &[u8], boundary: &str) -> bool {
    let delimiter = format!("--{boundary}");
    content
        .windows(delimiter.len())
        .any(|window| window == delimiter.as_bytes())
}

fn escape_quoted(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect::<String>()
        .replace('"', "%22")
}
