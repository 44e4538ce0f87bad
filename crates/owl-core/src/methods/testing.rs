//! Recording fake for the Bot API port.

use std::{io::Read, sync::Mutex};

use crate::{
    errors::Error,
    ports::{BotApi, FormFields, MultipartFile},
    Result,
};

#[derive(Debug, Clone, PartialEq)]
pub struct JsonCall {
    pub method: String,
    pub body: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFile {
    pub field_name: String,
    pub file_name: String,
    pub size_bytes: u64,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultipartCall {
    pub method: String,
    pub fields: FormFields,
    pub files: Vec<RecordedFile>,
}

/// Records every submission; optionally fails them all with an API error.
#[derive(Default)]
pub struct RecordingApi {
    pub json: Mutex<Vec<JsonCall>>,
    pub multipart: Mutex<Vec<MultipartCall>>,
    fail_with: Option<(u16, String)>,
}

impl RecordingApi {
    pub fn failing(status: u16, description: &str) -> Self {
        Self {
            fail_with: Some((status, description.to_string())),
            ..Self::default()
        }
    }

    pub fn json_calls(&self) -> Vec<JsonCall> {
        self.json.lock().unwrap().clone()
    }

    pub fn multipart_calls(&self) -> Vec<MultipartCall> {
        self.multipart.lock().unwrap().clone()
    }

    fn outcome(&self, method: &str) -> Result<()> {
        match &self.fail_with {
            None => Ok(()),
            Some((status, description)) => Err(Error::Api {
                endpoint: method.to_string(),
                status: *status,
                code: i64::from(*status),
                description: description.clone(),
            }),
        }
    }
}

impl BotApi for RecordingApi {
    fn submit_json(&self, method: &str, body: &serde_json::Value) -> Result<()> {
        self.json.lock().unwrap().push(JsonCall {
            method: method.to_string(),
            body: body.clone(),
        });
        self.outcome(method)
    }

    fn submit_multipart(
        &self,
        method: &str,
        fields: &FormFields,
        files: Vec<MultipartFile>,
    ) -> Result<()> {
        let mut recorded = Vec::with_capacity(files.len());
        for mut file in files {
            let mut content = String::new();
            file.reader.read_to_string(&mut content)?;
            recorded.push(RecordedFile {
                field_name: file.field_name,
                file_name: file.file_name,
                size_bytes: file.size_bytes,
                content,
            });
        }

        self.multipart.lock().unwrap().push(MultipartCall {
            method: method.to_string(),
            fields: fields.clone(),
            files: recorded,
        });
        self.outcome(method)
    }
}
